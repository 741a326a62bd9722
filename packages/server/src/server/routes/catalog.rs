use axum::{extract::Extension, Json};
use discovery::{Category, PlatformOverview};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct PlatformsResponse {
    success: bool,
    #[serde(flatten)]
    overview: PlatformOverview,
}

#[derive(Serialize)]
pub struct CategoryInfo {
    id: Category,
    name: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    categories: Vec<CategoryInfo>,
}

/// Sites searched per category, for clients that show coverage.
pub async fn platforms_handler(Extension(state): Extension<AppState>) -> Json<PlatformsResponse> {
    Json(PlatformsResponse {
        success: true,
        overview: state.pipeline.catalog().platforms(),
    })
}

pub async fn categories_handler() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryInfo {
                id: c,
                name: c.display_name(),
                description: c.description(),
            })
            .collect(),
    })
}
