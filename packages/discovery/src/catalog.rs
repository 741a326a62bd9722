//! Static, read-only site configuration keyed by [`Category`].
//!
//! Every category-dependent decision in the pipeline (site list, location
//! filter, query templates, URL relevance rules, extraction schema) is looked
//! up here by value instead of being branched on at the call site.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::types::category::Category;
use crate::types::listing;

/// Everything the pipeline needs to know about one category.
#[derive(Debug, Clone)]
pub struct CategoryProfile {
    pub category: Category,

    /// Candidate sites, most trusted first. May include a path
    /// (`linkedin.com/jobs`).
    pub sites: Vec<&'static str>,

    /// Default location filter; `None` for location-free categories.
    pub location_filter: Option<&'static str>,

    /// Result cap per site.
    pub results_per_site: usize,

    /// Category keyword appended to site-agnostic queries.
    pub keyword: &'static str,

    /// Per-site query templates. Placeholders: `{site}`, `{query}`, `{location}`.
    pub site_templates: Vec<&'static str>,

    /// URL path fragments that make a hit plausible for the category.
    pub path_indicators: Vec<&'static str>,

    /// Host labels of sites whose hits are accepted regardless of path.
    pub trusted_domains: Vec<&'static str>,

    /// Pretty-printed JSON schema of the listing array.
    pub schema: String,
}

impl CategoryProfile {
    /// Location to use for a run: COURSE ignores overrides, the rest fall back
    /// to their default filter.
    pub fn effective_location(&self, requested: Option<&str>) -> Option<String> {
        let default = self.location_filter?;
        Some(
            requested
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(default)
                .to_string(),
        )
    }

    /// Whether `host` belongs to one of the trusted sites.
    ///
    /// Matches whole host labels, so `in.linkedin.com` matches `linkedin`
    /// while `notlinkedin.example` does not.
    pub fn is_trusted_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        host.split('.')
            .any(|label| self.trusted_domains.iter().any(|d| *d == label))
    }
}

/// Introspection view of one category's coverage.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub sites: Vec<String>,
    pub count: usize,
    pub location_filter: Option<String>,
    pub results_per_site: usize,
}

/// Introspection view of the whole catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformOverview {
    pub total_platforms: usize,
    pub categories: BTreeMap<String, PlatformSummary>,
}

/// Process-wide category table, built once.
#[derive(Debug)]
pub struct SiteCatalog {
    profiles: [CategoryProfile; 4],
}

impl SiteCatalog {
    /// The shared catalog.
    pub fn global() -> &'static SiteCatalog {
        static CATALOG: OnceLock<SiteCatalog> = OnceLock::new();
        CATALOG.get_or_init(SiteCatalog::build)
    }

    fn build() -> Self {
        Self {
            profiles: [
                CategoryProfile {
                    category: Category::Job,
                    sites: vec![
                        "linkedin.com/jobs",
                        "indeed.co.in",
                        "glassdoor.co.in",
                        "naukri.com",
                        "shine.com",
                        "foundit.in",
                        "freshersworld.com",
                        "timesjobs.com",
                        "apna.co",
                    ],
                    location_filter: Some("India"),
                    results_per_site: 5,
                    keyword: "jobs",
                    site_templates: vec![
                        "{site} {query} jobs {location}",
                        "site:{site} \"{query}\" vacancy apply",
                    ],
                    path_indicators: vec!["/jobs/", "/job/", "/careers/", "/vacancy/", "/opening/"],
                    trusted_domains: vec!["naukri", "indeed", "linkedin", "glassdoor"],
                    schema: listing::schema_for(Category::Job),
                },
                CategoryProfile {
                    category: Category::Internship,
                    sites: vec![
                        "internshala.com",
                        "letsintern.com",
                        "linkedin.com/jobs",
                        "indeed.co.in",
                        "glassdoor.co.in",
                        "naukri.com",
                        "freshersworld.com",
                        "unstop.com",
                        "stipend.com",
                        "twentynineteen.com",
                    ],
                    location_filter: Some("India"),
                    results_per_site: 5,
                    keyword: "internship",
                    site_templates: vec![
                        "{site} {query} internship {location}",
                        "site:{site} \"{query}\" intern apply stipend",
                    ],
                    path_indicators: vec!["/internship", "/intern/", "/jobs/", "/job/"],
                    trusted_domains: vec!["internshala", "letsintern", "unstop"],
                    schema: listing::schema_for(Category::Internship),
                },
                CategoryProfile {
                    category: Category::Hackathon,
                    sites: vec![
                        "unstop.com",
                        "devpost.com",
                        "hack2skill.com",
                        "hackerearth.com",
                        "devfolio.co",
                        "mlh.io",
                        "dare2compete.com",
                        "techgig.com",
                    ],
                    location_filter: Some("India"),
                    results_per_site: 5,
                    keyword: "hackathon registration",
                    site_templates: vec!["{site} {query} hackathon registration"],
                    path_indicators: vec!["/hackathon", "/competition", "/challenge", "/event/"],
                    trusted_domains: vec!["unstop", "devpost", "devfolio", "hackerearth"],
                    schema: listing::schema_for(Category::Hackathon),
                },
                CategoryProfile {
                    category: Category::Course,
                    sites: vec![
                        "youtube.com",
                        "coursera.org",
                        "udemy.com",
                        "freecodecamp.org",
                        "edx.org",
                        "khanacademy.org",
                        "nptel.ac.in",
                        "swayam.gov.in",
                        "skillshare.com",
                        "codecademy.com",
                        "geeksforgeeks.org",
                        "w3schools.com",
                        "tutorialspoint.com",
                    ],
                    location_filter: None,
                    results_per_site: 4,
                    keyword: "course free",
                    site_templates: vec!["{site} {query} course free tutorial"],
                    path_indicators: vec!["/course", "/learn/", "/tutorial", "/class/"],
                    trusted_domains: vec![
                        "coursera",
                        "udemy",
                        "edx",
                        "nptel",
                        "swayam",
                        "freecodecamp",
                        "khanacademy",
                    ],
                    schema: listing::schema_for(Category::Course),
                },
            ],
        }
    }

    pub fn profile(&self, category: Category) -> &CategoryProfile {
        let idx = match category {
            Category::Job => 0,
            Category::Internship => 1,
            Category::Hackathon => 2,
            Category::Course => 3,
        };
        &self.profiles[idx]
    }

    /// Site list as owned strings, for the result envelope.
    pub fn sources(&self, category: Category) -> Vec<String> {
        self.profile(category)
            .sites
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Coverage overview for clients that want to show which platforms are searched.
    pub fn platforms(&self) -> PlatformOverview {
        let categories: BTreeMap<String, PlatformSummary> = self
            .profiles
            .iter()
            .map(|p| {
                (
                    p.category.as_str().to_string(),
                    PlatformSummary {
                        sites: p.sites.iter().map(|s| s.to_string()).collect(),
                        count: p.sites.len(),
                        location_filter: p.location_filter.map(str::to_string),
                        results_per_site: p.results_per_site,
                    },
                )
            })
            .collect();

        PlatformOverview {
            total_platforms: categories.values().map(|c| c.count).sum(),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_indexed_by_category() {
        let catalog = SiteCatalog::global();
        for category in Category::ALL {
            assert_eq!(catalog.profile(category).category, category);
        }
    }

    #[test]
    fn test_course_has_no_location() {
        let course = SiteCatalog::global().profile(Category::Course);
        assert_eq!(course.effective_location(Some("Pune")), None);

        let job = SiteCatalog::global().profile(Category::Job);
        assert_eq!(job.effective_location(None).as_deref(), Some("India"));
        assert_eq!(job.effective_location(Some("Pune")).as_deref(), Some("Pune"));
        assert_eq!(job.effective_location(Some("  ")).as_deref(), Some("India"));
    }

    #[test]
    fn test_trusted_host_matches_labels() {
        let job = SiteCatalog::global().profile(Category::Job);
        assert!(job.is_trusted_host("in.linkedin.com"));
        assert!(job.is_trusted_host("www.Naukri.com"));
        assert!(!job.is_trusted_host("notlinkedin.example"));
    }

    #[test]
    fn test_platform_overview_counts() {
        let overview = SiteCatalog::global().platforms();
        assert_eq!(overview.categories.len(), 4);
        assert_eq!(overview.categories["JOB"].count, 9);
        assert_eq!(overview.categories["COURSE"].location_filter, None);
        assert_eq!(overview.categories["JOB"].results_per_site, 5);
        assert_eq!(overview.categories["COURSE"].results_per_site, 4);
        assert_eq!(overview.total_platforms, 9 + 10 + 8 + 13);
    }
}
