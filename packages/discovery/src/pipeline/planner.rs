//! Query planning: (query, category, location) → search-engine query strings.
//!
//! Pure and deterministic. No I/O, no failure mode.

use crate::catalog::CategoryProfile;

/// Build the ordered query plan for one run.
///
/// For each of the first `sites_per_plan` sites, every site template of the
/// category is expanded; two site-agnostic queries form the tail. The plan
/// is truncated to `max_queries`.
pub fn plan_queries(
    profile: &CategoryProfile,
    query: &str,
    location: Option<&str>,
    sites_per_plan: usize,
    max_queries: usize,
) -> Vec<String> {
    let query = query.trim();
    let location = location.map(str::trim).unwrap_or("");
    let mut queries = Vec::new();

    for site in profile.sites.iter().take(sites_per_plan) {
        for template in &profile.site_templates {
            queries.push(expand(template, site, query, location));
        }
    }

    let noun = profile.category.noun();
    if location.is_empty() {
        queries.push(collapse(&format!("{query} {noun}")));
        queries.push(collapse(&format!("\"{query}\" {}", profile.keyword)));
    } else {
        queries.push(collapse(&format!("{query} {noun} {location}")));
        queries.push(collapse(&format!("\"{query}\" {location} apply now")));
    }

    queries.truncate(max_queries);
    queries
}

/// Substitute placeholders in one pass so text from the user query is
/// never itself expanded.
fn expand(template: &str, site: &str, query: &str, location: &str) -> String {
    let mut out = String::with_capacity(template.len() + query.len() + location.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, len) = if tail.starts_with("{site}") {
            (site, "{site}".len())
        } else if tail.starts_with("{query}") {
            (query, "{query}".len())
        } else if tail.starts_with("{location}") {
            (location, "{location}".len())
        } else {
            ("{", 1)
        };
        out.push_str(value);
        rest = &tail[len..];
    }
    out.push_str(rest);

    collapse(&out)
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SiteCatalog;
    use crate::types::category::Category;

    #[test]
    fn test_job_plan_shape() {
        let profile = SiteCatalog::global().profile(Category::Job);
        let plan = plan_queries(profile, "python developer", Some("India"), 5, 15);

        // 5 sites x 2 templates + 2 tail queries
        assert_eq!(plan.len(), 12);
        assert_eq!(plan[0], "linkedin.com/jobs python developer jobs India");
        assert_eq!(plan[1], "site:linkedin.com/jobs \"python developer\" vacancy apply");
        assert_eq!(plan[10], "python developer job India");
        assert_eq!(plan[11], "\"python developer\" India apply now");
    }

    #[test]
    fn test_plan_is_bounded() {
        let profile = SiteCatalog::global().profile(Category::Internship);
        let plan = plan_queries(profile, "ml", Some("India"), 10, 15);
        assert_eq!(plan.len(), 15);

        let tiny = plan_queries(profile, "ml", Some("India"), 5, 3);
        assert_eq!(tiny.len(), 3);
    }

    #[test]
    fn test_course_plan_has_no_location() {
        let profile = SiteCatalog::global().profile(Category::Course);
        let plan = plan_queries(profile, "rust", None, 5, 15);

        assert_eq!(plan.len(), 7);
        assert_eq!(plan[0], "youtube.com rust course free tutorial");
        assert_eq!(plan[5], "rust course");
        assert_eq!(plan[6], "\"rust\" course free");
        assert!(plan.iter().all(|q| !q.contains("  ")));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let profile = SiteCatalog::global().profile(Category::Hackathon);
        let a = plan_queries(profile, "web3", Some("India"), 5, 15);
        let b = plan_queries(profile, "web3", Some("India"), 5, 15);
        assert_eq!(a, b);
        assert_eq!(a[0], "unstop.com web3 hackathon registration");
    }

    #[test]
    fn test_query_text_is_not_expanded() {
        let profile = SiteCatalog::global().profile(Category::Job);
        let plan = plan_queries(profile, "{location} {site} dev", Some("Pune"), 1, 15);

        assert_eq!(plan[0], "linkedin.com/jobs {location} {site} dev jobs Pune");
        assert!(plan.iter().all(|q| q.contains("{location} {site} dev")));
    }
}
