//! Minimal listings synthesized straight from search hits.

use crate::types::category::Category;
use crate::types::hit::SearchHit;
use crate::types::listing::{
    CourseListing, ExtractedListing, HackathonListing, InternshipListing, JobListing, SEE_LISTING,
};

/// Location written into fallback job/internship listings when the run has none.
const DEFAULT_LOCATION: &str = "India";

/// Build up to `limit` listings from `hits`, one per hit, in order.
///
/// Fields a title cannot tell us are set to [`SEE_LISTING`]. Hits with an
/// empty URL are skipped; an empty title falls back to the hit's domain.
pub fn format_hits(
    category: Category,
    hits: &[SearchHit],
    location: Option<&str>,
    limit: usize,
) -> Vec<ExtractedListing> {
    let location = location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LOCATION);

    hits.iter()
        .filter(|hit| !hit.url.trim().is_empty())
        .take(limit)
        .map(|hit| format_hit(category, hit, location))
        .collect()
}

fn format_hit(category: Category, hit: &SearchHit, location: &str) -> ExtractedListing {
    let domain = hit.domain();
    let title = match hit.title.trim() {
        "" => domain.clone(),
        t => t.to_string(),
    };
    let url = hit.url.clone();

    match category {
        Category::Job => ExtractedListing::Job(JobListing {
            role: title,
            company: SEE_LISTING.to_string(),
            location: location.to_string(),
            experience: None,
            salary: None,
            skills_required: Vec::new(),
            apply_link: url,
            source: domain,
        }),
        Category::Internship => ExtractedListing::Internship(InternshipListing {
            role: title,
            company: SEE_LISTING.to_string(),
            location: location.to_string(),
            duration: None,
            stipend: None,
            skills_required: Vec::new(),
            apply_link: url,
            source: domain,
        }),
        Category::Hackathon => ExtractedListing::Hackathon(HackathonListing {
            event_name: title,
            organizer: SEE_LISTING.to_string(),
            dates: None,
            prizes: None,
            registration_link: url,
            source: domain,
        }),
        Category::Course => ExtractedListing::Course(CourseListing {
            title,
            platform: domain,
            instructor: None,
            is_free: None,
            duration: None,
            link: url,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_fallback_fields() {
        let hits = vec![SearchHit::new("https://www.naukri.com/job/1").with_title("Python Developer")];
        let out = format_hits(Category::Job, &hits, None, 20);

        let ExtractedListing::Job(job) = &out[0] else {
            panic!("expected job listing");
        };
        assert_eq!(job.role, "Python Developer");
        assert_eq!(job.company, "see listing");
        assert_eq!(job.location, "India");
        assert_eq!(job.apply_link, "https://www.naukri.com/job/1");
        assert_eq!(job.source, "naukri.com");
    }

    #[test]
    fn test_course_fallback_uses_domain_as_platform() {
        let hits = vec![SearchHit::new("https://www.udemy.com/course/rust/")];
        let out = format_hits(Category::Course, &hits, Some("Pune"), 20);

        let ExtractedListing::Course(course) = &out[0] else {
            panic!("expected course listing");
        };
        assert_eq!(course.platform, "udemy.com");
        assert_eq!(course.title, "udemy.com");
    }

    #[test]
    fn test_fallback_respects_limit_and_location() {
        let hits: Vec<_> = (0..30)
            .map(|i| SearchHit::new(format!("https://internshala.com/internship/{i}")).with_title("Intern"))
            .collect();
        let out = format_hits(Category::Internship, &hits, Some("Bengaluru"), 20);

        assert_eq!(out.len(), 20);
        let ExtractedListing::Internship(first) = &out[0] else {
            panic!("expected internship listing");
        };
        assert_eq!(first.location, "Bengaluru");
        assert_eq!(out[19].link(), "https://internshala.com/internship/19");
    }

    #[test]
    fn test_hackathon_fallback() {
        let hits = vec![SearchHit::new("https://unstop.com/hackathons/sih").with_title("SIH 2025")];
        let out = format_hits(Category::Hackathon, &hits, None, 20);
        assert_eq!(out[0].category(), Category::Hackathon);
        assert_eq!(out[0].link(), "https://unstop.com/hackathons/sih");
    }
}
