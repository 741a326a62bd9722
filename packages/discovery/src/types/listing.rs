//! Category-typed listings produced by the extractor or the fallback formatter.
//!
//! Exactly one listing shape is produced per pipeline run, selected by
//! [`Category`]. Listings serialize as flat JSON objects (no enum tag); the
//! category travels alongside them in the result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::Category;

/// Placeholder for fields that cannot be inferred from a search hit alone.
pub const SEE_LISTING: &str = "see listing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JobListing {
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, alias = "skills", skip_serializing_if = "Vec::is_empty")]
    pub skills_required: Vec<String>,
    pub apply_link: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InternshipListing {
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    #[serde(default, alias = "skills", skip_serializing_if = "Vec::is_empty")]
    pub skills_required: Vec<String>,
    pub apply_link: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HackathonListing {
    pub event_name: String,
    #[serde(default)]
    pub organizer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prizes: Option<String>,
    pub registration_link: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CourseListing {
    pub title: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub link: String,
}

/// A listing of whichever shape the run's category selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedListing {
    Job(JobListing),
    Internship(InternshipListing),
    Hackathon(HackathonListing),
    Course(CourseListing),
}

impl ExtractedListing {
    pub fn category(&self) -> Category {
        match self {
            Self::Job(_) => Category::Job,
            Self::Internship(_) => Category::Internship,
            Self::Hackathon(_) => Category::Hackathon,
            Self::Course(_) => Category::Course,
        }
    }

    /// The URL a user follows to act on the listing.
    pub fn link(&self) -> &str {
        match self {
            Self::Job(l) => &l.apply_link,
            Self::Internship(l) => &l.apply_link,
            Self::Hackathon(l) => &l.registration_link,
            Self::Course(l) => &l.link,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Job(l) => &l.role,
            Self::Internship(l) => &l.role,
            Self::Hackathon(l) => &l.event_name,
            Self::Course(l) => &l.title,
        }
    }

    /// Both the title and the link carry something.
    pub fn is_complete(&self) -> bool {
        !self.title().trim().is_empty() && !self.link().trim().is_empty()
    }

    /// Parse one element of the extraction service's JSON array.
    ///
    /// Returns `None` for anything that is not an object or lacks the
    /// category's required fields. Optional fields are read leniently: nulls
    /// are treated as absent, numbers stand in for text, `skills_required`
    /// may be a comma-separated string, `is_free` accepts the usual string
    /// spellings of a boolean, and any other mismatched value is dropped.
    pub fn from_value(category: Category, value: Value) -> Option<Self> {
        let Value::Object(obj) = value else {
            return None;
        };
        let obj: Map<String, Value> = obj
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match key.as_str() {
                    "skills_required" | "skills" => lenient_list(value),
                    "is_free" => lenient_bool(&value).map(Value::Bool),
                    _ => lenient_text(value),
                }?;
                Some((key, value))
            })
            .collect();
        let value = Value::Object(obj);

        let listing = match category {
            Category::Job => serde_json::from_value(value).ok().map(Self::Job),
            Category::Internship => serde_json::from_value(value).ok().map(Self::Internship),
            Category::Hackathon => serde_json::from_value(value).ok().map(Self::Hackathon),
            Category::Course => serde_json::from_value(value).ok().map(Self::Course),
        }?;

        listing.is_complete().then_some(listing)
    }
}

fn lenient_text(value: Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn lenient_list(value: Value) -> Option<Value> {
    let items: Vec<Value> = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(lenient_text)
            .filter(|v| v.as_str().is_some_and(|s| !s.trim().is_empty()))
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect(),
        _ => return None,
    };
    Some(Value::Array(items))
}

fn lenient_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "free" => Some(true),
            "false" | "no" | "paid" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// JSON schema of the listing array for `category`, pretty-printed for a prompt.
pub fn schema_for(category: Category) -> String {
    let schema = match category {
        Category::Job => schemars::schema_for!(Vec<JobListing>),
        Category::Internship => schemars::schema_for!(Vec<InternshipListing>),
        Category::Hackathon => schemars::schema_for!(Vec<HackathonListing>),
        Category::Course => schemars::schema_for!(Vec<CourseListing>),
    };
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_from_value_with_nulls() {
        let value = json!({
            "role": "Python Developer",
            "company": null,
            "location": "Bengaluru",
            "skills": ["python", "django"],
            "apply_link": "https://www.naukri.com/job/123",
            "source": "naukri.com"
        });

        let listing = ExtractedListing::from_value(Category::Job, value).unwrap();
        let ExtractedListing::Job(job) = &listing else {
            panic!("expected job listing");
        };
        assert_eq!(job.company, "");
        assert_eq!(job.skills_required, vec!["python", "django"]);
        assert_eq!(listing.link(), "https://www.naukri.com/job/123");
    }

    #[test]
    fn test_missing_required_field_is_dropped() {
        let no_link = json!({"role": "Data Analyst", "company": "Acme"});
        assert!(ExtractedListing::from_value(Category::Job, no_link).is_none());

        let blank_title = json!({"event_name": "  ", "registration_link": "https://devpost.com/x"});
        assert!(ExtractedListing::from_value(Category::Hackathon, blank_title).is_none());

        assert!(ExtractedListing::from_value(Category::Course, json!("just text")).is_none());
    }

    #[test]
    fn test_course_is_free_accepts_strings() {
        let value = json!({
            "title": "Rust for Beginners",
            "platform": "udemy.com",
            "is_free": "Yes",
            "link": "https://www.udemy.com/course/rust"
        });
        let listing = ExtractedListing::from_value(Category::Course, value).unwrap();
        let ExtractedListing::Course(course) = listing else {
            panic!("expected course listing");
        };
        assert_eq!(course.is_free, Some(true));
    }

    #[test]
    fn test_listing_serializes_flat() {
        let listing = ExtractedListing::Hackathon(HackathonListing {
            event_name: "Smart India Hackathon".into(),
            organizer: SEE_LISTING.into(),
            dates: None,
            prizes: None,
            registration_link: "https://unstop.com/hackathons/sih".into(),
            source: "unstop.com".into(),
        });

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["event_name"], "Smart India Hackathon");
        assert_eq!(json["organizer"], "see listing");
        assert!(json.get("dates").is_none());
    }

    #[test]
    fn test_schema_names_required_fields() {
        let required = [
            (Category::Job, ["role", "apply_link"]),
            (Category::Internship, ["role", "apply_link"]),
            (Category::Hackathon, ["event_name", "registration_link"]),
            (Category::Course, ["title", "link"]),
        ];
        for (category, fields) in required {
            let schema = schema_for(category);
            for field in fields {
                assert!(schema.contains(field), "{category} schema missing {field}");
            }
        }
    }

    #[test]
    fn test_optional_fields_are_coerced() {
        let salary = json!({
            "role": "Backend Engineer",
            "salary": 1200000,
            "apply_link": "https://www.naukri.com/job/1"
        });
        let ExtractedListing::Job(job) = ExtractedListing::from_value(Category::Job, salary).unwrap()
        else {
            panic!("expected job listing");
        };
        assert_eq!(job.salary.as_deref(), Some("1200000"));

        let skills = json!({
            "role": "SRE",
            "skills_required": "go, k8s,,",
            "experience": 3,
            "apply_link": "https://www.naukri.com/job/2"
        });
        let ExtractedListing::Job(job) = ExtractedListing::from_value(Category::Job, skills).unwrap()
        else {
            panic!("expected job listing");
        };
        assert_eq!(job.skills_required, vec!["go", "k8s"]);
        assert_eq!(job.experience.as_deref(), Some("3"));
    }

    #[test]
    fn test_mismatched_optional_field_is_dropped_not_the_listing() {
        let value = json!({
            "role": "Design Intern",
            "stipend": {"amount": 10000},
            "duration": ["3 months"],
            "skills": [1, "figma", null],
            "apply_link": "https://internshala.com/internship/detail/1"
        });
        let ExtractedListing::Internship(internship) =
            ExtractedListing::from_value(Category::Internship, value).unwrap()
        else {
            panic!("expected internship listing");
        };
        assert_eq!(internship.stipend, None);
        assert_eq!(internship.duration, None);
        assert_eq!(internship.skills_required, vec!["1", "figma"]);

        let course = json!({"title": "Go", "is_free": "maybe", "link": "https://x.example/go"});
        let ExtractedListing::Course(course) =
            ExtractedListing::from_value(Category::Course, course).unwrap()
        else {
            panic!("expected course listing");
        };
        assert_eq!(course.is_free, None);
    }
}
