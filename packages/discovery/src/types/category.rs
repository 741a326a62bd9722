//! The closed set of opportunity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DiscoveryError;

/// Kind of opportunity a search targets.
///
/// Drives the site list, the extraction schema and the URL relevance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Job,
    Internship,
    Hackathon,
    Course,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Job,
        Category::Internship,
        Category::Hackathon,
        Category::Course,
    ];

    /// Wire name (`JOB`, `INTERNSHIP`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Job => "JOB",
            Self::Internship => "INTERNSHIP",
            Self::Hackathon => "HACKATHON",
            Self::Course => "COURSE",
        }
    }

    /// Human-readable plural name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Job => "Jobs",
            Self::Internship => "Internships",
            Self::Hackathon => "Hackathons",
            Self::Course => "Courses",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Job => "Full-time job opportunities in India",
            Self::Internship => "Internship opportunities for students",
            Self::Hackathon => "Coding competitions and hackathons",
            Self::Course => "Educational courses and tutorials",
        }
    }

    /// Lower-case singular, as used inside search queries and prompts.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Internship => "internship",
            Self::Hackathon => "hackathon",
            Self::Course => "course",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Job
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JOB" => Ok(Self::Job),
            "INTERNSHIP" => Ok(Self::Internship),
            "HACKATHON" => Ok(Self::Hackathon),
            "COURSE" => Ok(Self::Course),
            _ => Err(DiscoveryError::UnknownCategory(s.to_string())),
        }
    }
}
