use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Member, ProjectRecord, Vacation};

/// The persisted record set the engine is fed from: raw per-assignee
/// project submissions, vacations, and the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub vacations: Vec<Vacation>,
    #[serde(default)]
    pub members: Vec<Member>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            projects: Vec::new(),
            vacations: Vec::new(),
            members: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Plan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
