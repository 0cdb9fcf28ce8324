// Project record and creation payload

use serde::{Deserialize, Serialize};

use super::{non_empty, Record, ValidationError};

/// A project as stored in the projects collection file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Ids of tasks that belong to this project (back-references only)
    #[serde(default)]
    pub tasks: Vec<u64>,
}

impl Project {
    pub fn new(id: u64, fields: ProjectFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            tasks: Vec::new(),
        }
    }

    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }
}

impl Record for Project {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Body of `POST /projects`
#[derive(Debug, Default, Deserialize)]
pub struct NewProject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated project fields, waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
}

impl NewProject {
    pub fn validate(self) -> Result<ProjectFields, ValidationError> {
        match (non_empty(self.title), non_empty(self.description)) {
            (Some(title), Some(description)) => Ok(ProjectFields { title, description }),
            _ => Err(ValidationError::MissingProjectFields),
        }
    }
}
