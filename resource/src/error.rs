//! Resource lookup and sampling errors.

use thiserror::Error;

pub type ResourceResult<T> = Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("No resource called {0}")]
    UnknownResource(String),

    #[error("Resource {resource} has no template called {template}")]
    UnknownTemplate { resource: String, template: String },

    #[error("The resource cluster is empty")]
    EmptyCluster,
}

impl ResourceError {
    pub fn unknown_template(resource: impl Into<String>, template: impl Into<String>) -> Self {
        Self::UnknownTemplate {
            resource: resource.into(),
            template: template.into(),
        }
    }
}
