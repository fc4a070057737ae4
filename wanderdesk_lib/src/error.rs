//! Error types for the library layer.

use std::fmt;

use wanderdesk_api::Resource;

use crate::config::ConfigError;

/// The mutation a [`AdminError::MutationFailed`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Publish,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Publish => "publish",
        };
        write!(f, "{}", name)
    }
}

/// One flagged form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding validation, input and configuration failures.
#[derive(Debug)]
pub enum AdminError {
    /// Loading a list or a record failed.
    FetchFailed {
        resource: Resource,
        source: wanderdesk_api::Error,
    },
    /// A create, update, delete or publish call failed or was rejected.
    MutationFailed {
        operation: Operation,
        resource: Resource,
        reason: String,
        source: Option<wanderdesk_api::Error>,
    },
    /// Required or malformed form fields. Never reaches the network.
    ValidationFailed(Vec<FieldError>),
    /// A request that makes no sense in the current state or for this resource.
    InvalidInput(String),
    /// Configuration could not be loaded.
    Config(ConfigError),
}

impl AdminError {
    pub(crate) fn fetch(resource: Resource, source: wanderdesk_api::Error) -> Self {
        Self::FetchFailed { resource, source }
    }

    pub(crate) fn mutation(
        operation: Operation,
        resource: Resource,
        source: wanderdesk_api::Error,
    ) -> Self {
        Self::MutationFailed {
            operation,
            resource,
            reason: source.to_string(),
            source: Some(source),
        }
    }

    /// A mutation the backend declined without an error status.
    pub(crate) fn rejected(operation: Operation, resource: Resource) -> Self {
        Self::MutationFailed {
            operation,
            resource,
            reason: "the server did not confirm the change".to_string(),
            source: None,
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed { resource, source } => {
                write!(f, "Failed to load {}: {}", resource, source)
            }
            Self::MutationFailed {
                operation,
                resource,
                reason,
                ..
            } => write!(f, "Failed to {} {}: {}", operation, resource, reason),
            Self::ValidationFailed(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Invalid fields: {}", fields.join(", "))
            }
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FetchFailed { source, .. } => Some(source),
            Self::MutationFailed {
                source: Some(source),
                ..
            } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for AdminError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_message_names_operation() {
        let err = AdminError::mutation(
            Operation::Delete,
            Resource::Flights,
            wanderdesk_api::Error::HttpStatus {
                status: 404,
                body: "gone".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Failed to delete flights: Request failed with status 404"
        );
    }

    #[test]
    fn rejected_publish_has_no_source() {
        let err = AdminError::rejected(Operation::Publish, Resource::Gifts);
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().starts_with("Failed to publish gifts"));
    }
}
