//! # Action Result Protocol
//!
//! Every entry point answers with an [`ActionResponse`]: an HTTP-like status, a human message
//! and optional per-field errors. Internal layers return typed errors; [`ActionError::respond`]
//! is the only place that turns them into this shape.
//!
//! | status | meaning |
//! |--------|---------|
//! | 200 | updated or deleted |
//! | 201 | created |
//! | 400 | invalid input or id |
//! | 404 | resource not found |
//! | 409 | duplicate name, or category still in use |
//! | 500 | unexpected failure |

use crate::executor::MutationError;
use crate::model::ResourceKind;
use crate::validation::{self, FieldErrors};
use serde::Serialize;
use std::collections::BTreeMap;

pub const GENERAL: &str = "general";
pub const ID: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BTreeMap<String, String>>,
}

impl ActionResponse {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    fn with_error(mut self, field: &str, message: impl Into<String>) -> Self {
        self.error
            .get_or_insert_with(BTreeMap::new)
            .insert(field.to_string(), message.into());
        self
    }

    pub fn created(kind: ResourceKind) -> Self {
        Self::new(201, format!("{kind} added successfully."))
    }

    pub fn updated(kind: ResourceKind) -> Self {
        Self::new(200, format!("{kind} updated successfully."))
    }

    pub fn deleted(kind: ResourceKind) -> Self {
        Self::new(200, format!("{kind} deleted successfully."))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The message recorded against `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.error.as_ref()?.get(field).map(String::as_str)
    }
}

/// Why a pipeline run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// Input failed validation.
    Validation(FieldErrors),
    /// The id in the request is not a valid identifier.
    InvalidId,
    /// Another category already uses the submitted name.
    Conflict { name: String },
    /// A category cannot be deleted while products reference it.
    InUse { name: String, count: usize },
    NotFound,
    Unexpected(String),
}

impl From<FieldErrors> for ActionError {
    fn from(errors: FieldErrors) -> Self {
        ActionError::Validation(errors)
    }
}

impl From<MutationError> for ActionError {
    fn from(e: MutationError) -> Self {
        match e {
            MutationError::NotFound(_) => ActionError::NotFound,
            MutationError::Conflict { name } => ActionError::Conflict { name },
            MutationError::InUse { name, count } => ActionError::InUse { name, count },
            MutationError::UnknownCategory(_) => {
                let mut errors = FieldErrors::new();
                errors.add(validation::CATEGORY_ID, "Selected category does not exist");
                ActionError::Validation(errors)
            }
            MutationError::Unexpected(msg) => ActionError::Unexpected(msg),
        }
    }
}

impl ActionError {
    pub fn respond(self, kind: ResourceKind) -> ActionResponse {
        let lower = kind.as_str().to_lowercase();
        match self {
            ActionError::Validation(errors) => ActionResponse {
                status: 400,
                message: "Invalid input data.".to_string(),
                error: Some(errors.into_map()),
            },
            ActionError::InvalidId => ActionResponse::new(400, format!("Invalid {lower} ID."))
                .with_error(
                    ID,
                    format!("{kind} ID is required and must be a valid identifier."),
                ),
            ActionError::Conflict { name } => {
                ActionResponse::new(409, format!("{kind} already exists.")).with_error(
                    validation::CATEGORY_NAME,
                    format!("{kind} \"{name}\" already exists."),
                )
            }
            ActionError::InUse { name, count } => {
                ActionResponse::new(409, format!("{kind} is still in use."))
                    .with_error(ID, format!("{kind} \"{name}\" still has {count} product(s)."))
            }
            ActionError::NotFound => ActionResponse::new(404, format!("{kind} not found."))
                .with_error(ID, format!("The specified {lower} does not exist.")),
            ActionError::Unexpected(msg) => {
                ActionResponse::new(500, "An unexpected error occurred.").with_error(GENERAL, msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_shape() {
        let response = ActionError::Conflict {
            name: "drinks".to_string(),
        }
        .respond(ResourceKind::Category);

        assert_eq!(response.status, 409);
        assert_eq!(response.message, "Category already exists.");
        assert_eq!(
            response.field_error("categoryName"),
            Some("Category \"drinks\" already exists.")
        );
    }

    #[test]
    fn test_not_found_shape() {
        let response = ActionError::NotFound.respond(ResourceKind::Product);
        assert_eq!(response.status, 404);
        assert_eq!(response.message, "Product not found.");
        assert_eq!(response.field_error("id"), Some("The specified product does not exist."));
    }

    #[test]
    fn test_unknown_category_is_a_field_error() {
        let response = ActionError::from(MutationError::UnknownCategory(
            crate::model::CategoryId::generate(),
        ))
        .respond(ResourceKind::Product);

        assert_eq!(response.status, 400);
        assert_eq!(
            response.field_error("categoryId"),
            Some("Selected category does not exist")
        );
    }

    #[test]
    fn test_success_omits_error_when_serialized() {
        let json = serde_json::to_value(ActionResponse::created(ResourceKind::Category)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": 201, "message": "Category added successfully."})
        );
    }

    #[test]
    fn test_unexpected_keeps_detail_under_general() {
        let response = ActionError::Unexpected("Store actor closed".into())
            .respond(ResourceKind::Category);
        assert_eq!(response.status, 500);
        assert_eq!(response.message, "An unexpected error occurred.");
        assert_eq!(response.field_error("general"), Some("Store actor closed"));
        assert!(!response.is_success());
    }
}
