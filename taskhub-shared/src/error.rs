/// Domain error type for write operations
///
/// Mutations never surface protocol-level errors for domain failures. Every
/// failure is tagged here and flattened into the `errors` list of the mutation
/// payload at the schema boundary, so clients always receive the uniform
/// `{entity, success, errors}` shape.
///
/// # Example
///
/// ```
/// use taskhub_shared::error::WriteError;
///
/// let err = WriteError::NotFound("Project");
/// assert_eq!(err.to_string(), "Project not found");
/// ```

use thiserror::Error;

/// Tagged failure for create/update/delete operations.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Entity does not exist, or belongs to a different tenant. The two cases
    /// are deliberately indistinguishable so that existence under another
    /// tenant never leaks.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness violation (organization name/slug, project name per
    /// organization).
    #[error("{0}")]
    Conflict(String),

    /// Field-level validation failure.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Any other persistence failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl WriteError {
    /// Convenience constructor for validation failures.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        WriteError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for WriteError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let message = match db_err.constraint() {
                    Some("organizations_name_key") => {
                        "An organization with this name already exists".to_string()
                    }
                    Some("organizations_slug_key") => {
                        "An organization with this slug already exists".to_string()
                    }
                    Some("projects_organization_id_name_key") => {
                        "A project with this name already exists in this organization"
                            .to_string()
                    }
                    Some(constraint) => format!("Constraint violation: {constraint}"),
                    None => "Uniqueness constraint violation".to_string(),
                };
                return WriteError::Conflict(message);
            }
        }
        WriteError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(WriteError::NotFound("Project").to_string(), "Project not found");
        assert_eq!(WriteError::NotFound("Task").to_string(), "Task not found");
    }

    #[test]
    fn test_conflict_display() {
        let err = WriteError::Conflict("An organization with this name already exists".into());
        assert_eq!(
            err.to_string(),
            "An organization with this name already exists"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = WriteError::validation("contact_email", "Enter a valid email address");
        assert_eq!(err.to_string(), "contact_email: Enter a valid email address");
    }

    #[test]
    fn test_row_not_found_maps_to_database() {
        let err = WriteError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, WriteError::Database(_)));
    }
}
