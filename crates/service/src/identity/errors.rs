use thiserror::Error;

/// Business errors for identity-linkage workflows
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("referential integrity violated: {0}")]
    ReferentialIntegrity(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate binding: {0}")]
    DuplicateBinding(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl IdentityError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            IdentityError::Validation(_) => 2001,
            IdentityError::ReferentialIntegrity(_) => 2002,
            IdentityError::NotFound(_) => 2003,
            IdentityError::DuplicateBinding(_) => 2004,
            IdentityError::Repository(_) => 2100,
        }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}
