//! Service layer providing business-oriented identity-linkage operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod identity;
#[cfg(test)]
pub mod test_support;

pub use identity::IdentityLinkStore;
