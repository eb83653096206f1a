//! Identity linkage module: three-layer architecture (domain, repository, service).
//!
//! This module centralizes the mapping between user accounts and their
//! authentication identities under the service crate.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::IdentityLinkStore;
