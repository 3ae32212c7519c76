//! Collaborator traits (ports) owned by the domain layer

pub mod collaborators;

pub use collaborators::{RepoResult, StatusStore};
