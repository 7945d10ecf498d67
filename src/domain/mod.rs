//! Domain layer containing business entities and logic.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`cleanup`] - Periodic reclamation of expired records
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits define contracts implemented by the
//! infrastructure layer, and business logic lives in
//! [`crate::application::services`].

pub mod cleanup;
pub mod entities;
pub mod repositories;
