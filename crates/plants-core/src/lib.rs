//! Domain layer for 30Plants.
//!
//! [`PlantService`] enforces the invariants (position assignment, default
//! titles, existence and blank-input checks) and delegates storage to an
//! injected [`plants_persistence::Store`].

pub mod config;
pub mod error;
pub mod service;
pub mod title;
pub mod validate;

pub use error::{Result, ServiceError};
pub use service::{Applied, PlantService};
pub use title::default_list_title;
