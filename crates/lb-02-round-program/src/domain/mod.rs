//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic of the round program.
//! NO I/O, NO clock reads, NO ledger access.
//!
//! - This is the **inner layer** of the hexagonal architecture.
//! - Dependencies point INWARD only (the service depends on this, not vice versa).

pub mod derivation;
pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use derivation::*;
pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
