//! `vendsim-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no routing or wiring concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::MachineId;
