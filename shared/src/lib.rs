//! Shared types and models for the RainTrack parametric insurance platform
//!
//! This crate contains the domain models, the pure payout-evaluation core,
//! and validation helpers shared between the backend and other components.

pub mod evaluation;
pub mod models;
pub mod types;
pub mod validation;

pub use evaluation::*;
pub use models::*;
pub use types::*;
pub use validation::*;
