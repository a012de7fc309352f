//! Domain models for the RainTrack parametric insurance platform

mod claim;
mod peril;
mod portfolio;
mod project;
mod rainfall;
mod user;

pub use claim::*;
pub use peril::*;
pub use portfolio::*;
pub use project::*;
pub use rainfall::*;
pub use user::*;
