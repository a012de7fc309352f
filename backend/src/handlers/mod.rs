//! HTTP handlers for the RainTrack API

mod auth;
mod claim;
mod health;
mod peril;
mod portfolio;
mod project;
mod rainfall;
mod weather;

pub use auth::*;
pub use claim::*;
pub use health::*;
pub use peril::*;
pub use portfolio::*;
pub use project::*;
pub use rainfall::*;
pub use weather::*;
