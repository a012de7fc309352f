//! Business logic services for the RainTrack platform

pub mod auth;
pub mod claim;
pub mod peril;
pub mod portfolio;
pub mod project;
pub mod rainfall;

pub use auth::AuthService;
pub use claim::ClaimService;
pub use peril::PerilService;
pub use portfolio::PortfolioService;
pub use project::ProjectService;
pub use rainfall::RainfallService;
