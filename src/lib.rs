//! Finance Advisor
//!
//! Client-side advisory engine for a personal/business finance backend:
//! - Projects "what if" spending adjustments over a horizon
//! - Classifies the outcome into one of seven tiers
//! - Renders a tier- and horizon-specific advisory report
//! - Builds rule-based recommendations and answers questions over metrics
//! - Talks to the finance backend and auth service over HTTP
//!
//! FLOW:
//! INPUT → PROJECT → CLASSIFY → REPORT

pub mod advisor;
pub mod api;
pub mod assistant;
pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod recommendations;
pub mod report;
pub mod scenario;

pub use error::{AdvisorError, Result};

// Re-export common types
pub use advisor::{Advisor, LocalAdvisor, RemoteAdvisor, SimulationAnalysis};
pub use classifier::{classify, Tier};
pub use config::AdvisorConfig;
pub use models::*;
pub use recommendations::build_recommendations;
pub use report::{generate_report, HorizonBand};
pub use scenario::{project, Horizon};
