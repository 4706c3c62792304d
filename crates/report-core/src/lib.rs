pub mod message;
pub mod pricing;
pub mod run;
pub mod usage;

pub use message::{ChatMessage, Role};
pub use pricing::{estimate_cost, PricingConfig};
pub use run::{ReportRun, StepRecord};
pub use usage::TokenUsage;
