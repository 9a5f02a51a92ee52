pub mod alerter;
pub mod compactor;
pub mod normalizer;
pub mod rules;

pub use alerter::{AlertService, DispatchSummary};
pub use rules::RulesEngine;
