pub mod derivation;
pub mod engine;
pub mod formatter;
pub mod interpreter;
pub mod router;
pub mod seed;
pub mod strategy;
pub mod tables;

pub use crate::domain::model::{DerivationResult, DivinationRequest, InterpretationOutcome};
pub use crate::domain::ports::{Backoff, Clock, InterpretationService, SeedSource};
pub use crate::utils::error::Result;
