pub mod billing;
pub mod commands;
pub mod contracts;
pub mod error;
pub mod profiles;
mod records;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{EngineError, EngineResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
