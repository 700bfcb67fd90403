pub mod cards;
pub mod common;
pub mod cycle;
pub mod invoice;
pub mod plan;
pub mod split;
pub mod status;

pub use common::CardArgs;
