//! Core data models for football analytics.

mod comparison;
mod ids;
mod match_record;
mod player;
mod prediction;
mod season;
mod team;

pub use comparison::*;
pub use ids::*;
pub use match_record::*;
pub use player::*;
pub use prediction::*;
pub use season::*;
pub use team::*;
