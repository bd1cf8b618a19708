//! Identifier types shared across models.

/// Team identifier as issued by the match data provider.
pub type TeamId = u32;

/// Player identifier as issued by the statistics provider.
pub type PlayerId = String;
