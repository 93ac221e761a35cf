// Domain layer - Readings, tiers and threshold rules
pub mod subject;
pub mod threshold;
pub mod tier;
