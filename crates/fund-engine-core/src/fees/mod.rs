pub mod commission;
pub mod tiers;
