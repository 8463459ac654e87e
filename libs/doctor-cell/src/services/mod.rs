pub mod availability;
pub mod roster;
