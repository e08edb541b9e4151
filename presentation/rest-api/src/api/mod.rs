pub mod error;
pub mod franchise;
pub mod health;
pub mod resilience;
pub mod tags;
