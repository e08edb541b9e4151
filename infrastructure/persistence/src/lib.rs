pub mod db;
pub mod memory;
pub mod resilience;
pub mod franchise {
    pub mod entity;
    pub mod repository;
}
