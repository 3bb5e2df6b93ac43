// Tabfinder services
// Filtering, view projection, the host gateway boundary and settings persistence.

pub mod filter_engine;
pub mod memory_gateway;
pub mod projection;
pub mod settings_engine;
pub mod sync_gateway;
