//! Configuration module: compile-time constants plus the user settings file.

mod gateway;
mod persistence;
mod settings;

// Public
pub mod constants;

// Re-export commonly used items
pub use constants::POLL_INTERVAL;
pub use gateway::{GATEWAY, GatewayConfig};
pub use persistence::PERSISTENCE;
pub use settings::{Settings, SettingsStore, WatchlistEdit};
