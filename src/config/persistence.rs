//! File persistence configuration

/// Configuration for the user settings file
pub struct SettingsPersistenceConfig {
    /// Default path of the JSON settings file (overridable on the command line)
    pub path: &'static str,
}

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading UI-only state (active tab)
    pub state_path: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub settings: SettingsPersistenceConfig,
    pub app: AppPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    settings: SettingsPersistenceConfig {
        path: "config.json",
    },
    app: AppPersistenceConfig {
        state_path: ".states.json",
    },
};
