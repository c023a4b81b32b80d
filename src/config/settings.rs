//! User settings: a flat JSON object on disk, loaded once at startup and handed to each tab.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Watchlist, normalize_asset_id};
use crate::error::SettingsError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub watchlist_ids: Watchlist,
    pub default_vs_currency: String,
    pub default_rank_top_n: u32,
    pub default_download_days: u32,
    pub price_tab_default_asset_id: String,
    pub price_tab_default_currency: String,
    pub converter_tab_default_amount: String,
    pub converter_tab_default_from_asset: String,
    pub converter_tab_default_to_currency: String,
    pub download_tab_default_asset_id: String,
    pub download_tab_default_file_format: String,
    /// Chart tab currency choices. Optional: not written unless the user adds it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_currencies: Option<Vec<String>>,
    /// Keys we do not know about survive a load/save cycle untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            watchlist_ids: ["bitcoin", "ethereum", "cardano", "solana", "dogecoin", "tron"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_vs_currency: "usd".into(),
            default_rank_top_n: 20,
            default_download_days: 30,
            price_tab_default_asset_id: "bitcoin".into(),
            price_tab_default_currency: "usd".into(),
            converter_tab_default_amount: "1".into(),
            converter_tab_default_from_asset: "bitcoin".into(),
            converter_tab_default_to_currency: "eur".into(),
            download_tab_default_asset_id: "bitcoin".into(),
            download_tab_default_file_format: "CSV".into(),
            common_currencies: None,
            extra: Map::new(),
        }
    }
}

/// Result of asking for an asset to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchlistEdit {
    Added(String),
    AlreadyPresent(String),
}

/// Owns the settings record and the file it lives in. UI thread only.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Wraps an in-memory record without touching the disk.
    pub fn new(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Loads `path`, creating it from defaults when missing.
    ///
    /// Missing keys are backfilled and the file rewritten. An unparsable file, or one whose
    /// values have the wrong types, is replaced wholesale by the defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();

        let (settings, rewrite) = match fs::read_to_string(&path) {
            Ok(text) => match parse_with_backfill(&text) {
                Ok((settings, backfilled)) => {
                    if backfilled {
                        log::warn!(
                            "Settings file {} was missing keys, backfilled from defaults",
                            path.display()
                        );
                    }
                    (settings, backfilled)
                }
                Err(e) => {
                    log::warn!(
                        "Settings file {} is corrupt ({}). Replacing it with defaults.",
                        path.display(),
                        e
                    );
                    (Settings::default(), true)
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "Settings file {} not found, creating it with defaults",
                    path.display()
                );
                (Settings::default(), true)
            }
            Err(e) => {
                log::warn!(
                    "Could not read settings file {} ({}). Using defaults.",
                    path.display(),
                    e
                );
                (Settings::default(), true)
            }
        };

        let store = Self { path, settings };
        if rewrite {
            store.save()?;
        }
        Ok(store)
    }

    /// Writes the full record, pretty-printed.
    pub fn save(&self) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(&self.settings)?;
        write_atomically(&self.path, &text)?;
        log::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.settings.watchlist_ids
    }

    /// Adds an asset and persists. A duplicate is a no-op that does not touch the file.
    /// If the save fails the in-memory list is restored.
    pub fn add_to_watchlist(&mut self, raw_id: &str) -> Result<WatchlistEdit, SettingsError> {
        let id = normalize_asset_id(raw_id).ok_or(SettingsError::EmptyAssetId)?;
        if self.settings.watchlist_ids.contains(&id) {
            return Ok(WatchlistEdit::AlreadyPresent(id));
        }

        let before = self.settings.watchlist_ids.clone();
        self.settings.watchlist_ids.insert(id.clone());
        self.persist_or_rollback(before)?;
        Ok(WatchlistEdit::Added(id))
    }

    /// Removes every listed asset that is present and persists once.
    /// Returns the ids actually removed; absent ids are ignored and do not trigger a save.
    pub fn remove_from_watchlist(&mut self, ids: &[String]) -> Result<Vec<String>, SettingsError> {
        let before = self.settings.watchlist_ids.clone();
        let removed: Vec<String> = ids
            .iter()
            .filter(|id| self.settings.watchlist_ids.remove(id))
            .cloned()
            .collect();

        if removed.is_empty() {
            return Ok(removed);
        }
        self.persist_or_rollback(before)?;
        Ok(removed)
    }

    fn persist_or_rollback(&mut self, before: Watchlist) -> Result<(), SettingsError> {
        if let Err(e) = self.save() {
            log::error!("Failed to persist watchlist change, rolling back: {}", e);
            self.settings.watchlist_ids = before;
            return Err(e);
        }
        Ok(())
    }
}

/// Parses a settings document, adding default values for any missing key.
/// Returns the record and whether anything was backfilled.
fn parse_with_backfill(text: &str) -> Result<(Settings, bool), SettingsError> {
    let mut value: Value = serde_json::from_str(text)?;
    let Some(object) = value.as_object_mut() else {
        return Err(SettingsError::Json(serde::de::Error::custom(
            "settings root is not a JSON object",
        )));
    };

    let mut backfilled = false;
    if let Value::Object(defaults) = serde_json::to_value(Settings::default())? {
        for (key, default) in defaults {
            if !object.contains_key(&key) {
                object.insert(key, default);
                backfilled = true;
            }
        }
    }

    let settings: Settings = serde_json::from_value(value)?;
    Ok((settings, backfilled))
}

fn write_atomically(path: &Path, text: &str) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    };
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let store = SettingsStore::load(&path).unwrap();

        assert_eq!(store.settings(), &Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut settings = Settings::default();
        settings.default_vs_currency = "eur".into();
        settings.default_rank_top_n = 50;
        settings.watchlist_ids = vec!["polkadot".to_string(), "bitcoin".to_string()].into();
        settings.common_currencies = Some(vec!["usd".into(), "chf".into()]);
        settings.extra.insert("theme".into(), Value::String("dark".into()));

        SettingsStore::new(&path, settings.clone()).save().unwrap();
        let loaded = SettingsStore::load(&path).unwrap();

        assert_eq!(loaded.settings(), &settings);
    }

    #[test]
    fn missing_keys_are_backfilled_and_file_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"watchlist_ids": ["tron"], "default_vs_currency": "gbp"}"#).unwrap();

        let store = SettingsStore::load(&path).unwrap();

        assert_eq!(store.watchlist().ids(), ["tron"]);
        assert_eq!(store.settings().default_vs_currency, "gbp");
        assert_eq!(store.settings().default_rank_top_n, 20);

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["default_download_days"], 30);
        assert_eq!(on_disk["default_vs_currency"], "gbp");
    }

    #[test]
    fn loaded_watchlist_is_lowercased_and_deduplicated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"watchlist_ids": ["Bitcoin", "bitcoin", "Tron"]}"#).unwrap();

        let mut store = SettingsStore::load(&path).unwrap();
        assert_eq!(store.watchlist().ids(), ["bitcoin", "tron"]);

        let removed = store.remove_from_watchlist(&["bitcoin".to_string()]).unwrap();
        assert_eq!(removed, ["bitcoin"]);
        let reloaded = SettingsStore::load(&path).unwrap();
        assert_eq!(reloaded.watchlist().ids(), ["tron"]);
    }

    #[test]
    fn corrupt_file_is_replaced_by_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::load(&path).unwrap();

        assert_eq!(store.settings(), &Settings::default());
        let reloaded = SettingsStore::load(&path).unwrap();
        assert_eq!(reloaded.settings(), &Settings::default());
    }

    #[test]
    fn wrongly_typed_values_count_as_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_rank_top_n": "lots"}"#).unwrap();

        let store = SettingsStore::load(&path).unwrap();
        assert_eq!(store.settings().default_rank_top_n, 20);
    }

    #[test]
    fn adding_an_existing_asset_leaves_the_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut store = SettingsStore::load(&path).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let edit = store.add_to_watchlist("Bitcoin").unwrap();

        assert_eq!(edit, WatchlistEdit::AlreadyPresent("bitcoin".into()));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(store.watchlist().len(), 6);
    }

    #[test]
    fn adding_a_new_asset_persists_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut store = SettingsStore::load(&path).unwrap();

        let edit = store.add_to_watchlist(" Polkadot ").unwrap();

        assert_eq!(edit, WatchlistEdit::Added("polkadot".into()));
        let reloaded = SettingsStore::load(&path).unwrap();
        assert_eq!(reloaded.watchlist().ids().last().map(String::as_str), Some("polkadot"));
    }

    #[test]
    fn removing_an_absent_asset_changes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut store = SettingsStore::load(&path).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let removed = store.remove_from_watchlist(&["not-a-coin".to_string()]).unwrap();

        assert!(removed.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn removing_present_assets_persists_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut store = SettingsStore::load(&path).unwrap();

        let removed = store
            .remove_from_watchlist(&["tron".to_string(), "solana".to_string(), "nope".to_string()])
            .unwrap();

        assert_eq!(removed, ["tron", "solana"]);
        let reloaded = SettingsStore::load(&path).unwrap();
        assert_eq!(
            reloaded.watchlist().ids(),
            ["bitcoin", "ethereum", "cardano", "dogecoin"]
        );
    }

    #[test]
    fn failed_save_rolls_back_add_and_remove() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("config.json");
        let mut store = SettingsStore::new(&path, Settings::default());

        assert!(store.add_to_watchlist("polkadot").is_err());
        assert!(!store.watchlist().contains("polkadot"));

        assert!(store.remove_from_watchlist(&["bitcoin".to_string()]).is_err());
        assert!(store.watchlist().contains("bitcoin"));
        assert_eq!(store.watchlist().len(), 6);
    }

    #[test]
    fn empty_asset_id_is_rejected() {
        let mut store = SettingsStore::new("unused.json", Settings::default());
        assert!(matches!(
            store.add_to_watchlist("   "),
            Err(SettingsError::EmptyAssetId)
        ));
    }
}
