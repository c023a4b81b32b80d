use serde::{Deserialize, Serialize};

/// Ordered list of watched asset ids. No id appears twice.
///
/// The settings file itself does not enforce either rule, so ids are normalized and
/// duplicates dropped (first occurrence wins) when a list is deserialized.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Watchlist {
    ids: Vec<String>,
}

/// Lower-cased, trimmed asset id, or None if nothing is left.
pub fn normalize_asset_id(raw: &str) -> Option<String> {
    let id = raw.trim().to_lowercase();
    (!id.is_empty()).then_some(id)
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Appends `id` unless it is already present. Returns true if the list changed.
    pub fn insert(&mut self, id: String) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id` if present. Returns true if the list changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<String>> for Watchlist {
    fn from(raw: Vec<String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<Watchlist> for Vec<String> {
    fn from(list: Watchlist) -> Self {
        list.ids
    }
}

impl FromIterator<String> for Watchlist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut list = Watchlist::new();
        for id in iter.into_iter().filter_map(|raw| normalize_asset_id(&raw)) {
            list.insert(id);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_rejects_duplicates() {
        let mut list = Watchlist::new();
        assert!(list.insert("bitcoin".into()));
        assert!(list.insert("ethereum".into()));
        assert!(!list.insert("bitcoin".into()));
        assert_eq!(list.ids(), ["bitcoin", "ethereum"]);
    }

    #[test]
    fn remove_missing_is_a_no_op() {
        let mut list: Watchlist = vec!["bitcoin".to_string()].into();
        assert!(!list.remove("dogecoin"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn deserializing_drops_duplicates() {
        let list: Watchlist = serde_json::from_str(r#"["tron","bitcoin","tron"]"#).unwrap();
        assert_eq!(list.ids(), ["tron", "bitcoin"]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["tron","bitcoin"]"#);
    }

    #[test]
    fn deserializing_normalizes_before_deduplicating() {
        let list: Watchlist =
            serde_json::from_str(r#"["Bitcoin"," bitcoin ","","ETHEREUM"]"#).unwrap();
        assert_eq!(list.ids(), ["bitcoin", "ethereum"]);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_asset_id("  Bitcoin "), Some("bitcoin".to_string()));
        assert_eq!(normalize_asset_id("   "), None);
    }
}
