//! App Configuration
//!
//! Read once at startup from a JSON block embedded in the page:
//!
//! ```html
//! <script id="songlist-config" type="application/json">
//!   { "supabase_url": "https://xyz.supabase.co", "anon_key": "..." }
//! </script>
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// DOM id of the embedded config block
pub const CONFIG_ELEMENT_ID: &str = "songlist-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub supabase_url: String,
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    /// Server-side procedure applying a batch of order updates
    #[serde(default = "default_reorder_rpc")]
    pub reorder_rpc: String,
    /// Entrance animation delay per row position
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u32,
    /// How long a failure stays on screen
    #[serde(default = "default_error_timeout_ms")]
    pub error_timeout_ms: u32,
    /// Records kept by the in-memory log buffer
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_table() -> String {
    "songs".to_string()
}

fn default_reorder_rpc() -> String {
    "update_song_order".to_string()
}

fn default_stagger_ms() -> u32 {
    80
}

fn default_error_timeout_ms() -> u32 {
    4000
}

fn default_log_capacity() -> usize {
    200
}

impl AppConfig {
    /// Parse and validate a config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = serde_json::from_str(json)?;
        config.supabase_url = config.supabase_url.trim().trim_end_matches('/').to_string();
        config.anon_key = config.anon_key.trim().to_string();

        if config.supabase_url.is_empty() {
            return Err(ConfigError::Empty("supabase_url"));
        }
        if config.anon_key.is_empty() {
            return Err(ConfigError::Empty("anon_key"));
        }
        if config.table.trim().is_empty() {
            return Err(ConfigError::Empty("table"));
        }
        if config.reorder_rpc.trim().is_empty() {
            return Err(ConfigError::Empty("reorder_rpc"));
        }
        Ok(config)
    }

    /// Load from the page's embedded config block
    pub fn from_document() -> Result<Self, ConfigError> {
        let text = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .ok_or_else(|| ConfigError::Missing(CONFIG_ELEMENT_ID.to_string()))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_json(
            r#"{"supabase_url": "https://abc.supabase.co/", "anon_key": "key"}"#,
        )
        .unwrap();
        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.table, "songs");
        assert_eq!(config.reorder_rpc, "update_song_order");
        assert_eq!(config.stagger_ms, 80);
        assert_eq!(config.error_timeout_ms, 4000);
        assert_eq!(config.log_capacity, 200);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_json(
            r#"{"supabase_url": "http://localhost:54321", "anon_key": "k",
                "table": "tracks", "reorder_rpc": "reorder_tracks", "stagger_ms": 0}"#,
        )
        .unwrap();
        assert_eq!(config.table, "tracks");
        assert_eq!(config.reorder_rpc, "reorder_tracks");
        assert_eq!(config.stagger_ms, 0);
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = AppConfig::from_json(r#"{"supabase_url": "https://x", "anon_key": "  "}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Empty("anon_key")));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = AppConfig::from_json(r#"{"anon_key": "k"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
