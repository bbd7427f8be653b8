//! Credential resolution from CLI overrides and a `KEY=value` config file.

use crate::error::{DdnsError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Config file key holding the Cloudflare API token.
pub const API_KEY: &str = "API_KEY";

/// Config file key holding the zone identifier.
pub const ZONE: &str = "ZONE";

/// Parsed `KEY=value` config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    values: HashMap<String, String>,
}

impl ConfigFile {
    /// Load a config file. Comments, blank lines and quoted values are
    /// accepted; the process environment is left alone.
    pub fn load_from(path: &Path) -> Result<Self> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            DdnsError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                DdnsError::Config(format!("cannot parse {}: {}", path.display(), e))
            })?;
            values.insert(key, value);
        }

        tracing::debug!("Loaded {} keys from {}", values.len(), path.display());
        Ok(Self { values })
    }

    /// Look up a key. A key present with an empty value yields `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// API token and zone for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    zone_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, zone_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            zone_id: zone_id.into(),
        }
    }

    /// Resolve credentials; CLI values win over the config file.
    ///
    /// The file is always read, so an unreadable path fails even when both
    /// overrides are supplied.
    pub fn resolve(
        api_key: Option<String>,
        zone_id: Option<String>,
        config_path: &Path,
    ) -> Result<Self> {
        let file = ConfigFile::load_from(config_path)?;
        Self::merge(api_key, zone_id, &file)
    }

    /// Merge CLI overrides with an already loaded config file.
    pub fn merge(
        api_key: Option<String>,
        zone_id: Option<String>,
        file: &ConfigFile,
    ) -> Result<Self> {
        let api_key = pick(api_key, file, API_KEY)?;
        let zone_id = pick(zone_id, file, ZONE)?;
        Ok(Self { api_key, zone_id })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

fn pick(cli: Option<String>, file: &ConfigFile, key: &str) -> Result<String> {
    if let Some(value) = cli {
        return Ok(value);
    }
    file.get(key).map(str::to_string).ok_or_else(|| {
        DdnsError::Config(format!("{} not given on the command line or in config", key))
    })
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API Key: {}\nZone: {}", self.masked_api_key(), self.zone_id)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.masked_api_key())
            .field("zone_id", &self.zone_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cf.env");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_values_from_file() {
        let (_dir, path) = write_config("API_KEY=abc\nZONE=zone1\n");
        let creds = Credentials::resolve(None, None, &path).unwrap();
        assert_eq!(creds.api_key(), "abc");
        assert_eq!(creds.zone_id(), "zone1");
    }

    #[test]
    fn test_cli_overrides_win() {
        let (_dir, path) = write_config("API_KEY=abc\nZONE=zone1\n");
        let creds = Credentials::resolve(
            Some("cli-key".to_string()),
            Some("cli-zone".to_string()),
            &path,
        )
        .unwrap();
        assert_eq!(creds.api_key(), "cli-key");
        assert_eq!(creds.zone_id(), "cli-zone");
    }

    #[test]
    fn test_partial_override() {
        let (_dir, path) = write_config("API_KEY=abc\nZONE=zone1\n");
        let creds = Credentials::resolve(None, Some("cli-zone".to_string()), &path).unwrap();
        assert_eq!(creds.api_key(), "abc");
        assert_eq!(creds.zone_id(), "cli-zone");
    }

    #[test]
    fn test_missing_zone_is_config_error() {
        let (_dir, path) = write_config("API_KEY=abc\n");
        let err = Credentials::resolve(None, None, &path).unwrap_err();
        assert!(matches!(err, DdnsError::Config(msg) if msg.contains("ZONE")));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let (_dir, path) = write_config("ZONE=zone1\n");
        let err = Credentials::resolve(None, None, &path).unwrap_err();
        assert!(matches!(err, DdnsError::Config(msg) if msg.contains("API_KEY")));
    }

    #[test]
    fn test_empty_override_still_wins() {
        let (_dir, path) = write_config("API_KEY=abc\nZONE=zone1\n");
        let creds = Credentials::resolve(None, Some(String::new()), &path).unwrap();
        assert_eq!(creds.zone_id(), "");
        assert_eq!(creds.api_key(), "abc");
    }

    #[test]
    fn test_empty_file_value_is_supplied() {
        let (_dir, path) = write_config("API_KEY=\nZONE=zone1\n");
        let creds = Credentials::resolve(None, None, &path).unwrap();
        assert_eq!(creds.api_key(), "");
        assert_eq!(creds.zone_id(), "zone1");
    }

    #[test]
    fn test_unreadable_file_fails_even_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.env");
        let err = Credentials::resolve(
            Some("cli-key".to_string()),
            Some("cli-zone".to_string()),
            &path,
        )
        .unwrap_err();
        assert!(matches!(err, DdnsError::Config(_)));
    }

    #[test]
    fn test_comments_and_quotes() {
        let (_dir, path) =
            write_config("# cloudflare\n\nAPI_KEY=\"quoted key\"\nZONE=zone1\nOTHER=x\n");
        let creds = Credentials::resolve(None, None, &path).unwrap();
        assert_eq!(creds.api_key(), "quoted key");
        assert_eq!(creds.zone_id(), "zone1");
    }

    #[test]
    fn test_display_masks_key() {
        let creds = Credentials::new("supersecret1234", "zone1");
        assert_eq!(creds.to_string(), "API Key: ***********1234\nZone: zone1");
        assert!(!format!("{:?}", creds).contains("supersecret"));
    }

    #[test]
    fn test_short_key_fully_masked() {
        let creds = Credentials::new("abc", "zone1");
        assert_eq!(creds.masked_api_key(), "***");
    }
}
