use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FmsError, Result};

fn default_sheet_name() -> String {
    "FMS".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the remote scripting endpoint fronting the spreadsheet.
    #[serde(default)]
    pub endpoint_url: String,
    /// Name of the sheet used as the system of record.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    /// Destination folder identifier for file uploads.
    #[serde(default)]
    pub upload_folder: String,
    /// Login identifier used for the credential check.
    #[serde(default)]
    pub identifier: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            sheet_name: default_sheet_name(),
            upload_folder: String::new(),
            identifier: String::new(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fmsdesk")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| FmsError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

/// Endpoint URL, or a settings error telling the operator to run `init`.
pub fn require_endpoint(settings: &Settings) -> Result<&str> {
    if settings.endpoint_url.is_empty() {
        return Err(FmsError::Settings(
            "no ledger endpoint configured; run `fmsdesk init` first".to_string(),
        ));
    }
    Ok(&settings.endpoint_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            endpoint_url: "https://example.org/exec".to_string(),
            sheet_name: "FMS".to_string(),
            upload_folder: "folder-1".to_string(),
            identifier: "clerk@hospital.example".to_string(),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.endpoint_url, "https://example.org/exec");
        assert_eq!(loaded.identifier, "clerk@hospital.example");
        assert_eq!(loaded.upload_folder, "folder-1");
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.endpoint_url.is_empty());
        assert_eq!(s.sheet_name, "FMS");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"endpoint_url": "https://example.org/exec"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.sheet_name, "FMS");
        assert!(s.identifier.is_empty());
    }

    #[test]
    fn test_require_endpoint() {
        let s = Settings::default();
        assert!(require_endpoint(&s).is_err());
        let s = Settings {
            endpoint_url: "https://example.org/exec".to_string(),
            ..Settings::default()
        };
        assert_eq!(require_endpoint(&s).unwrap(), "https://example.org/exec");
    }
}
