//! User settings
//!
//! Manages user preferences: the worksheet location, currency symbol, the
//! category list offered by the CLI, and the store timeout used by remote
//! record store adapters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::CustosPaths;
use crate::error::LedgerError;

/// User settings for the cost ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format) for display
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Categories offered when registering a cost
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Override for the worksheet location; `None` uses the default path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worksheet_path: Option<PathBuf>,

    /// Timeout in seconds for record store round-trips
    ///
    /// Honored by remote store adapters; the local worksheet file does
    /// synchronous I/O and ignores it.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_store_timeout() -> u64 {
    30
}

fn default_categories() -> Vec<String> {
    [
        "Materiais de Construção",
        "Ferramentas",
        "Mão de Obra",
        "Transporte",
        "Equipamentos",
        "Limpeza",
        "Pintura",
        "Elétrica",
        "Hidráulica",
        "Outros",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            categories: default_categories(),
            worksheet_path: None,
            store_timeout_secs: default_store_timeout(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if absent
    pub fn load_or_create(paths: &CustosPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CustosPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the worksheet path, falling back to the default location
    pub fn worksheet_path(&self, paths: &CustosPaths) -> PathBuf {
        self.worksheet_path
            .clone()
            .unwrap_or_else(|| paths.worksheet_file())
    }
}
