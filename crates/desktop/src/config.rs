//! Environment-driven configuration for the desktop shell.

use std::path::PathBuf;

use billforge_documents::DocumentOptions;
use billforge_invoicing::{DraftDefaults, Party};
use billforge_observability::LogFormat;

pub const ENV_DATA_DIR: &str = "BILLFORGE_DATA_DIR";
pub const ENV_LOG_FORMAT: &str = "BILLFORGE_LOG_FORMAT";
pub const ENV_COMPANY_NAME: &str = "BILLFORGE_COMPANY_NAME";
pub const ENV_FROM_NAME: &str = "BILLFORGE_FROM_NAME";
pub const ENV_FROM_ADDRESS: &str = "BILLFORGE_FROM_ADDRESS";
pub const ENV_FROM_STATE: &str = "BILLFORGE_FROM_STATE";
pub const ENV_DUE_DATE_PLACEHOLDER: &str = "BILLFORGE_DUE_DATE_PLACEHOLDER";

const DEFAULT_COMPANY_NAME: &str = "My Company";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    /// Directory holding `invoices.db`. `None` means the OS data directory.
    pub data_dir: Option<PathBuf>,
    pub log_format: LogFormat,
    pub draft_defaults: DraftDefaults,
    pub document_options: DocumentOptions,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_format: LogFormat::default(),
            draft_defaults: DraftDefaults {
                company_name: DEFAULT_COMPANY_NAME.to_string(),
                ..DraftDefaults::default()
            },
            document_options: DocumentOptions::default(),
        }
    }
}

impl DesktopConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset or blank variables keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.data_dir = get(ENV_DATA_DIR).map(PathBuf::from);

        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = raw.parse().unwrap_or_else(|err: String| {
                tracing::warn!(error = %err, "{ENV_LOG_FORMAT} invalid; using json");
                LogFormat::Json
            });
        }

        match get(ENV_COMPANY_NAME) {
            Some(name) => config.draft_defaults.company_name = name,
            None => tracing::info!("{ENV_COMPANY_NAME} not set; using \"{DEFAULT_COMPANY_NAME}\""),
        }

        config.draft_defaults.from = Party::new(
            get(ENV_FROM_NAME).unwrap_or_default(),
            get(ENV_FROM_ADDRESS).unwrap_or_default(),
            get(ENV_FROM_STATE).unwrap_or_default(),
        );

        if let Some(placeholder) = get(ENV_DUE_DATE_PLACEHOLDER) {
            config.document_options.due_date_placeholder = placeholder;
        }

        config
    }

    /// Location of the SQLite invoice store.
    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.join("invoices.db")),
            None => billforge_infra::kv_store::sqlite::default_db_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = DesktopConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DesktopConfig::default());
        assert_eq!(config.draft_defaults.company_name, "My Company");
        assert_eq!(config.document_options.due_date_placeholder, "2025-11-01");
    }

    #[test]
    fn variables_override_defaults() {
        let config = DesktopConfig::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/tmp/billforge"),
            (ENV_LOG_FORMAT, "pretty"),
            (ENV_COMPANY_NAME, "Acme Widgets"),
            (ENV_FROM_NAME, "Acme Widgets Ltd"),
            (ENV_FROM_STATE, "Lagos"),
            (ENV_DUE_DATE_PLACEHOLDER, "on receipt"),
        ]));

        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.draft_defaults.company_name, "Acme Widgets");
        assert_eq!(config.draft_defaults.from.state, "Lagos");
        assert_eq!(config.draft_defaults.from.address, "");
        assert_eq!(config.document_options.due_date_placeholder, "on receipt");
        assert_eq!(
            config.db_path().unwrap(),
            PathBuf::from("/tmp/billforge/invoices.db")
        );
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = DesktopConfig::from_lookup(lookup(&[
            (ENV_COMPANY_NAME, "   "),
            (ENV_LOG_FORMAT, "xml"),
        ]));
        assert_eq!(config.draft_defaults.company_name, "My Company");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
