//! Layered runtime settings.
//!
//! Resolution order, later layers winning: built-in defaults, the TOML config file (cargo feature
//! `config`), `CBSBOARD_*` environment variables, then command-line flags applied by `main`.

use crate::error::{DashError, Result};
use crate::filter::FilterCategory;
use crate::render::ui::ThemeChoice;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default report document location, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "data.json";
/// Quiescence window for search input.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Detail page path, relative to the data document's base.
pub const DEFAULT_DETAIL_TEMPLATE: &str = "stocks/{symbol}.html";

pub const ENV_SOURCE: &str = "CBSBOARD_SOURCE";
pub const ENV_DEBOUNCE_MS: &str = "CBSBOARD_DEBOUNCE_MS";

/// Effective settings for one dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Path or http(s) URL of the report document.
    pub source: String,
    pub debounce: Duration,
    /// Must contain `{symbol}`.
    pub detail_template: String,
    /// Where detail pages live. Defaults to the directory (or URL) containing `source`.
    pub detail_base: Option<String>,
    pub theme: ThemeChoice,
    pub initial_filter: FilterCategory,
    pub initial_search: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            detail_template: DEFAULT_DETAIL_TEMPLATE.to_string(),
            detail_base: None,
            theme: ThemeChoice::default(),
            initial_filter: FilterCategory::All,
            initial_search: String::new(),
        }
    }
}

/// On-disk representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub source: Option<String>,
    pub debounce_ms: Option<u64>,
    pub detail_template: Option<String>,
    pub detail_base: Option<String>,
    pub theme: Option<String>,
}

impl Settings {
    /// Defaults, then the config file, then the environment.
    ///
    /// An explicitly named config file must exist; the per-user default file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`Settings::load`], with environment lookups going through `lookup`.
    pub fn load_with_env<F>(config_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(file) = load_file_settings(config_path)? {
            settings.apply_file(file)?;
        }
        settings.apply_env(lookup)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_file(&mut self, file: FileSettings) -> Result<()> {
        if let Some(source) = file.source {
            self.source = source;
        }
        if let Some(ms) = file.debounce_ms {
            self.debounce = Duration::from_millis(ms);
        }
        if let Some(template) = file.detail_template {
            self.detail_template = template;
        }
        if file.detail_base.is_some() {
            self.detail_base = file.detail_base;
        }
        if let Some(theme) = file.theme {
            self.theme = theme.parse()?;
        }
        Ok(())
    }

    /// Apply `CBSBOARD_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(ENV_SOURCE).filter(|s| !s.trim().is_empty()) {
            self.source = source;
        }
        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|_| {
                DashError::config(format!("{} must be an integer, got '{}'", ENV_DEBOUNCE_MS, raw))
            })?;
            self.debounce = Duration::from_millis(ms);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(DashError::config("source must not be empty"));
        }
        if !self.detail_template.contains("{symbol}") {
            return Err(DashError::config(format!(
                "detail_template '{}' has no {{symbol}} placeholder",
                self.detail_template
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
fn load_file_settings(explicit: Option<&Path>) -> Result<Option<FileSettings>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match dirs::config_dir() {
            Some(dir) => dir.join("cbsboard").join("config.toml"),
            None => return Ok(None),
        },
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(None);
        }
        Err(err) => {
            return Err(DashError::config(format!(
                "cannot read {}: {}",
                path.display(),
                err
            )));
        }
    };

    log::debug!("loading settings from {}", path.display());
    parse_file_settings(&raw)
        .map(Some)
        .map_err(|err| DashError::config(format!("{}: {}", path.display(), err)))
}

#[cfg(not(feature = "config"))]
fn load_file_settings(explicit: Option<&Path>) -> Result<Option<FileSettings>> {
    match explicit {
        Some(path) => Err(DashError::config(format!(
            "cannot read {}: built without the `config` feature",
            path.display()
        ))),
        None => Ok(None),
    }
}

#[cfg(feature = "config")]
pub fn parse_file_settings(raw: &str) -> Result<FileSettings> {
    toml::from_str(raw).map_err(|err| DashError::config(err.to_string()))
}
