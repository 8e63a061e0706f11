use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::locale::LocaleCode;

pub const CONFIG_FILE_NAME: &str = ".i18nbakerc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Defaults to the first entry of `locales`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_import_source")]
    pub import_source: String,
    /// Only bundle files under this subdirectory are localized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,
    #[serde(default = "default_add_missing")]
    pub add_missing: bool,
    #[serde(default)]
    pub tabs: bool,
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_locales_dir() -> String {
    "i18n".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_import_source() -> String {
    "i18n-bake".to_string()
}

fn default_add_missing() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            default_locale: None,
            locales_dir: default_locales_dir(),
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: default_ignores(),
            import_source: default_import_source(),
            assets_dir: None,
            add_missing: default_add_missing(),
            tabs: false,
        }
    }
}

impl Config {
    pub fn default_locale(&self) -> &str {
        self.default_locale
            .as_deref()
            .or(self.locales.first().map(String::as_str))
            .unwrap_or("en")
    }

    /// Validate configuration values.
    ///
    /// Rejects an empty or malformed locale list, a default locale that is not
    /// configured, and invalid glob patterns in `ignores` or `includes`.
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            bail!("'locales' must list at least one locale");
        }
        for locale in &self.locales {
            LocaleCode::parse(locale).context("Invalid entry in 'locales'")?;
        }
        if let Some(default_locale) = &self.default_locale
            && !self.locales.contains(default_locale)
        {
            bail!(
                "'defaultLocale' \"{}\" is not one of the configured locales",
                default_locale
            );
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
