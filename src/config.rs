use crate::error::{NutriRootError, Result};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Local JSON/YAML export of the crop catalog. Takes precedence over `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            api_key: None,
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("path", &self.path)
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_attempts", &self.max_attempts)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// How many crop matches the crop finder lists.
    #[serde(default = "default_top_matches")]
    pub top_matches: usize,
    /// Label used in messages when a sample names no crop.
    #[serde(default = "default_crop_label")]
    pub default_crop: String,
}

fn default_top_matches() -> usize {
    9
}

fn default_crop_label() -> String {
    "your crop".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_matches: default_top_matches(),
            default_crop: default_crop_label(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from the first standard location
    /// that exists. With no explicit path and no file found, defaults are used.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(NutriRootError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.clone()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| NutriRootError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse YAML after `${VAR}` substitution.
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| NutriRootError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.display.top_matches == 0 {
            return Err(NutriRootError::Config(
                "display.top_matches must be at least 1".into(),
            ));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(NutriRootError::Config(
                "catalog.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Then the XDG config directory
        let xdg_config = dirs::config_dir()?.join("nutriroot").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path().is_some(),
        }
    }

    /// Default path for writing new config files (~/.config/nutriroot/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NutriRootError::Config("Cannot determine config directory".into()))?
            .join("nutriroot");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up NutriRoot!");
        println!();

        // --- Crop catalog ---
        println!("Crop catalog (give a local file, or leave blank to use a URL)");
        let path: String = Input::new()
            .with_prompt("  Catalog file")
            .default("data/crops.yaml".into())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| NutriRootError::Config(format!("Input error: {}", e)))?;

        let (url, api_key) = if path.is_empty() {
            let url: String = Input::new()
                .with_prompt("  Catalog URL")
                .interact_text()
                .map_err(|e| NutriRootError::Config(format!("Input error: {}", e)))?;

            let api_key: String = Password::new()
                .with_prompt("  API key (blank for none)")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| NutriRootError::Config(format!("Input error: {}", e)))?;

            (Some(url), Some(api_key).filter(|k| !k.is_empty()))
        } else {
            (None, None)
        };

        println!();

        // --- Display ---
        println!("Display");
        let top_matches: usize = Input::new()
            .with_prompt("  Crop matches to list")
            .default(default_top_matches())
            .interact_text()
            .map_err(|e| NutriRootError::Config(format!("Input error: {}", e)))?;

        let default_crop: String = Input::new()
            .with_prompt("  Default crop label")
            .default(default_crop_label())
            .interact_text()
            .map_err(|e| NutriRootError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            catalog: CatalogConfig {
                path: Some(PathBuf::from(path)).filter(|p| !p.as_os_str().is_empty()),
                url,
                api_key,
                ..Default::default()
            },
            display: DisplayConfig {
                top_matches,
                default_crop,
            },
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| NutriRootError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# NutriRoot Configuration\n# Generated by `nutriroot init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
