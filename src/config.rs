use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{CbzError, CbzResult};

pub const CONFIG_ENV: &str = "CBZKIT_CONFIG";

/// Defaults read from a JSON settings file. Command-line flags win.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub preserve_names: bool,
    pub compression_level: Option<u32>,
    pub renumber: bool,
    pub excludes: Vec<String>,
}

impl Settings {
    pub fn parse(content: &str) -> CbzResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(CbzError::InvalidConfig(
                "settings must be a JSON object".to_string(),
            ));
        }

        let settings: Settings = serde_json::from_value(value)?;
        if let Some(level) = settings.compression_level {
            if level > 9 {
                return Err(CbzError::InvalidConfig(format!(
                    "compression_level must be 0-9, got {}",
                    level
                )));
            }
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> CbzResult<Self> {
        let content = fs::read_to_string(path)?;
        Settings::parse(&content)
    }

    /// `--config` first, then `CBZKIT_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&str>) -> CbzResult<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_string()),
            None => std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty()),
        };

        match path {
            Some(p) => {
                log::info!("Loading settings from {}", p);
                Settings::load(Path::new(&p))
            }
            None => Ok(Settings::default()),
        }
    }
}
