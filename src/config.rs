use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "wsconfig.json";

/// Preferences of the settings window itself, not of the VNC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Where the server settings are read from and written to.
    #[serde(default = "default_server_config_path")]
    pub server_config_path: PathBuf,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_server_config_path() -> PathBuf {
    PathBuf::from("config").join("server.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            server_config_path: default_server_config_path(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(config) => {
                        debug!("App config loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => warn!("Failed to parse {}: {}, using defaults", path.display(), e),
                },
                Err(e) => warn!("Failed to read {}: {}, using defaults", path.display(), e),
            }
        } else {
            debug!("App config {} not found, creating default", path.display());
        }

        let default_config = AppConfig::default();
        default_config.save_to(path);
        default_config
    }

    pub fn save(&self) {
        self.save_to(Path::new(CONFIG_FILE));
    }

    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => debug!("App config saved to {}", path.display()),
                Err(e) => warn!("Failed to save app config to {}: {}", path.display(), e),
            },
            Err(e) => warn!("Failed to serialize app config: {}", e),
        }
    }
}
