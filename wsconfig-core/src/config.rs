//! Persisted VNC server settings.

use crate::crypt::PASSWORD_LEN;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Smallest screen polling interval, in milliseconds.
pub const MINIMAL_POLLING_INTERVAL: u32 = 30;
/// Smallest local input priority inactivity timeout, in seconds.
pub const MINIMAL_LOCAL_INPUT_PRIORITY_TIMEOUT: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    rfb_port: u16,
    http_port: u16,
    /// Milliseconds.
    polling_interval: u32,
    accept_rfb_connections: bool,
    accept_http_connections: bool,
    use_authentication: bool,
    #[serde(with = "hex_password", skip_serializing_if = "Option::is_none")]
    primary_password: Option<[u8; PASSWORD_LEN]>,
    #[serde(with = "hex_password", skip_serializing_if = "Option::is_none")]
    read_only_password: Option<[u8; PASSWORD_LEN]>,
    enable_file_transfers: bool,
    remove_wallpaper: bool,
    block_local_input: bool,
    block_remote_input: bool,
    local_input_priority: bool,
    /// Seconds.
    local_input_priority_timeout: u32,
    mirror_allowed: bool,
    d3d_allowed: bool,
    show_tray_icon: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rfb_port: 5900,
            http_port: 5800,
            polling_interval: 1000,
            accept_rfb_connections: true,
            accept_http_connections: true,
            use_authentication: true,
            primary_password: None,
            read_only_password: None,
            enable_file_transfers: true,
            remove_wallpaper: true,
            block_local_input: false,
            block_remote_input: false,
            local_input_priority: false,
            local_input_priority_timeout: 3,
            mirror_allowed: true,
            d3d_allowed: true,
            show_tray_icon: true,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        debug!("Server config loaded from {}", path.display());
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("Server config {} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Writes pretty-printed JSON, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Server config saved to {}", path.display());
        Ok(())
    }

    pub fn has_primary_password(&self) -> bool {
        self.primary_password.is_some()
    }

    pub fn primary_password(&self) -> Option<[u8; PASSWORD_LEN]> {
        self.primary_password
    }

    pub fn set_primary_password(&mut self, crypted: &[u8; PASSWORD_LEN]) {
        self.primary_password = Some(*crypted);
    }

    pub fn delete_primary_password(&mut self) {
        self.primary_password = None;
    }

    pub fn has_read_only_password(&self) -> bool {
        self.read_only_password.is_some()
    }

    pub fn read_only_password(&self) -> Option<[u8; PASSWORD_LEN]> {
        self.read_only_password
    }

    pub fn set_read_only_password(&mut self, crypted: &[u8; PASSWORD_LEN]) {
        self.read_only_password = Some(*crypted);
    }

    pub fn delete_read_only_password(&mut self) {
        self.read_only_password = None;
    }

    pub fn rfb_port(&self) -> u16 {
        self.rfb_port
    }

    pub fn set_rfb_port(&mut self, port: u16) {
        self.rfb_port = port;
    }

    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    pub fn set_http_port(&mut self, port: u16) {
        self.http_port = port;
    }

    pub fn polling_interval(&self) -> u32 {
        self.polling_interval
    }

    pub fn set_polling_interval(&mut self, millis: u32) {
        self.polling_interval = millis;
    }

    pub fn is_accepting_rfb_connections(&self) -> bool {
        self.accept_rfb_connections
    }

    pub fn accept_rfb_connections(&mut self, accept: bool) {
        self.accept_rfb_connections = accept;
    }

    pub fn is_accepting_http_connections(&self) -> bool {
        self.accept_http_connections
    }

    pub fn accept_http_connections(&mut self, accept: bool) {
        self.accept_http_connections = accept;
    }

    pub fn is_using_authentication(&self) -> bool {
        self.use_authentication
    }

    pub fn use_authentication(&mut self, enabled: bool) {
        self.use_authentication = enabled;
    }

    pub fn is_file_transfers_enabled(&self) -> bool {
        self.enable_file_transfers
    }

    pub fn enable_file_transfers(&mut self, enabled: bool) {
        self.enable_file_transfers = enabled;
    }

    pub fn is_removing_wallpaper_enabled(&self) -> bool {
        self.remove_wallpaper
    }

    pub fn enable_removing_wallpaper(&mut self, enabled: bool) {
        self.remove_wallpaper = enabled;
    }

    pub fn is_blocking_local_input(&self) -> bool {
        self.block_local_input
    }

    pub fn block_local_input(&mut self, block: bool) {
        self.block_local_input = block;
    }

    pub fn is_blocking_remote_input(&self) -> bool {
        self.block_remote_input
    }

    pub fn block_remote_input(&mut self, block: bool) {
        self.block_remote_input = block;
    }

    pub fn is_local_input_priority_enabled(&self) -> bool {
        self.local_input_priority
    }

    pub fn set_local_input_priority(&mut self, enabled: bool) {
        self.local_input_priority = enabled;
    }

    pub fn local_input_priority_timeout(&self) -> u32 {
        self.local_input_priority_timeout
    }

    pub fn set_local_input_priority_timeout(&mut self, secs: u32) {
        self.local_input_priority_timeout = secs;
    }

    pub fn is_mirror_allowed(&self) -> bool {
        self.mirror_allowed
    }

    pub fn set_mirror_allowing(&mut self, allowed: bool) {
        self.mirror_allowed = allowed;
    }

    pub fn is_d3d_allowed(&self) -> bool {
        self.d3d_allowed
    }

    pub fn set_d3d_allowing(&mut self, allowed: bool) {
        self.d3d_allowed = allowed;
    }

    pub fn show_tray_icon(&self) -> bool {
        self.show_tray_icon
    }

    pub fn set_show_tray_icon(&mut self, show: bool) {
        self.show_tray_icon = show;
    }
}

/// Crypted passwords are stored as 16 hex digits.
mod hex_password {
    use crate::crypt::PASSWORD_LEN;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<[u8; PASSWORD_LEN]>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<[u8; PASSWORD_LEN]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        match text.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(digits) => {
                let mut bytes = [0u8; PASSWORD_LEN];
                hex::decode_to_slice(digits, &mut bytes).map_err(de::Error::custom)?;
                Ok(Some(bytes))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.rfb_port(), 5900);
        assert_eq!(config.http_port(), 5800);
        assert!(config.is_using_authentication());
        assert!(!config.has_primary_password());
        assert!(!config.has_read_only_password());
    }

    #[test]
    fn passwords_stored_as_hex() {
        let mut config = ServerConfig::default();
        config.set_primary_password(&[0xde, 0xad, 0xbe, 0xef, 0, 1, 2, 3]);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["primary_password"], "deadbeef00010203");
        assert!(json.get("read_only_password").is_none());

        let loaded: ServerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let loaded: ServerConfig =
            serde_json::from_str(r#"{ "rfb_port": 5901, "read_only_password": "" }"#).unwrap();
        assert_eq!(loaded.rfb_port(), 5901);
        assert_eq!(loaded.polling_interval(), 1000);
        assert!(!loaded.has_read_only_password());
    }

    #[test]
    fn malformed_password_rejected() {
        let result = serde_json::from_str::<ServerConfig>(r#"{ "primary_password": "abc" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn delete_password() {
        let mut config = ServerConfig::default();
        config.set_read_only_password(&[7; 8]);
        assert_eq!(config.read_only_password(), Some([7; 8]));
        config.delete_read_only_password();
        assert!(!config.has_read_only_password());
    }
}
