// Core library for the VNC server settings page.
// Everything here is independent of the windowing front end.

pub mod config;
pub mod controls;
pub mod crypt;
pub mod form;
pub mod password;
pub mod prompt;

pub use config::{ConfigError, ServerConfig};
pub use form::{ChangeListener, FieldId, ServerSettingsForm, ToggleId, ValidationError};
pub use password::{PasswordRole, PasswordSlot};
pub use prompt::{Prompt, PromptResult};
