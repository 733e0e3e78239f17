//! The server settings page: cached control values, password slots,
//! validation and commit into [`ServerConfig`].

use crate::config::{ServerConfig, MINIMAL_LOCAL_INPUT_PRIORITY_TIMEOUT, MINIMAL_POLLING_INTERVAL};
use crate::controls::{TextField, Toggle};
use crate::password::{PasswordRole, PasswordSlot};
use crate::prompt::Prompt;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    RfbPort,
    HttpPort,
    PollingInterval,
    InactivityTimeout,
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldId::RfbPort => "Main server port",
            FieldId::HttpPort => "Web access port",
            FieldId::PollingInterval => "Screen polling interval",
            FieldId::InactivityTimeout => "Inactivity timeout",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleId {
    AcceptRfbConnections,
    AcceptHttpConnections,
    UseAuthentication,
    BlockLocalInput,
    BlockRemoteInput,
    LocalInputPriority,
    UseD3D,
    UseMirrorDriver,
    ShowTrayIcon,
    EnableFileTransfers,
    RemoveWallpaper,
}

/// Anything on the page the operator can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Field(FieldId),
    Toggle(ToggleId),
    Password(PasswordRole),
}

/// Where the current value of a control came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provenance {
    /// Populated from the server config and not touched since.
    #[default]
    Loaded,
    /// Changed by the operator.
    Edited,
}

/// Told whenever the operator changes something, so the owner can refresh
/// its Apply button.
pub trait ChangeListener {
    fn notify_changed(&mut self);
}

impl<F: FnMut()> ChangeListener for F {
    fn notify_changed(&mut self) {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", invalid_numeric_message(.0))]
    InvalidNumericField(FieldId),
    #[error("Web access port and main server port must be different.")]
    PortsConflict,
    #[error("Screen polling interval is too small (minimum is {min} ms).")]
    IntervalTooSmall { min: u32 },
    #[error("Inactivity timeout is too small (minimum is {min} s).")]
    TimeoutTooSmall { min: u32 },
    #[error("Authentication is enabled but no password is set. Set at least one password.")]
    AuthenticationRequiresPassword,
}

fn invalid_numeric_message(field: &FieldId) -> String {
    match field {
        FieldId::RfbPort | FieldId::HttpPort => {
            format!("{} must be a number between 1 and 65535.", field)
        }
        FieldId::PollingInterval | FieldId::InactivityTimeout => {
            format!("{} must be a non-negative whole number.", field)
        }
    }
}

impl ValidationError {
    /// The field the operator should be sent back to, if there is one.
    pub fn field(&self) -> Option<FieldId> {
        match self {
            ValidationError::InvalidNumericField(field) => Some(*field),
            ValidationError::PortsConflict => Some(FieldId::HttpPort),
            ValidationError::IntervalTooSmall { .. } => Some(FieldId::PollingInterval),
            ValidationError::TimeoutTooSmall { .. } => Some(FieldId::InactivityTimeout),
            ValidationError::AuthenticationRequiresPassword => None,
        }
    }

    /// Errors that must be acknowledged in a modal box rather than shown next
    /// to a field.
    pub fn is_blocking(&self) -> bool {
        matches!(self, ValidationError::AuthenticationRequiresPassword)
    }
}

/// Lower bounds applied by [`ServerSettingsForm::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLimits {
    pub min_polling_interval: u32,
    pub min_inactivity_timeout: u32,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            min_polling_interval: MINIMAL_POLLING_INTERVAL,
            min_inactivity_timeout: MINIMAL_LOCAL_INPUT_PRIORITY_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Numbers {
    rfb_port: u16,
    http_port: u16,
    polling_interval: u32,
    inactivity_timeout: u32,
}

fn parse_port(field: &TextField, id: FieldId) -> Result<u16, ValidationError> {
    field
        .text()
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|port| *port >= 1)
        .ok_or(ValidationError::InvalidNumericField(id))
}

fn parse_uint(field: &TextField, id: FieldId) -> Result<u32, ValidationError> {
    field
        .text()
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidNumericField(id))
}

pub struct ServerSettingsForm {
    limits: FormLimits,
    listener: Box<dyn ChangeListener>,

    rfb_port: TextField,
    http_port: TextField,
    polling_interval: TextField,
    inactivity_timeout: TextField,

    accept_rfb: Toggle,
    accept_http: Toggle,
    use_authentication: Toggle,
    block_local_input: Toggle,
    block_remote_input: Toggle,
    local_input_priority: Toggle,
    use_d3d: Toggle,
    use_mirror_driver: Toggle,
    show_tray_icon: Toggle,
    enable_file_transfers: Toggle,
    remove_wallpaper: Toggle,

    primary: PasswordSlot,
    view_only: PasswordSlot,

    provenance: HashMap<ControlId, Provenance>,
}

impl fmt::Debug for ServerSettingsForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettingsForm")
            .field("limits", &self.limits)
            .field("rfb_port", &self.rfb_port)
            .field("http_port", &self.http_port)
            .field("polling_interval", &self.polling_interval)
            .field("inactivity_timeout", &self.inactivity_timeout)
            .field("primary", &self.primary.has_password())
            .field("view_only", &self.view_only.has_password())
            .finish_non_exhaustive()
    }
}

impl ServerSettingsForm {
    pub fn new(listener: impl ChangeListener + 'static) -> Self {
        Self::with_limits(FormLimits::default(), listener)
    }

    pub fn with_limits(limits: FormLimits, listener: impl ChangeListener + 'static) -> Self {
        let mut form = Self {
            limits,
            listener: Box::new(listener),
            rfb_port: TextField::default(),
            http_port: TextField::default(),
            polling_interval: TextField::default(),
            inactivity_timeout: TextField::default(),
            accept_rfb: Toggle::default(),
            accept_http: Toggle::default(),
            use_authentication: Toggle::default(),
            block_local_input: Toggle::default(),
            block_remote_input: Toggle::default(),
            local_input_priority: Toggle::default(),
            use_d3d: Toggle::default(),
            use_mirror_driver: Toggle::default(),
            show_tray_icon: Toggle::default(),
            enable_file_transfers: Toggle::default(),
            remove_wallpaper: Toggle::default(),
            primary: PasswordSlot::new(PasswordRole::Primary),
            view_only: PasswordSlot::new(PasswordRole::ViewOnly),
            provenance: HashMap::new(),
        };
        form.derive_control_dependencies();
        form
    }

    pub fn limits(&self) -> FormLimits {
        self.limits
    }

    pub fn field(&self, id: FieldId) -> &TextField {
        match id {
            FieldId::RfbPort => &self.rfb_port,
            FieldId::HttpPort => &self.http_port,
            FieldId::PollingInterval => &self.polling_interval,
            FieldId::InactivityTimeout => &self.inactivity_timeout,
        }
    }

    fn field_mut(&mut self, id: FieldId) -> &mut TextField {
        match id {
            FieldId::RfbPort => &mut self.rfb_port,
            FieldId::HttpPort => &mut self.http_port,
            FieldId::PollingInterval => &mut self.polling_interval,
            FieldId::InactivityTimeout => &mut self.inactivity_timeout,
        }
    }

    pub fn toggle(&self, id: ToggleId) -> &Toggle {
        match id {
            ToggleId::AcceptRfbConnections => &self.accept_rfb,
            ToggleId::AcceptHttpConnections => &self.accept_http,
            ToggleId::UseAuthentication => &self.use_authentication,
            ToggleId::BlockLocalInput => &self.block_local_input,
            ToggleId::BlockRemoteInput => &self.block_remote_input,
            ToggleId::LocalInputPriority => &self.local_input_priority,
            ToggleId::UseD3D => &self.use_d3d,
            ToggleId::UseMirrorDriver => &self.use_mirror_driver,
            ToggleId::ShowTrayIcon => &self.show_tray_icon,
            ToggleId::EnableFileTransfers => &self.enable_file_transfers,
            ToggleId::RemoveWallpaper => &self.remove_wallpaper,
        }
    }

    fn toggle_mut(&mut self, id: ToggleId) -> &mut Toggle {
        match id {
            ToggleId::AcceptRfbConnections => &mut self.accept_rfb,
            ToggleId::AcceptHttpConnections => &mut self.accept_http,
            ToggleId::UseAuthentication => &mut self.use_authentication,
            ToggleId::BlockLocalInput => &mut self.block_local_input,
            ToggleId::BlockRemoteInput => &mut self.block_remote_input,
            ToggleId::LocalInputPriority => &mut self.local_input_priority,
            ToggleId::UseD3D => &mut self.use_d3d,
            ToggleId::UseMirrorDriver => &mut self.use_mirror_driver,
            ToggleId::ShowTrayIcon => &mut self.show_tray_icon,
            ToggleId::EnableFileTransfers => &mut self.enable_file_transfers,
            ToggleId::RemoveWallpaper => &mut self.remove_wallpaper,
        }
    }

    pub fn slot(&self, role: PasswordRole) -> &PasswordSlot {
        match role {
            PasswordRole::Primary => &self.primary,
            PasswordRole::ViewOnly => &self.view_only,
        }
    }

    fn slot_mut(&mut self, role: PasswordRole) -> &mut PasswordSlot {
        match role {
            PasswordRole::Primary => &mut self.primary,
            PasswordRole::ViewOnly => &mut self.view_only,
        }
    }

    pub fn provenance(&self, id: ControlId) -> Provenance {
        self.provenance.get(&id).copied().unwrap_or_default()
    }

    /// True when the operator edited anything since the last load or commit.
    pub fn has_changes(&self) -> bool {
        self.provenance.values().any(|p| *p == Provenance::Edited)
    }

    fn mark_edited(&mut self, id: ControlId) {
        self.provenance.insert(id, Provenance::Edited);
        self.listener.notify_changed();
    }

    /// Populates every control from `config` and recomputes enablement.
    pub fn load_from_config(&mut self, config: &ServerConfig) {
        self.rfb_port.set_text(config.rfb_port().to_string());
        self.http_port.set_text(config.http_port().to_string());
        self.polling_interval
            .set_text(config.polling_interval().to_string());
        self.inactivity_timeout
            .set_text(config.local_input_priority_timeout().to_string());

        self.enable_file_transfers
            .check(config.is_file_transfers_enabled());
        self.remove_wallpaper
            .check(config.is_removing_wallpaper_enabled());
        self.accept_rfb.check(config.is_accepting_rfb_connections());
        self.accept_http.check(config.is_accepting_http_connections());
        self.use_authentication.check(config.is_using_authentication());
        self.block_local_input.check(config.is_blocking_local_input());
        self.block_remote_input.check(config.is_blocking_remote_input());
        self.local_input_priority
            .check(config.is_local_input_priority_enabled());
        self.use_d3d.check(config.is_d3d_allowed());
        self.use_mirror_driver.check(config.is_mirror_allowed());
        self.show_tray_icon.check(config.show_tray_icon());

        match config.primary_password() {
            Some(crypted) => self.primary.set_crypted_password(crypted),
            None => self.primary.clear(),
        }
        match config.read_only_password() {
            Some(crypted) => self.view_only.set_crypted_password(crypted),
            None => self.view_only.clear(),
        }

        self.provenance.clear();
        self.derive_control_dependencies();
        debug!("Server settings form loaded from config");
    }

    /// Recomputes which controls are enabled from the current check states.
    /// Calling it twice in a row changes nothing the second time.
    pub fn derive_control_dependencies(&mut self) {
        let accept_rfb = self.accept_rfb.is_checked();
        self.rfb_port.set_enabled(accept_rfb);
        self.accept_http.set_enabled(accept_rfb);
        self.use_authentication.set_enabled(accept_rfb);

        self.http_port.set_enabled(self.accept_http.is_active());

        let passwords_enabled = self.use_authentication.is_active();
        self.primary.set_enabled(passwords_enabled);
        self.view_only.set_enabled(passwords_enabled);

        if self.block_local_input.is_checked() || self.block_remote_input.is_checked() {
            self.local_input_priority.check(false);
            self.local_input_priority.set_enabled(false);
        } else {
            self.local_input_priority.set_enabled(true);
        }

        self.inactivity_timeout
            .set_enabled(self.local_input_priority.is_active());
    }

    /// Operator clicked a check box. Disabled toggles ignore clicks.
    pub fn set_toggle(&mut self, id: ToggleId, checked: bool) {
        let toggle = self.toggle_mut(id);
        if !toggle.is_enabled() || toggle.is_checked() == checked {
            return;
        }
        toggle.check(checked);
        self.derive_control_dependencies();
        self.mark_edited(ControlId::Toggle(id));
    }

    /// Operator edited a text field.
    pub fn set_field_text(&mut self, id: FieldId, text: &str) {
        let field = self.field_mut(id);
        if field.text() == text {
            return;
        }
        field.set_text(text);
        self.mark_edited(ControlId::Field(id));
    }

    /// Operator clicked the Set/Change button of a slot.
    pub fn change_password(&mut self, role: PasswordRole, prompt: &mut dyn Prompt) -> bool {
        if !self.slot(role).is_enabled() {
            return false;
        }
        let changed = self.slot_mut(role).prompt_and_set_password(prompt);
        if changed {
            self.mark_edited(ControlId::Password(role));
        }
        changed
    }

    /// Operator clicked the Unset button of a slot; asks for confirmation.
    pub fn unset_password(&mut self, role: PasswordRole, prompt: &mut dyn Prompt) -> bool {
        if !self.slot(role).unset_button().enabled {
            return false;
        }
        let cleared = self.slot_mut(role).unset_password(true, prompt);
        if cleared {
            self.mark_edited(ControlId::Password(role));
        }
        cleared
    }

    fn numbers(&self) -> Result<Numbers, ValidationError> {
        Ok(Numbers {
            rfb_port: parse_port(&self.rfb_port, FieldId::RfbPort)?,
            http_port: parse_port(&self.http_port, FieldId::HttpPort)?,
            polling_interval: parse_uint(&self.polling_interval, FieldId::PollingInterval)?,
            inactivity_timeout: parse_uint(&self.inactivity_timeout, FieldId::InactivityTimeout)?,
        })
    }

    /// Checks the page in a fixed order and reports the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let numbers = self.numbers()?;

        if self.accept_http.is_checked() && numbers.rfb_port == numbers.http_port {
            return Err(ValidationError::PortsConflict);
        }
        if numbers.polling_interval < self.limits.min_polling_interval {
            return Err(ValidationError::IntervalTooSmall {
                min: self.limits.min_polling_interval,
            });
        }
        if numbers.inactivity_timeout < self.limits.min_inactivity_timeout {
            return Err(ValidationError::TimeoutTooSmall {
                min: self.limits.min_inactivity_timeout,
            });
        }

        let password_specified = self.primary.has_password() || self.view_only.has_password();
        if self.accept_rfb.is_checked() && self.use_authentication.is_checked() && !password_specified {
            return Err(ValidationError::AuthenticationRequiresPassword);
        }
        Ok(())
    }

    /// Copies the page into `config`. Call only after [`validate`] passed.
    ///
    /// [`validate`]: ServerSettingsForm::validate
    pub fn commit(&mut self, config: &mut ServerConfig) {
        let edited: Vec<ControlId> = self
            .provenance
            .iter()
            .filter(|(_, p)| **p == Provenance::Edited)
            .map(|(id, _)| *id)
            .collect();
        debug!("Committing server settings, {} control(s) edited", edited.len());

        match self.numbers() {
            Ok(numbers) => {
                config.set_rfb_port(numbers.rfb_port);
                config.set_http_port(numbers.http_port);
                config.set_polling_interval(numbers.polling_interval);
                config.set_local_input_priority_timeout(numbers.inactivity_timeout);
            }
            Err(e) => warn!("Numeric fields not committed: {}", e),
        }

        config.enable_file_transfers(self.enable_file_transfers.is_checked());
        config.enable_removing_wallpaper(self.remove_wallpaper.is_checked());
        config.accept_rfb_connections(self.accept_rfb.is_checked());
        config.accept_http_connections(self.accept_http.is_checked());
        config.use_authentication(self.use_authentication.is_checked());
        config.set_local_input_priority(self.local_input_priority.is_checked());
        config.block_local_input(self.block_local_input.is_checked());
        config.block_remote_input(self.block_remote_input.is_checked());
        config.set_mirror_allowing(self.use_mirror_driver.is_checked());
        config.set_d3d_allowing(self.use_d3d.is_checked());
        config.set_show_tray_icon(self.show_tray_icon.is_checked());

        match self.primary.crypted_password() {
            Some(crypted) => config.set_primary_password(crypted),
            None => config.delete_primary_password(),
        }
        match self.view_only.crypted_password() {
            Some(crypted) => config.set_read_only_password(crypted),
            None => config.delete_read_only_password(),
        }

        self.provenance.clear();
        info!("Server settings committed");
    }

    /// Validates and, when that passes, commits.
    pub fn apply(&mut self, config: &mut ServerConfig) -> Result<(), ValidationError> {
        self.validate()?;
        self.commit(config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Answered;
    use std::cell::Cell;
    use std::rc::Rc;

    fn loaded(config: &ServerConfig) -> ServerSettingsForm {
        let mut form = ServerSettingsForm::new(|| {});
        form.load_from_config(config);
        form
    }

    fn with_password() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.set_primary_password(&[1; 8]);
        config
    }

    #[test]
    fn load_mirrors_config() {
        let mut config = with_password();
        config.set_rfb_port(5901);
        config.set_show_tray_icon(false);
        let form = loaded(&config);
        assert_eq!(form.field(FieldId::RfbPort).text(), "5901");
        assert!(!form.toggle(ToggleId::ShowTrayIcon).is_checked());
        assert_eq!(form.slot(PasswordRole::Primary).crypted_password(), Some(&[1; 8]));
        assert!(!form.slot(PasswordRole::ViewOnly).has_password());
        assert!(!form.has_changes());
    }

    #[test]
    fn reload_clears_slot_missing_in_config() {
        let mut form = loaded(&with_password());
        form.load_from_config(&ServerConfig::default());
        assert!(!form.slot(PasswordRole::Primary).has_password());
    }

    #[test]
    fn ports_conflict() {
        let mut form = loaded(&with_password());
        form.set_field_text(FieldId::RfbPort, "5900");
        form.set_field_text(FieldId::HttpPort, "5900");
        assert_eq!(form.validate(), Err(ValidationError::PortsConflict));

        form.set_toggle(ToggleId::AcceptHttpConnections, false);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn invalid_numbers() {
        let mut form = loaded(&with_password());
        for (id, text) in [
            (FieldId::RfbPort, "0"),
            (FieldId::RfbPort, "65536"),
            (FieldId::RfbPort, "abc"),
            (FieldId::HttpPort, "-1"),
            (FieldId::PollingInterval, "-5"),
            (FieldId::InactivityTimeout, ""),
        ] {
            let mut form2 = loaded(&with_password());
            form2.set_field_text(id, text);
            assert_eq!(form2.validate(), Err(ValidationError::InvalidNumericField(id)));
        }
        form.set_field_text(FieldId::RfbPort, " 65535 ");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn validation_order() {
        let mut form = loaded(&ServerConfig::default());
        form.set_field_text(FieldId::HttpPort, "5900");
        form.set_field_text(FieldId::PollingInterval, "1");
        // Port conflict wins over interval and missing password.
        assert_eq!(form.validate(), Err(ValidationError::PortsConflict));
        form.set_field_text(FieldId::HttpPort, "5800");
        assert_eq!(
            form.validate(),
            Err(ValidationError::IntervalTooSmall { min: MINIMAL_POLLING_INTERVAL })
        );
        form.set_field_text(FieldId::PollingInterval, "30");
        form.set_field_text(FieldId::InactivityTimeout, "0");
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::TimeoutTooSmall { min: 1 });
        assert_eq!(err.field(), Some(FieldId::InactivityTimeout));
        form.set_field_text(FieldId::InactivityTimeout, "1");
        assert_eq!(form.validate(), Err(ValidationError::AuthenticationRequiresPassword));
    }

    #[test]
    fn authentication_requires_password() {
        let mut form = loaded(&ServerConfig::default());
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::AuthenticationRequiresPassword);
        assert!(err.is_blocking());
        assert_eq!(err.field(), None);

        assert!(form.change_password(PasswordRole::ViewOnly, &mut Answered::password("view")));
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn no_password_needed_without_rfb() {
        let mut form = loaded(&ServerConfig::default());
        form.set_toggle(ToggleId::AcceptRfbConnections, false);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn rfb_off_disables_dependents() {
        let mut form = loaded(&with_password());
        assert!(form.field(FieldId::RfbPort).is_enabled());
        assert!(form.field(FieldId::HttpPort).is_enabled());
        assert!(form.slot(PasswordRole::Primary).is_enabled());

        form.set_toggle(ToggleId::AcceptRfbConnections, false);
        assert!(!form.field(FieldId::RfbPort).is_enabled());
        assert!(!form.toggle(ToggleId::AcceptHttpConnections).is_enabled());
        assert!(!form.toggle(ToggleId::UseAuthentication).is_enabled());
        assert!(!form.field(FieldId::HttpPort).is_enabled());
        assert!(!form.slot(PasswordRole::Primary).is_enabled());
        assert!(!form.slot(PasswordRole::ViewOnly).is_enabled());
        // Checked state survives being disabled.
        assert!(form.toggle(ToggleId::AcceptHttpConnections).is_checked());
    }

    #[test]
    fn http_port_follows_http_toggle() {
        let mut form = loaded(&with_password());
        form.set_toggle(ToggleId::AcceptHttpConnections, false);
        assert!(!form.field(FieldId::HttpPort).is_enabled());
        form.set_toggle(ToggleId::AcceptHttpConnections, true);
        assert!(form.field(FieldId::HttpPort).is_enabled());
    }

    #[test]
    fn authentication_toggle_gates_slots() {
        let mut form = loaded(&with_password());
        form.set_toggle(ToggleId::UseAuthentication, false);
        assert!(!form.slot(PasswordRole::Primary).change_button().enabled);
        assert!(!form.change_password(PasswordRole::Primary, &mut Answered::password("x")));
        assert_eq!(form.slot(PasswordRole::Primary).crypted_password(), Some(&[1; 8]));
    }

    #[test]
    fn input_blocking_forces_priority_off() {
        let mut config = with_password();
        config.set_local_input_priority(true);
        let mut form = loaded(&config);
        assert!(form.toggle(ToggleId::LocalInputPriority).is_active());
        assert!(form.field(FieldId::InactivityTimeout).is_enabled());

        form.set_toggle(ToggleId::BlockLocalInput, true);
        let priority = *form.toggle(ToggleId::LocalInputPriority);
        assert!(!priority.is_checked());
        assert!(!priority.is_enabled());
        assert!(!form.field(FieldId::InactivityTimeout).is_enabled());

        form.derive_control_dependencies();
        assert_eq!(*form.toggle(ToggleId::LocalInputPriority), priority);
        assert!(!form.field(FieldId::InactivityTimeout).is_enabled());

        // Stays off once unblocked; the operator has to re-check it.
        form.set_toggle(ToggleId::BlockLocalInput, false);
        let priority = form.toggle(ToggleId::LocalInputPriority);
        assert!(priority.is_enabled());
        assert!(!priority.is_checked());
    }

    #[test]
    fn remote_blocking_also_forces_priority_off() {
        let mut config = with_password();
        config.set_local_input_priority(true);
        config.block_remote_input(true);
        let form = loaded(&config);
        assert!(!form.toggle(ToggleId::LocalInputPriority).is_checked());
        assert!(!form.toggle(ToggleId::LocalInputPriority).is_enabled());
    }

    #[test]
    fn commit_writes_fields_and_passwords() {
        let mut config = with_password();
        config.set_read_only_password(&[2; 8]);
        let mut form = loaded(&config);

        form.set_field_text(FieldId::RfbPort, "5901");
        form.set_field_text(FieldId::PollingInterval, "250");
        form.set_toggle(ToggleId::UseD3D, false);
        form.set_toggle(ToggleId::RemoveWallpaper, false);
        assert!(form.unset_password(PasswordRole::ViewOnly, &mut Answered::yes()));
        assert!(form.has_changes());

        form.apply(&mut config).unwrap();
        assert_eq!(config.rfb_port(), 5901);
        assert_eq!(config.polling_interval(), 250);
        assert!(!config.is_d3d_allowed());
        assert!(!config.is_removing_wallpaper_enabled());
        assert_eq!(config.primary_password(), Some([1; 8]));
        assert!(!config.has_read_only_password());
        assert!(!form.has_changes());
    }

    #[test]
    fn failed_apply_leaves_config() {
        let mut config = ServerConfig::default();
        let mut form = loaded(&config);
        form.set_field_text(FieldId::RfbPort, "6000");
        let before = config.clone();
        assert!(form.apply(&mut config).is_err());
        assert_eq!(config, before);
        assert!(form.has_changes());
    }

    #[test]
    fn listener_and_provenance() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut form = ServerSettingsForm::new(move || seen.set(seen.get() + 1));
        form.load_from_config(&ServerConfig::default());
        assert_eq!(count.get(), 0);

        form.set_field_text(FieldId::HttpPort, "5800");
        assert_eq!(count.get(), 0, "unchanged text is not an edit");

        form.set_toggle(ToggleId::ShowTrayIcon, false);
        assert_eq!(count.get(), 1);
        assert_eq!(
            form.provenance(ControlId::Toggle(ToggleId::ShowTrayIcon)),
            Provenance::Edited
        );
        assert_eq!(
            form.provenance(ControlId::Field(FieldId::RfbPort)),
            Provenance::Loaded
        );

        assert!(!form.unset_password(PasswordRole::Primary, &mut Answered::yes()));
        assert_eq!(count.get(), 1, "nothing to unset");
    }

    #[test]
    fn declined_unset_is_not_an_edit() {
        let mut form = loaded(&with_password());
        assert!(!form.unset_password(PasswordRole::Primary, &mut Answered::default()));
        assert!(form.slot(PasswordRole::Primary).has_password());
        assert!(!form.has_changes());
    }

    #[test]
    fn custom_limits() {
        let limits = FormLimits {
            min_polling_interval: 100,
            min_inactivity_timeout: 5,
        };
        let mut form = ServerSettingsForm::with_limits(limits, || {});
        form.load_from_config(&with_password());
        form.set_field_text(FieldId::PollingInterval, "99");
        assert_eq!(
            form.validate(),
            Err(ValidationError::IntervalTooSmall { min: 100 })
        );
        form.set_field_text(FieldId::PollingInterval, "100");
        assert_eq!(form.validate(), Err(ValidationError::TimeoutTooSmall { min: 5 }));
    }
}
