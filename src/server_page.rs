//! egui rendering of the server settings form.

use crate::password_dialog::PasswordDialog;
use eframe::egui;
use log::{debug, info, warn};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use wsconfig_core::prompt::Answered;
use wsconfig_core::{
    FieldId, PasswordRole, Prompt, PromptResult, ServerConfig, ServerSettingsForm, ToggleId,
    ValidationError,
};

const APP_TITLE: &str = "Server Configuration";

/// Native yes/no box. Password entry goes through [`PasswordDialog`], so
/// this prompt never has a password to give.
struct NativeConfirm;

impl Prompt for NativeConfirm {
    fn confirm(&mut self, message: &str) -> PromptResult<()> {
        let answer = rfd::MessageDialog::new()
            .set_title(APP_TITLE)
            .set_description(message)
            .set_level(rfd::MessageLevel::Info)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        match answer {
            rfd::MessageDialogResult::Yes => PromptResult::Confirmed(()),
            _ => PromptResult::Declined,
        }
    }

    fn enter_password(&mut self, _first_time: bool) -> PromptResult<String> {
        PromptResult::Declined
    }
}

fn show_blocking_error(error: &ValidationError) {
    rfd::MessageDialog::new()
        .set_title("Bad Input")
        .set_description(error.to_string())
        .set_level(rfd::MessageLevel::Error)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

pub struct ServerPage {
    config: ServerConfig,
    config_path: PathBuf,
    form: ServerSettingsForm,
    edited: Rc<Cell<bool>>,
    password_dialog: Option<PasswordDialog>,
    error: Option<ValidationError>,
    status: Option<String>,
}

impl ServerPage {
    pub fn new(config_path: PathBuf) -> Self {
        let config = ServerConfig::load_or_default(&config_path);
        let edited = Rc::new(Cell::new(false));
        let flag = Rc::clone(&edited);
        let mut form = ServerSettingsForm::new(move || flag.set(true));
        form.load_from_config(&config);
        Self {
            config,
            config_path,
            form,
            edited,
            password_dialog: None,
            error: None,
            status: None,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.form.has_changes()
    }

    /// Validates, commits and writes the server config. Returns true when the
    /// settings were saved.
    pub fn apply(&mut self) -> bool {
        match self.form.apply(&mut self.config) {
            Ok(()) => {}
            Err(e) => {
                warn!("Server settings rejected: {}", e);
                if e.is_blocking() {
                    show_blocking_error(&e);
                } else {
                    self.error = Some(e);
                }
                return false;
            }
        }
        match self.config.save(&self.config_path) {
            Ok(()) => {
                self.status = Some(format!("Saved to {}", self.config_path.display()));
                true
            }
            Err(e) => {
                warn!("{}", e);
                self.status = Some(format!("Could not save settings: {}", e));
                false
            }
        }
    }

    /// Throws away edits and shows the stored config again.
    pub fn revert(&mut self) {
        info!("Reverting server settings");
        self.form.load_from_config(&self.config);
        self.error = None;
        self.status = None;
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        if self.edited.replace(false) {
            self.error = None;
            self.status = None;
        }

        let modal_open = self.password_dialog.is_some();
        ui.add_enabled_ui(!modal_open, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_connections(ui);
                ui.add_space(8.0);
                self.show_authentication(ui);
                ui.add_space(8.0);
                self.show_input_handling(ui);
                ui.add_space(8.0);
                self.show_miscellaneous(ui);
            });
        });

        if let Some(error) = &self.error {
            let target = error
                .field()
                .map(|f| format!(" ({})", f))
                .unwrap_or_default();
            ui.label(
                egui::RichText::new(format!("{}{}", error, target))
                    .color(ui.visuals().error_fg_color),
            );
        }
        if let Some(status) = &self.status {
            ui.label(egui::RichText::new(status).color(ui.visuals().weak_text_color()));
        }

        self.show_password_dialog(ctx);
    }

    fn text_field(&mut self, ui: &mut egui::Ui, id: FieldId, label: &str) {
        let field = self.form.field(id);
        let enabled = field.is_enabled();
        let mut text = field.text().to_string();
        let highlight = self.error.as_ref().and_then(|e| e.field()) == Some(id);
        ui.label(label);
        let mut edit = egui::TextEdit::singleline(&mut text).desired_width(80.0);
        if highlight {
            edit = edit.text_color(ui.visuals().error_fg_color);
        }
        if ui.add_enabled(enabled, edit).changed() {
            self.form.set_field_text(id, &text);
        }
    }

    fn checkbox(&mut self, ui: &mut egui::Ui, id: ToggleId, label: &str) {
        let toggle = *self.form.toggle(id);
        let mut checked = toggle.is_checked();
        if ui
            .add_enabled(toggle.is_enabled(), egui::Checkbox::new(&mut checked, label))
            .changed()
        {
            debug!("{:?} set to {}", id, checked);
            self.form.set_toggle(id, checked);
        }
    }

    fn show_connections(&mut self, ui: &mut egui::Ui) {
        ui.heading("Incoming Connections");
        self.checkbox(ui, ToggleId::AcceptRfbConnections, "Accept RFB connections");
        egui::Grid::new("ports_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                self.text_field(ui, FieldId::RfbPort, "Main server port:");
                ui.end_row();
                self.checkbox(ui, ToggleId::AcceptHttpConnections, "Serve Java viewer to Web clients");
                ui.end_row();
                self.text_field(ui, FieldId::HttpPort, "Web access port:");
                ui.end_row();
            });
    }

    fn show_authentication(&mut self, ui: &mut egui::Ui) {
        ui.heading("Authentication");
        self.checkbox(ui, ToggleId::UseAuthentication, "Require VNC authentication");
        egui::Grid::new("passwords_grid")
            .num_columns(3)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                self.password_row(ui, PasswordRole::Primary, "Primary password:");
                ui.end_row();
                self.password_row(ui, PasswordRole::ViewOnly, "View-only password:");
                ui.end_row();
            });
    }

    fn password_row(&mut self, ui: &mut egui::Ui, role: PasswordRole, label: &str) {
        let slot = self.form.slot(role);
        let change = slot.change_button();
        let unset = slot.unset_button();
        let first_time = !slot.has_password();

        ui.label(label);
        if ui
            .add_enabled(change.enabled, egui::Button::new(change.label))
            .clicked()
        {
            self.password_dialog = Some(PasswordDialog::new(role, first_time));
        }
        if ui
            .add_enabled(unset.enabled, egui::Button::new(unset.label))
            .clicked()
        {
            self.form.unset_password(role, &mut NativeConfirm);
        }
    }

    fn show_input_handling(&mut self, ui: &mut egui::Ui) {
        ui.heading("Input Handling");
        self.checkbox(ui, ToggleId::BlockRemoteInput, "Block remote input events");
        self.checkbox(ui, ToggleId::BlockLocalInput, "Block remote input on local activity");
        self.checkbox(ui, ToggleId::LocalInputPriority, "No local input during client sessions");
        ui.horizontal(|ui| {
            self.text_field(ui, FieldId::InactivityTimeout, "Inactivity timeout (seconds):");
        });
    }

    fn show_miscellaneous(&mut self, ui: &mut egui::Ui) {
        ui.heading("Miscellaneous");
        self.checkbox(ui, ToggleId::EnableFileTransfers, "Enable file transfers");
        self.checkbox(ui, ToggleId::RemoveWallpaper, "Hide desktop wallpaper");
        self.checkbox(ui, ToggleId::UseMirrorDriver, "Use mirror driver if available");
        self.checkbox(ui, ToggleId::UseD3D, "Grab transparent windows (D3D)");
        self.checkbox(ui, ToggleId::ShowTrayIcon, "Show icon in the notification area");
        ui.horizontal(|ui| {
            self.text_field(ui, FieldId::PollingInterval, "Screen polling cycle (ms):");
        });
    }

    fn show_password_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.password_dialog.as_mut() else {
            return;
        };
        let role = dialog.role();
        match dialog.show(ctx) {
            Some(PromptResult::Confirmed(text)) => {
                self.password_dialog = None;
                let mut answer = Answered::password(text);
                self.form.change_password(role, &mut answer);
            }
            Some(PromptResult::Declined) => {
                debug!("{} password entry cancelled", role);
                self.password_dialog = None;
            }
            None => {}
        }
    }
}
