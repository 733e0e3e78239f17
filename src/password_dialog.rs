use crate::dialog::DialogBuilder;
use eframe::egui;
use log::debug;
use wsconfig_core::password::{PasswordEntry, PasswordEntryError};
use wsconfig_core::{PasswordRole, PromptResult};

/// Password entry window for one slot. Stays open until OK or Cancel.
pub struct PasswordDialog {
    role: PasswordRole,
    first_time: bool,
    entry: PasswordEntry,
    error: Option<PasswordEntryError>,
}

impl PasswordDialog {
    pub fn new(role: PasswordRole, first_time: bool) -> Self {
        Self {
            role,
            first_time,
            entry: PasswordEntry::default(),
            error: None,
        }
    }

    pub fn role(&self) -> PasswordRole {
        self.role
    }

    fn title(&self) -> String {
        let verb = if self.first_time { "Set" } else { "Change" };
        match self.role {
            PasswordRole::Primary => format!("{} Primary Password", verb),
            PasswordRole::ViewOnly => format!("{} View-Only Password", verb),
        }
    }

    /// Draws the window. Returns the operator's answer once there is one.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<PromptResult<String>> {
        let mut result = None;
        let mut ok_clicked = false;
        let mut cancel_clicked = false;
        let title = self.title();
        let entry = &mut self.entry;
        let error = self.error;

        DialogBuilder::new(title).width(300.0).show_with_footer(
            ctx,
            |ui| {
                egui::Grid::new("password_entry_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("New password:");
                        ui.add(egui::TextEdit::singleline(&mut entry.password).password(true));
                        ui.end_row();
                        ui.label("Confirm password:");
                        ui.add(egui::TextEdit::singleline(&mut entry.confirmation).password(true));
                        ui.end_row();
                    });
                if entry.will_truncate() {
                    ui.label(
                        egui::RichText::new("Only the first 8 characters will be used.")
                            .color(ui.visuals().warn_fg_color),
                    );
                }
                if let Some(e) = error {
                    ui.label(egui::RichText::new(e.to_string()).color(ui.visuals().error_fg_color));
                }
            },
            |ui| {
                ok_clicked = ui.button("OK").clicked();
                cancel_clicked = ui.button("Cancel").clicked();
            },
        );

        if cancel_clicked {
            self.entry.clear();
            result = Some(PromptResult::Declined);
        } else if ok_clicked {
            match self.entry.validate() {
                Ok(text) => {
                    let text = text.to_string();
                    self.entry.clear();
                    result = Some(PromptResult::Confirmed(text));
                }
                Err(e) => {
                    debug!("Password entry rejected: {}", e);
                    self.error = Some(e);
                }
            }
        }
        result
    }
}
