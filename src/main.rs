#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod dialog;
mod password_dialog;
mod server_page;

use config::AppConfig;
use dialog::DialogBuilder;
use eframe::egui;
use log::{debug, info};
use server_page::ServerPage;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ABOUT: &str = "Edits the connection, authentication and input settings of a VNC server.";

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("wsconfig v{} starting...", VERSION);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([460.0, 640.0])
            .with_title("Server Configuration"),
        ..Default::default()
    };

    eframe::run_native(
        "wsconfig",
        options,
        Box::new(|cc| Box::new(ConfigApp::new(cc))),
    )
}

struct ConfigApp {
    config: AppConfig,
    page: ServerPage,
    show_about: bool,
}

impl ConfigApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();
        debug!(
            "App config loaded: theme={}, server config={}",
            config.theme,
            config.server_config_path.display()
        );
        Self::apply_theme(&cc.egui_ctx, &config.theme);
        let page = ServerPage::new(config.server_config_path.clone());
        Self {
            config,
            page,
            show_about: false,
        }
    }

    fn apply_theme(ctx: &egui::Context, theme: &str) {
        match theme {
            "light" => ctx.set_visuals(egui::Visuals::light()),
            _ => ctx.set_visuals(egui::Visuals::dark()),
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: &str) {
        debug!("Theme changed to: {}", theme);
        self.config.theme = theme.to_string();
        Self::apply_theme(ctx, theme);
        self.config.save();
    }
}

impl eframe::App for ConfigApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    if ui.button("Dark theme").clicked() {
                        self.set_theme(ctx, "dark");
                        ui.close_menu();
                    }
                    if ui.button("Light theme").clicked() {
                        self.set_theme(ctx, "light");
                        ui.close_menu();
                    }
                });
                if ui.button("About").clicked() {
                    self.show_about = true;
                }
            });
        });

        egui::TopBottomPanel::bottom("buttons").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() && self.page.apply() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                if ui.button("Cancel").clicked() {
                    self.page.revert();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                if ui
                    .add_enabled(self.page.has_changes(), egui::Button::new("Apply"))
                    .clicked()
                {
                    self.page.apply();
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.page.show(ctx, ui);
        });

        if self.show_about {
            let mut close = false;
            DialogBuilder::new("About").padding(12.0).show_with_footer(
                ctx,
                |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("wsconfig");
                        ui.label(format!("Version: {}", VERSION));
                        ui.add_space(6.0);
                        ui.label(ABOUT);
                    });
                },
                |ui| {
                    close = ui.button("Close").clicked();
                },
            );
            if close {
                self.show_about = false;
            }
        }
    }
}
