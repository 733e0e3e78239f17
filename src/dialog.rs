use eframe::egui;

/// Small fixed window centred over the main one, with content above a
/// separator and a button row below it.
pub struct DialogBuilder {
    title: String,
    width: f32,
    padding: f32,
}

impl Default for DialogBuilder {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 320.0,
            padding: 8.0,
        }
    }
}

impl DialogBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn show_with_footer<F, G>(self, ctx: &egui::Context, content: F, footer: G)
    where
        F: FnOnce(&mut egui::Ui),
        G: FnOnce(&mut egui::Ui),
    {
        egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .movable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([self.width, 0.0])
            .show(ctx, |ui| {
                ui.add_space(self.padding);
                content(ui);
                ui.add_space(self.padding);
                ui.separator();
                ui.horizontal(|ui| {
                    footer(ui);
                });
            });
    }
}
