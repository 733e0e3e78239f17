//! Presentation state for the controls on the server settings page.

/// A check box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    checked: bool,
    enabled: bool,
}

impl Default for Toggle {
    fn default() -> Self {
        Self {
            checked: false,
            enabled: true,
        }
    }
}

impl Toggle {
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Checked and interactive.
    pub fn is_active(&self) -> bool {
        self.checked && self.enabled
    }

    pub fn check(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A single-line numeric edit box. The text is kept raw until validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    text: String,
    enabled: bool,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            text: String::new(),
            enabled: true,
        }
    }
}

impl TextField {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A push button whose caption and enablement are derived from other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub label: &'static str,
    pub enabled: bool,
}
