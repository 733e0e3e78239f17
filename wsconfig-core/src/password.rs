use crate::controls::ButtonState;
use crate::crypt::{self, PASSWORD_LEN};
use crate::prompt::{Prompt, PromptResult};
use log::debug;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

pub const SET_PASSWORD_CAPTION: &str = "Set password...";
pub const CHANGE_PASSWORD_CAPTION: &str = "Change password...";
pub const UNSET_PASSWORD_CAPTION: &str = "Unset";
pub const UNSET_PASSWORD_PROMPT: &str = "Are you sure you want to unset the password?";

/// Which of the two server passwords a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordRole {
    /// Full-control access.
    Primary,
    ViewOnly,
}

impl fmt::Display for PasswordRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordRole::Primary => write!(f, "primary"),
            PasswordRole::ViewOnly => write!(f, "view-only"),
        }
    }
}

/// Crypted password for one role, plus the enablement of its two buttons.
///
/// The bytes are either absent or exactly one scrambled block; nothing else
/// can be stored.
pub struct PasswordSlot {
    role: PasswordRole,
    crypted: Option<[u8; PASSWORD_LEN]>,
    enabled: bool,
}

impl fmt::Debug for PasswordSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordSlot")
            .field("role", &self.role)
            .field("has_password", &self.has_password())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl PasswordSlot {
    pub fn new(role: PasswordRole) -> Self {
        Self {
            role,
            crypted: None,
            enabled: true,
        }
    }

    pub fn role(&self) -> PasswordRole {
        self.role
    }

    pub fn has_password(&self) -> bool {
        self.crypted.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Scrambles `plain_text` and stores the result, replacing any previous
    /// password. Only the first 8 characters are significant.
    pub fn set_password(&mut self, plain_text: &str) {
        let mut block = crypt::plaintext_block(plain_text);
        let crypted = crypt::scramble(&block);
        block.zeroize();
        self.set_crypted_password(crypted);
    }

    /// Stores bytes that are already scrambled, as held by the server config.
    pub fn set_crypted_password(&mut self, crypted: [u8; PASSWORD_LEN]) {
        self.release();
        self.crypted = Some(crypted);
        debug!("{} password set", self.role);
    }

    pub fn crypted_password(&self) -> Option<&[u8; PASSWORD_LEN]> {
        self.crypted.as_ref()
    }

    /// Clears the password. With `confirm_with_user` the operator is asked
    /// first and a "no" leaves the slot untouched. Returns whether the slot
    /// was cleared.
    pub fn unset_password(&mut self, confirm_with_user: bool, prompt: &mut dyn Prompt) -> bool {
        if confirm_with_user && !prompt.confirm(UNSET_PASSWORD_PROMPT).is_confirmed() {
            debug!("{} password unset declined", self.role);
            return false;
        }
        self.clear();
        true
    }

    /// Clears the password without asking.
    pub fn clear(&mut self) {
        if self.has_password() {
            debug!("{} password unset", self.role);
        }
        self.release();
    }

    /// Asks the operator for a new password and stores it. Returns false when
    /// the entry was cancelled.
    pub fn prompt_and_set_password(&mut self, prompt: &mut dyn Prompt) -> bool {
        match prompt.enter_password(!self.has_password()) {
            PromptResult::Confirmed(mut text) => {
                self.set_password(&text);
                text.zeroize();
                true
            }
            PromptResult::Declined => false,
        }
    }

    pub fn change_button(&self) -> ButtonState {
        ButtonState {
            label: if self.has_password() {
                CHANGE_PASSWORD_CAPTION
            } else {
                SET_PASSWORD_CAPTION
            },
            enabled: self.enabled,
        }
    }

    pub fn unset_button(&self) -> ButtonState {
        ButtonState {
            label: UNSET_PASSWORD_CAPTION,
            enabled: self.enabled && self.has_password(),
        }
    }

    fn release(&mut self) {
        if let Some(bytes) = self.crypted.as_mut() {
            bytes.zeroize();
        }
        self.crypted = None;
    }
}

impl Drop for PasswordSlot {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordEntryError {
    #[error("Password cannot be empty.")]
    Empty,
    #[error("Passwords do not match.")]
    Mismatch,
}

/// Contents of the password entry window: the password typed twice.
#[derive(Default)]
pub struct PasswordEntry {
    pub password: String,
    pub confirmation: String,
}

impl fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEntry").finish_non_exhaustive()
    }
}

impl PasswordEntry {
    /// True when characters past the eighth will be ignored.
    pub fn will_truncate(&self) -> bool {
        self.password.chars().count() > PASSWORD_LEN
    }

    pub fn validate(&self) -> Result<&str, PasswordEntryError> {
        if self.password.is_empty() {
            return Err(PasswordEntryError::Empty);
        }
        if self.password != self.confirmation {
            return Err(PasswordEntryError::Mismatch);
        }
        Ok(&self.password)
    }

    pub fn clear(&mut self) {
        self.password.zeroize();
        self.confirmation.zeroize();
    }
}

impl Drop for PasswordEntry {
    fn drop(&mut self) {
        self.clear();
    }
}
