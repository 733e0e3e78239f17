//! Blocking user interactions the slots and the form depend on.

/// Outcome of a modal interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult<T> {
    Confirmed(T),
    Declined,
}

impl<T> PromptResult<T> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, PromptResult::Confirmed(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            PromptResult::Confirmed(value) => Some(value),
            PromptResult::Declined => None,
        }
    }
}

/// Synchronous, modal questions asked of the operator.
///
/// Implementations must not return before the operator has answered, and
/// must not call back into the slot or form that asked.
pub trait Prompt {
    /// Yes/no question. `Confirmed(())` means yes.
    fn confirm(&mut self, message: &str) -> PromptResult<()>;

    /// Asks for a new password. `first_time` is true when the slot is empty.
    fn enter_password(&mut self, first_time: bool) -> PromptResult<String>;
}

/// Prompt that already knows its answers, for flows where the operator
/// answered before the core was called.
#[derive(Debug, Clone, Default)]
pub struct Answered {
    pub confirm: bool,
    pub password: Option<String>,
}

impl Answered {
    pub fn yes() -> Self {
        Self {
            confirm: true,
            password: None,
        }
    }

    pub fn password(text: impl Into<String>) -> Self {
        Self {
            confirm: true,
            password: Some(text.into()),
        }
    }
}

impl Prompt for Answered {
    fn confirm(&mut self, _message: &str) -> PromptResult<()> {
        if self.confirm {
            PromptResult::Confirmed(())
        } else {
            PromptResult::Declined
        }
    }

    fn enter_password(&mut self, _first_time: bool) -> PromptResult<String> {
        match self.password.take() {
            Some(text) => PromptResult::Confirmed(text),
            None => PromptResult::Declined,
        }
    }
}
