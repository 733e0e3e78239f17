use std::collections::VecDeque;
use wsconfig_core::crypt;
use wsconfig_core::form::ControlId;
use wsconfig_core::{
    FieldId, PasswordRole, Prompt, PromptResult, ServerConfig, ServerSettingsForm, ToggleId,
    ValidationError,
};

/// Answers prompts from a script and records the questions asked.
#[derive(Default)]
struct ScriptedPrompt {
    confirms: VecDeque<bool>,
    passwords: VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> PromptResult<()> {
        self.asked.push(message.to_string());
        match self.confirms.pop_front() {
            Some(true) => PromptResult::Confirmed(()),
            _ => PromptResult::Declined,
        }
    }

    fn enter_password(&mut self, first_time: bool) -> PromptResult<String> {
        self.asked
            .push(format!("enter password (first time: {})", first_time));
        match self.passwords.pop_front().flatten() {
            Some(text) => PromptResult::Confirmed(text),
            None => PromptResult::Declined,
        }
    }
}

#[test]
fn edit_apply_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config").join("server.json");

    let mut config = ServerConfig::load_or_default(&path);
    assert_eq!(config, ServerConfig::default());

    let mut form = ServerSettingsForm::new(|| {});
    form.load_from_config(&config);
    assert_eq!(
        form.apply(&mut config),
        Err(ValidationError::AuthenticationRequiresPassword)
    );

    let mut prompt = ScriptedPrompt::default();
    prompt.passwords.push_back(None);
    prompt.passwords.push_back(Some("longpassword".to_string()));
    assert!(!form.change_password(PasswordRole::Primary, &mut prompt));
    assert!(form.change_password(PasswordRole::Primary, &mut prompt));
    assert_eq!(
        prompt.asked,
        vec![
            "enter password (first time: true)".to_string(),
            "enter password (first time: true)".to_string(),
        ]
    );
    assert_eq!(
        form.provenance(ControlId::Password(PasswordRole::Primary)),
        wsconfig_core::form::Provenance::Edited
    );

    form.set_field_text(FieldId::HttpPort, "8080");
    form.set_toggle(ToggleId::EnableFileTransfers, false);
    form.apply(&mut config).unwrap();
    config.save(&path).unwrap();

    let reloaded = ServerConfig::load(&path).unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.http_port(), 8080);
    assert!(!reloaded.is_file_transfers_enabled());
    let crypted = reloaded.primary_password().unwrap();
    assert_eq!(crypt::unscramble(&crypted), *b"longpass");

    let mut form = ServerSettingsForm::new(|| {});
    form.load_from_config(&reloaded);
    assert_eq!(
        form.slot(PasswordRole::Primary).crypted_password(),
        Some(&crypted)
    );
    assert_eq!(form.validate(), Ok(()));
}

#[test]
fn unset_then_commit_deletes_role() {
    let mut config = ServerConfig::default();
    config.set_primary_password(&crypt::scramble(&crypt::plaintext_block("a")));
    config.set_read_only_password(&crypt::scramble(&crypt::plaintext_block("b")));

    let mut form = ServerSettingsForm::new(|| {});
    form.load_from_config(&config);

    let mut prompt = ScriptedPrompt::default();
    prompt.confirms.extend([false, true]);
    assert!(!form.unset_password(PasswordRole::ViewOnly, &mut prompt));
    assert!(form.unset_password(PasswordRole::ViewOnly, &mut prompt));
    assert_eq!(prompt.asked.len(), 2);

    form.apply(&mut config).unwrap();
    assert!(config.has_primary_password());
    assert!(!config.has_read_only_password());
}

#[test]
fn broken_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(ServerConfig::load(&path).is_err());
    assert_eq!(ServerConfig::load_or_default(&path), ServerConfig::default());
}
