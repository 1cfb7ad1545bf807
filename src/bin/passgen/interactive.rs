//! The interactive form: settings prompts, and a menu to generate and copy passwords.

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;

use passgen::clipboard::SystemClipboard;
use passgen::{CharacterClass, GenerationError, GeneratorConfig, GeneratorSession};

use crate::ProgError;

const MENU: &[&str] = &[
    "Generate password",
    "Copy to clipboard",
    "Change settings",
    "Quit",
];

pub(crate) fn run(config: GeneratorConfig) -> Result<(), ProgError> {
    let theme = ColorfulTheme::default();
    let mut session = GeneratorSession::new(config);
    let mut rng = rand::thread_rng();

    print_settings(session.config());
    loop {
        let selection = dialoguer::Select::with_theme(&theme)
            .items(MENU)
            .default(0)
            .interact_opt()
            .context("failed to query your selection")?;
        match selection {
            Some(0) => {
                session.generate(&mut rng)?;
                print_field(&session);
            }
            Some(1) => match session.copy_to(&mut SystemClipboard) {
                Ok(()) => eprintln!("Copied to the clipboard."),
                Err(err) => {
                    tracing::warn!("clipboard write failed: {err:#}");
                    eprintln!("Could not copy to the clipboard: {err:#}");
                }
            },
            Some(2) => {
                edit_settings(&theme, &mut session)?;
                print_settings(session.config());
            }
            Some(3) | None => break,
            Some(_) => unreachable!(),
        }
    }
    Ok(())
}

fn edit_settings(theme: &ColorfulTheme, session: &mut GeneratorSession) -> Result<(), ProgError> {
    let labels = CharacterClass::ALL.map(|class| format!("Include {class}"));
    let defaults = CharacterClass::ALL.map(|class| session.config().is_enabled(class));
    let chosen = dialoguer::MultiSelect::with_theme(theme)
        .with_prompt("Character types (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .interact_opt()
        .context("failed to query character types")?;
    let chosen = match chosen {
        Some(c) => c,
        None => {
            eprintln!("Settings unchanged.");
            return Ok(());
        }
    };
    let length = dialoguer::Input::<usize>::with_theme(theme)
        .with_prompt(format!(
            "Password length ({}-{})",
            GeneratorConfig::MIN_LENGTH,
            GeneratorConfig::MAX_LENGTH
        ))
        .default(session.config().length)
        .validate_with(|length: &usize| -> Result<(), String> {
            GeneratorConfig::check_length(*length).map_err(|err| err.to_string())
        })
        .interact_text()
        .context("failed to read the password length")?;
    apply_settings(session, &chosen, length)?;
    Ok(())
}

/// Apply the answers from the settings prompts: `chosen` holds indices into
/// [`CharacterClass::ALL`]. Nothing changes unless the length is valid.
fn apply_settings(
    session: &mut GeneratorSession,
    chosen: &[usize],
    length: usize,
) -> Result<(), GenerationError> {
    GeneratorConfig::check_length(length)?;
    for (index, class) in CharacterClass::ALL.into_iter().enumerate() {
        session.set_class(class, chosen.contains(&index));
    }
    session.set_length(length)
}

fn print_settings(config: &GeneratorConfig) {
    let enabled = config
        .enabled_classes()
        .map(|class| class.label())
        .collect::<Vec<_>>();
    let enabled = if enabled.is_empty() {
        "none".to_owned()
    } else {
        enabled.join(", ")
    };
    eprintln!("Length: {}  Character types: {}", config.length, enabled);
}

fn print_field(session: &GeneratorSession) {
    println!("{}", session.display_text());
    if let Some(strength) = session.strength() {
        eprintln!("Strength: {}", crate::styled_strength(strength));
    }
}
