//! The state behind the generator form: the current settings, and whatever the password field is
//! showing.

use rand::{CryptoRng, Rng};

use crate::character_classes::{build_pool, CharacterClass, GeneratorConfig};
use crate::clipboard::Clipboard;
use crate::password_generation::generate_random_password;
use crate::strength::{self, Strength};
use crate::{GenerationError, Secret};

/// Shown in the password field when generation is attempted with every class turned off.
pub static NO_CHARACTER_CLASSES_MESSAGE: &str = "Please select at least one character type";

/// The content of the password field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Displayed {
    Password(Secret),
    Error(&'static str),
}

impl Displayed {
    pub fn as_str(&self) -> &str {
        match self {
            Displayed::Password(secret) => secret.as_str(),
            Displayed::Error(message) => *message,
        }
    }
}

#[derive(Debug, Default)]
pub struct GeneratorSession {
    config: GeneratorConfig,
    displayed: Option<Displayed>,
}

impl GeneratorSession {
    pub fn new(config: GeneratorConfig) -> GeneratorSession {
        GeneratorSession {
            config,
            displayed: None,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn set_length(&mut self, length: usize) -> Result<(), GenerationError> {
        self.config.set_length(length)
    }

    pub fn set_class(&mut self, class: CharacterClass, enabled: bool) {
        self.config.set_enabled(class, enabled);
    }

    pub fn toggle_class(&mut self, class: CharacterClass) {
        let enabled = self.config.is_enabled(class);
        self.config.set_enabled(class, !enabled);
    }

    /// Regenerate the password field from the current settings.
    ///
    /// With no classes enabled the field shows [`NO_CHARACTER_CLASSES_MESSAGE`] instead, and this
    /// still returns `Ok`.
    pub fn generate<R>(&mut self, rng: &mut R) -> Result<&Displayed, GenerationError>
    where
        R: Rng + CryptoRng,
    {
        let displayed = match build_pool(&self.config) {
            Ok(pool) => Displayed::Password(generate_random_password(
                rng,
                &pool,
                self.config.length,
            )?),
            Err(GenerationError::NoCharacterClasses) => {
                tracing::info!("generation requested with no character classes enabled");
                Displayed::Error(NO_CHARACTER_CLASSES_MESSAGE)
            }
            Err(err) => return Err(err),
        };
        Ok(&*self.displayed.insert(displayed))
    }

    pub fn displayed(&self) -> Option<&Displayed> {
        self.displayed.as_ref()
    }

    /// The text of the password field; empty before the first generation.
    pub fn display_text(&self) -> &str {
        self.displayed.as_ref().map_or("", Displayed::as_str)
    }

    /// The strength of whatever the field shows, or `None` if it is empty.
    pub fn strength(&self) -> Option<Strength> {
        let text = self.display_text();
        if text.is_empty() {
            None
        } else {
            Some(strength::rate(text))
        }
    }

    /// Put the field's text, verbatim, on the clipboard.
    pub fn copy_to<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> anyhow::Result<()> {
        clipboard.write_text(self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn starts_empty_with_no_strength() {
        let session = GeneratorSession::default();
        assert_eq!(session.display_text(), "");
        assert_eq!(session.strength(), None);
        assert_eq!(session.config(), &GeneratorConfig::default());
    }

    #[test]
    fn strength_follows_the_field() {
        let mut session = GeneratorSession::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.generate(&mut rng).unwrap();
        let text = session.display_text().to_owned();
        assert_eq!(session.strength(), Some(strength::rate(&text)));

        session.toggle_class(CharacterClass::Uppercase);
        session.toggle_class(CharacterClass::Digits);
        session.toggle_class(CharacterClass::Symbols);
        session.set_length(6).unwrap();
        session.generate(&mut rng).unwrap();
        // 6 lowercase letters: has-lower only
        assert_eq!(session.strength(), Some(Strength::Weak));
    }

    #[test]
    fn toggle_flips() {
        let mut session = GeneratorSession::default();
        session.toggle_class(CharacterClass::Symbols);
        assert!(!session.config().include_symbols);
        session.toggle_class(CharacterClass::Symbols);
        assert!(session.config().include_symbols);
    }
}
