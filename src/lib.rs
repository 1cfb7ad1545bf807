//! Random password generation from selectable character classes, with a coarse strength rating.

pub mod character_classes;
pub mod clipboard;
pub mod password_generation;
pub mod session;
pub mod strength;

pub use character_classes::{build_pool, CharacterClass, CharacterPool, GeneratorConfig};
pub use session::{Displayed, GeneratorSession};
pub use strength::Strength;

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no character classes are enabled; at least one is required")]
    NoCharacterClasses,
    #[error("cannot sample a password from an empty character pool")]
    EmptyPool,
    #[error("a password must be at least one character long")]
    ZeroLength,
    #[error(
        "password length {length} is out of range (must be between {} and {})",
        GeneratorConfig::MIN_LENGTH,
        GeneratorConfig::MAX_LENGTH
    )]
    LengthOutOfRange { length: usize },
}

/// A generated password.
///
/// The `Debug` impl is opaque, so a `Secret` can sit inside structs that get logged without the
/// password ending up in the log.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
