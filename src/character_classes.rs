//! The fixed character classes, and building a sampling pool from the enabled ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GenerationError;

static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static DIGITS: &str = "0123456789";
static SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharacterClass {
    /// Every class, in the order they are concatenated into a pool.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digits,
        CharacterClass::Symbols,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digits => DIGITS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "Uppercase",
            CharacterClass::Lowercase => "Lowercase",
            CharacterClass::Digits => "Numbers",
            CharacterClass::Symbols => "Symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which classes to sample from, and how long the password should be.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl GeneratorConfig {
    pub const MIN_LENGTH: usize = 6;
    pub const MAX_LENGTH: usize = 30;
    pub const DEFAULT_LENGTH: usize = 12;

    pub fn set_length(&mut self, length: usize) -> Result<(), GenerationError> {
        Self::check_length(length)?;
        self.length = length;
        Ok(())
    }

    pub fn check_length(length: usize) -> Result<(), GenerationError> {
        if (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Ok(())
        } else {
            Err(GenerationError::LengthOutOfRange { length })
        }
    }

    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.include_uppercase,
            CharacterClass::Lowercase => self.include_lowercase,
            CharacterClass::Digits => self.include_numbers,
            CharacterClass::Symbols => self.include_symbols,
        }
    }

    pub fn set_enabled(&mut self, class: CharacterClass, enabled: bool) {
        let flag = match class {
            CharacterClass::Uppercase => &mut self.include_uppercase,
            CharacterClass::Lowercase => &mut self.include_lowercase,
            CharacterClass::Digits => &mut self.include_numbers,
            CharacterClass::Symbols => &mut self.include_symbols,
        };
        *flag = enabled;
    }

    pub fn enabled_classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.is_enabled(*class))
    }
}

impl Default for GeneratorConfig {
    fn default() -> GeneratorConfig {
        GeneratorConfig {
            length: Self::DEFAULT_LENGTH,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

/// The characters a password is sampled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool(Vec<char>);

impl CharacterPool {
    /// A pool from an arbitrary alphabet. Unlike [`build_pool`], this does not reject an empty
    /// alphabet; sampling from one fails instead.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> CharacterPool {
        CharacterPool(chars.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }
}

/// Concatenate the enabled classes, in [`CharacterClass::ALL`] order.
///
/// Fails with [`GenerationError::NoCharacterClasses`] if nothing is enabled; callers are expected
/// to show that to the user rather than generate anything.
pub fn build_pool(config: &GeneratorConfig) -> Result<CharacterPool, GenerationError> {
    let pool = CharacterPool::from_chars(
        config
            .enabled_classes()
            .flat_map(|class| class.chars().chars()),
    );
    if pool.is_empty() {
        return Err(GenerationError::NoCharacterClasses);
    }
    tracing::debug!(pool_size = pool.len(), "built character pool");
    Ok(pool)
}
