//! A coarse strength rating from simple structural checks. This is not an entropy estimate.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    fn from_score(score: u8) -> Strength {
        match score {
            0..=2 => Strength::Weak,
            3..=4 => Strength::Medium,
            _ => Strength::Strong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point of the score. Each is worth at most one point, however many times it is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    MinLength8,
    MinLength12,
    HasUppercase,
    HasLowercase,
    HasDigit,
    HasSymbol,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::MinLength8,
        Criterion::MinLength12,
        Criterion::HasUppercase,
        Criterion::HasLowercase,
        Criterion::HasDigit,
        Criterion::HasSymbol,
    ];

    pub fn is_met_by(self, password: &str) -> bool {
        match self {
            Criterion::MinLength8 => password.chars().count() >= 8,
            Criterion::MinLength12 => password.chars().count() >= 12,
            Criterion::HasUppercase => password.chars().any(|ch| ch.is_ascii_uppercase()),
            Criterion::HasLowercase => password.chars().any(|ch| ch.is_ascii_lowercase()),
            Criterion::HasDigit => password.chars().any(|ch| ch.is_ascii_digit()),
            Criterion::HasSymbol => password.chars().any(|ch| !ch.is_ascii_alphanumeric()),
        }
    }

    /// What to do to satisfy this criterion.
    pub fn hint(self) -> &'static str {
        match self {
            Criterion::MinLength8 => "use at least 8 characters",
            Criterion::MinLength12 => "use at least 12 characters",
            Criterion::HasUppercase => "add an uppercase letter",
            Criterion::HasLowercase => "add a lowercase letter",
            Criterion::HasDigit => "add a digit",
            Criterion::HasSymbol => "add a symbol",
        }
    }
}

/// Number of criteria the password meets, from 0 to 6.
pub fn score(password: &str) -> u8 {
    Criterion::ALL
        .into_iter()
        .filter(|criterion| criterion.is_met_by(password))
        .count() as u8
}

pub fn rate(password: &str) -> Strength {
    Strength::from_score(score(password))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub score: u8,
    pub strength: Strength,
    pub unmet: Vec<Criterion>,
}

pub fn assess(password: &str) -> Assessment {
    let unmet = Criterion::ALL
        .into_iter()
        .filter(|criterion| !criterion.is_met_by(password))
        .collect::<Vec<_>>();
    let score = (Criterion::ALL.len() - unmet.len()) as u8;
    let strength = Strength::from_score(score);
    tracing::debug!(score, %strength, "assessed password");
    Assessment {
        score,
        strength,
        unmet,
    }
}
