//! Utilities for generating passwords.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::character_classes::{build_pool, CharacterPool, GeneratorConfig};
use crate::{GenerationError, Secret};

/// Generate a password by independently sampling `len` characters from the pool.
///
/// Repeats are allowed, adjacent ones included. `len` is not limited to the range the UI allows;
/// any positive length works.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
pub fn generate_random_password<R>(
    rng: &mut R,
    pool: &CharacterPool,
    len: usize,
) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    if len == 0 {
        return Err(GenerationError::ZeroLength);
    }
    let mut secret = String::with_capacity(len);
    for _ in 0..len {
        let ch = pool
            .as_slice()
            .choose(rng)
            .ok_or(GenerationError::EmptyPool)?;
        secret.push(*ch);
    }
    tracing::debug!(len, pool_size = pool.len(), "generated password");
    Ok(Secret(secret))
}

/// Build the pool for `config` and sample a password of `config.length` from it, using the
/// thread-local CSPRNG.
pub fn generate(config: &GeneratorConfig) -> Result<Secret, GenerationError> {
    let pool = build_pool(config)?;
    generate_random_password(&mut rand::thread_rng(), &pool, config.length)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::CharacterClass;

    fn all_configs() -> Vec<GeneratorConfig> {
        (1u8..16)
            .map(|mask| {
                let mut config = GeneratorConfig::default();
                for (bit, class) in CharacterClass::ALL.into_iter().enumerate() {
                    config.set_enabled(class, mask & (1 << bit) != 0);
                }
                config
            })
            .collect()
    }

    #[test]
    fn length_and_membership_hold_for_every_class_combination() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for config in all_configs() {
            let pool = build_pool(&config).unwrap();
            for len in [1, 6, 12, 30, 100] {
                let password = generate_random_password(&mut rng, &pool, len).unwrap();
                assert_eq!(password.len(), len);
                assert!(password.as_str().chars().all(|ch| pool.contains(ch)));
            }
        }
    }

    #[test]
    fn symbols_only_length_6() {
        let mut config = GeneratorConfig::default();
        config.include_uppercase = false;
        config.include_lowercase = false;
        config.include_numbers = false;
        config.set_length(6).unwrap();
        let password = generate(&config).unwrap();
        assert_eq!(password.len(), 6);
        assert!(password
            .as_str()
            .chars()
            .all(|ch| CharacterClass::Symbols.chars().contains(ch)));
    }

    #[test]
    fn single_char_pool_repeats() {
        let pool = CharacterPool::from_chars(['x']);
        let mut rng = StdRng::seed_from_u64(1);
        let password = generate_random_password(&mut rng, &pool, 8).unwrap();
        assert_eq!(password.as_str(), "xxxxxxxx");
    }

    #[test]
    fn every_pool_char_is_reachable() {
        let pool = build_pool(&GeneratorConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let password = generate_random_password(&mut rng, &pool, 10_000).unwrap();
        for ch in pool.as_slice() {
            assert!(password.as_str().contains(*ch), "never sampled {ch:?}");
        }
    }

    #[test]
    fn zero_length_fails() {
        let pool = build_pool(&GeneratorConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            generate_random_password(&mut rng, &pool, 0),
            Err(GenerationError::ZeroLength)
        );
    }

    #[test]
    fn empty_pool_fails() {
        let pool = CharacterPool::from_chars(Vec::new());
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            generate_random_password(&mut rng, &pool, 12),
            Err(GenerationError::EmptyPool)
        );
    }

    #[test]
    fn no_classes_fails_before_sampling() {
        let mut config = GeneratorConfig::default();
        for class in CharacterClass::ALL {
            config.set_enabled(class, false);
        }
        assert_eq!(generate(&config), Err(GenerationError::NoCharacterClasses));
    }
}
