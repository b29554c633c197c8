//! # Generators and Validators
//!
//! Password generation and strength scoring, and bulk random integers.
//!
//! Generators take any `rand::Rng` so callers choose the randomness.
//! [`secure_rng`](crate::random::secure_rng) is the production choice; it
//! is a CSPRNG, so generated passwords are safe to use.

use std::collections::BTreeSet;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

pub const MIN_PASSWORD_LENGTH: usize = 4;
pub const MAX_PASSWORD_LENGTH: usize = 128;
/// Upper bound on `count` for random integers
pub const MAX_RANDOM_COUNT: u32 = 1000;

// =============================================================================
// Password Generator
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordOptions {
    pub length: usize,
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default)]
    pub lowercase: bool,
    #[serde(default)]
    pub digits: bool,
    #[serde(default)]
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

impl PasswordOptions {
    /// Concatenation of the selected character classes.
    pub fn pool(&self) -> Vec<char> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .iter()
        .filter(|(selected, _)| *selected)
        .flat_map(|(_, chars)| chars.chars())
        .collect()
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.uppercase || self.lowercase || self.digits || self.symbols) {
            return Err(CalcError::invalid_input(
                "character_sets",
                "none",
                "Select at least one character set",
            ));
        }
        if self.length < MIN_PASSWORD_LENGTH || self.length > MAX_PASSWORD_LENGTH {
            return Err(CalcError::invalid_input(
                "length",
                self.length.to_string(),
                format!(
                    "Length must be between {} and {}",
                    MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
                ),
            ));
        }
        Ok(())
    }
}

/// Draw `length` characters independently and uniformly from the pool.
pub fn generate_password<R: Rng + ?Sized>(options: &PasswordOptions, rng: &mut R) -> CalcResult<String> {
    options.validate()?;
    let pool = options.pool();
    Ok((0..options.length)
        .map(|_| pool[rng.random_range(0..pool.len())])
        .collect())
}

// =============================================================================
// Password Strength
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthBand {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=24 => StrengthBand::VeryWeak,
            25..=49 => StrengthBand::Weak,
            50..=69 => StrengthBand::Moderate,
            70..=89 => StrengthBand::Strong,
            _ => StrengthBand::VeryStrong,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StrengthBand::VeryWeak => "Very Weak",
            StrengthBand::Weak => "Weak",
            StrengthBand::Moderate => "Moderate",
            StrengthBand::Strong => "Strong",
            StrengthBand::VeryStrong => "Very Strong",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordStrengthInput {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PasswordStrength {
    /// 0..=100
    pub score: u32,
    pub band: StrengthBand,
    /// Hints for improving the password
    pub feedback: Vec<String>,
}

/// Score a password with the weighted rule set.
///
/// Length ≥ 8: +10, ≥ 12: +15, ≥ 16: +20. Each character class: +10.
/// Using 2/3/4 classes: +5/+10/+15. Capped at 100, and at 20 when the
/// password is shorter than 8 characters.
pub fn password_strength(input: &PasswordStrengthInput) -> PasswordStrength {
    let password = &input.password;
    let length = password.chars().count();
    let mut feedback = Vec::new();
    let mut score = 0u32;

    if length >= 8 {
        score += 10;
    } else {
        feedback.push("Use at least 8 characters".to_string());
    }
    if length >= 12 {
        score += 15;
    } else if length >= 8 {
        feedback.push("12 or more characters is much stronger".to_string());
    }
    if length >= 16 {
        score += 20;
    }

    let classes = [
        (password.chars().any(|c| c.is_ascii_uppercase()), "Add uppercase letters"),
        (password.chars().any(|c| c.is_ascii_lowercase()), "Add lowercase letters"),
        (password.chars().any(|c| c.is_ascii_digit()), "Add digits"),
        (
            password.chars().any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace()),
            "Add symbols",
        ),
    ];
    let mut present = 0;
    for (has, hint) in classes {
        if has {
            present += 1;
            score += 10;
        } else {
            feedback.push(hint.to_string());
        }
    }
    score += match present {
        2 => 5,
        3 => 10,
        4 => 15,
        _ => 0,
    };

    score = score.min(100);
    if length < 8 {
        score = score.min(20);
    }

    PasswordStrength {
        score,
        band: StrengthBand::from_score(score),
        feedback,
    }
}

// =============================================================================
// Random Integers
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomIntegersInput {
    pub min: i64,
    pub max: i64,
    pub count: u32,
    /// Draw without repetition
    #[serde(default)]
    pub unique: bool,
}

impl RandomIntegersInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.min > self.max {
            return Err(CalcError::invalid_input(
                "min",
                self.min.to_string(),
                "Minimum must not exceed maximum",
            ));
        }
        if self.count == 0 || self.count > MAX_RANDOM_COUNT {
            return Err(CalcError::invalid_input(
                "count",
                self.count.to_string(),
                format!("Count must be between 1 and {}", MAX_RANDOM_COUNT),
            ));
        }
        let span = self.max as i128 - self.min as i128 + 1;
        if self.unique && span < self.count as i128 {
            return Err(CalcError::invalid_input(
                "count",
                self.count.to_string(),
                format!("Only {} distinct values exist in the range", span),
            ));
        }
        Ok(())
    }
}

/// `count` uniform integers in `[min, max]`.
///
/// Unique draws sample distinct offsets from `min` without replacement.
pub fn random_integers<R: Rng + ?Sized>(input: &RandomIntegersInput, rng: &mut R) -> CalcResult<Vec<i64>> {
    input.validate()?;
    let count = input.count as usize;
    let range = input.min..=input.max;

    if !input.unique {
        return Ok((0..count).map(|_| rng.random_range(range.clone())).collect());
    }

    let span = input.max as i128 - input.min as i128 + 1;
    match usize::try_from(span) {
        Ok(len) => Ok(index::sample(rng, len, count)
            .into_iter()
            .map(|offset| (input.min as i128 + offset as i128) as i64)
            .collect()),
        // Span wider than usize: collisions are vanishingly rare, so reject repeats
        Err(_) => {
            let mut seen = BTreeSet::new();
            let mut values = Vec::with_capacity(count);
            while values.len() < count {
                let v = rng.random_range(range.clone());
                if seen.insert(v) {
                    values.push(v);
                }
            }
            Ok(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::{seeded, NeverDraw};

    #[test]
    fn test_no_character_sets_rejected_before_draw() {
        let options = PasswordOptions {
            length: 12,
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        };
        let err = generate_password(&options, &mut NeverDraw).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_generated_password_uses_pool() {
        let options = PasswordOptions {
            length: 32,
            uppercase: false,
            lowercase: false,
            digits: true,
            symbols: false,
        };
        let password = generate_password(&options, &mut seeded(9)).unwrap();
        assert_eq!(password.chars().count(), 32);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_password_length_bounds() {
        let options = PasswordOptions {
            length: 2,
            ..PasswordOptions::default()
        };
        assert!(generate_password(&options, &mut NeverDraw).is_err());
    }

    #[test]
    fn test_pool_size() {
        assert_eq!(PasswordOptions::default().pool().len(), 26 + 26 + 10 + SYMBOLS.len());
    }

    fn score(password: &str) -> PasswordStrength {
        password_strength(&PasswordStrengthInput {
            password: password.to_string(),
        })
    }

    #[test]
    fn test_short_password_capped() {
        let result = score("aB3$");
        // 4 classes would be 55, but length < 8 caps at 20
        assert_eq!(result.score, 20);
        assert_eq!(result.band, StrengthBand::VeryWeak);
    }

    #[test]
    fn test_strength_scoring() {
        // 8 chars lowercase + digits: 10 + 10 + 10 + 5 = 35
        assert_eq!(score("abcd1234").score, 35);
        assert_eq!(score("abcd1234").band, StrengthBand::Weak);
        // 12 chars, 4 classes: 10 + 15 + 40 + 15 = 80
        assert_eq!(score("Abcdefgh12#$").band, StrengthBand::Strong);
        // 16 chars, 4 classes: 100
        let strong = score("Abcdefgh12#$wxyz");
        assert_eq!(strong.score, 100);
        assert_eq!(strong.band, StrengthBand::VeryStrong);
        assert!(strong.feedback.is_empty());
    }

    #[test]
    fn test_random_integers_in_range() {
        let input = RandomIntegersInput {
            min: 1,
            max: 6,
            count: 500,
            unique: false,
        };
        let values = random_integers(&input, &mut seeded(11)).unwrap();
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| (1..=6).contains(v)));
    }

    #[test]
    fn test_random_integers_unique() {
        let input = RandomIntegersInput {
            min: 1,
            max: 10,
            count: 10,
            unique: true,
        };
        let mut values = random_integers(&input, &mut seeded(5)).unwrap();
        values.sort_unstable();
        assert_eq!(values, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_integers_validation() {
        let bad_range = RandomIntegersInput {
            min: 5,
            max: 1,
            count: 1,
            unique: false,
        };
        assert!(random_integers(&bad_range, &mut NeverDraw).is_err());

        let too_many = RandomIntegersInput {
            min: 0,
            max: 100,
            count: 1001,
            unique: false,
        };
        assert!(random_integers(&too_many, &mut NeverDraw).is_err());

        let not_enough_values = RandomIntegersInput {
            min: 0,
            max: 2,
            count: 4,
            unique: true,
        };
        assert!(random_integers(&not_enough_values, &mut NeverDraw).is_err());
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let input = RandomIntegersInput {
            min: -50,
            max: 50,
            count: 20,
            unique: false,
        };
        let first = random_integers(&input, &mut seeded(7)).unwrap();
        let second = random_integers(&input, &mut seeded(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unique_draws_over_full_range() {
        let input = RandomIntegersInput {
            min: i64::MIN,
            max: i64::MAX,
            count: 50,
            unique: true,
        };
        let mut values = random_integers(&input, &mut seeded(3)).unwrap();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 50);
    }

    #[test]
    fn test_unique_draws_small_span() {
        let input = RandomIntegersInput {
            min: 100,
            max: 104,
            count: 3,
            unique: true,
        };
        let values = random_integers(&input, &mut seeded(21)).unwrap();
        let distinct: BTreeSet<i64> = values.iter().copied().collect();
        assert_eq!(distinct.len(), 3);
        assert!(values.iter().all(|v| (100..=104).contains(v)));
    }
}
