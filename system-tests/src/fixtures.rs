// system-tests/src/fixtures.rs
// ============================================================================
// Module: User Fixtures
// Description: Randomized user records and well-known ReqRes identities.
// Purpose: Supply request payloads for the user-management scenarios.
// Dependencies: rand, serde, serde_json
// ============================================================================

//! ## Overview
//! [`UserFactory`] turns any [`FakeSource`] into [`UserFixture`] records.
//! [`RandomFaker`] is the default source; it is generic over [`Rng`] so
//! tests can seed it.
//! Invariants:
//! - `name`, `job`, and `password` are never blank.
//! - `email` is at most five ASCII alphanumerics followed by `@gmail.com`.
//! - Generated passwords are 10 to 16 characters and mix lower case, upper
//!   case, digits, and symbols.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Well-Known Identities
// ============================================================================

/// Email the API accepts for registration.
pub const VALID_USER_EMAIL: &str = "eve.holt@reqres.in";

/// Password paired with [`VALID_USER_EMAIL`].
pub const VALID_USER_PASSWORD: &str = "pistol";

/// A user id the API serves.
pub const EXISTING_USER_ID: u64 = 2;

/// A user id the API answers with 404.
pub const NON_EXISTENT_USER_ID: u64 = 999;

/// Domain appended to every generated email.
pub const FIXTURE_EMAIL_DOMAIN: &str = "gmail.com";

/// Maximum characters kept from a faked email local part.
const EMAIL_LOCAL_LEN: usize = 5;

/// Generated password length bounds (inclusive).
const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 10..=16;

/// Lower-case password alphabet without look-alikes.
const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
/// Upper-case password alphabet without look-alikes.
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
/// Password digits without look-alikes.
const DIGITS: &[u8] = b"23456789";
/// Password symbols.
const SYMBOLS: &[u8] = b"!@#$%^&*_-";

/// Given names for fake users.
const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Bruno", "Chen", "Dana", "Elif", "Farah", "Grace", "Hiro", "Imani",
    "Jonas", "Kofi", "Lena", "Mateo", "Nadia", "Omar", "Priya", "Quinn", "Rosa", "Sami", "Tariq",
    "Uma", "Viktor", "Wen", "Yara", "Zane",
];

/// Family names used in fake email local parts.
const LAST_NAMES: &[&str] = &[
    "Adeyemi", "Bauer", "Castillo", "Dubois", "Eriksen", "Fischer", "Gupta", "Haddad", "Ivanova",
    "Johansson", "Kim", "Lopez", "Moreau", "Nakamura", "Okafor", "Petrov", "Rossi", "Silva",
    "Tanaka", "Walsh",
];

/// Job titles for fake users.
const JOB_TITLES: &[&str] = &[
    "Accountant",
    "Architect",
    "Barista",
    "Civil engineer",
    "Data analyst",
    "Dentist",
    "Electrician",
    "Firefighter",
    "Graphic designer",
    "Journalist",
    "Librarian",
    "Marine biologist",
    "Nurse",
    "Pharmacist",
    "Pilot",
    "Product manager",
    "Software engineer",
    "Surveyor",
    "Tutor",
    "Translator",
];

// ============================================================================
// SECTION: Fake Sources
// ============================================================================

/// Supplies raw fake values; [`UserFactory`] shapes them into fixtures.
pub trait FakeSource {
    /// Returns a given name.
    fn first_name(&mut self) -> String;
    /// Returns the part of a fake email address before `@`.
    fn email_local_part(&mut self) -> String;
    /// Returns a job title.
    fn job_title(&mut self) -> String;
    /// Returns a password.
    fn password(&mut self) -> String;
}

/// Word-list backed faker driven by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomFaker<R> {
    /// Randomness source.
    rng: R,
}

impl<R: Rng> RandomFaker<R> {
    /// Wraps a random number generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
        }
    }

    /// Picks one entry from a non-empty word list.
    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// Picks one byte from a non-empty alphabet as a char.
    fn pick_char(&mut self, alphabet: &[u8]) -> char {
        alphabet.choose(&mut self.rng).map_or('x', |byte| char::from(*byte))
    }
}

impl<R: Rng> FakeSource for RandomFaker<R> {
    fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    fn email_local_part(&mut self) -> String {
        let first = self.pick(FIRST_NAMES).to_ascii_lowercase();
        let last = self.pick(LAST_NAMES).to_ascii_lowercase();
        match self.rng.gen_range(0..3) {
            0 => format!("{first}.{last}"),
            1 => format!("{first}{last}"),
            _ => {
                let initial = first.chars().next().unwrap_or('x');
                format!("{initial}{last}{}", self.rng.gen_range(10..100))
            }
        }
    }

    fn job_title(&mut self) -> String {
        self.pick(JOB_TITLES).to_string()
    }

    fn password(&mut self) -> String {
        let len = self.rng.gen_range(PASSWORD_LEN);
        let mut chars = vec![
            self.pick_char(LOWER),
            self.pick_char(UPPER),
            self.pick_char(DIGITS),
            self.pick_char(SYMBOLS),
        ];
        let pools = [LOWER, UPPER, DIGITS, SYMBOLS];
        while chars.len() < len {
            let pool = pools.choose(&mut self.rng).copied().unwrap_or(LOWER);
            chars.push(self.pick_char(pool));
        }
        chars.shuffle(&mut self.rng);
        chars.into_iter().collect()
    }
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// A generated user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFixture {
    /// Display name.
    pub name: String,
    /// Email address on [`FIXTURE_EMAIL_DOMAIN`].
    pub email: String,
    /// Job title.
    pub job: String,
    /// Password.
    pub password: String,
}

impl UserFixture {
    /// Returns the record as a JSON object with all four fields.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "job": self.job,
            "password": self.password,
        })
    }

    /// Returns the `{name, job}` body used for updates.
    #[must_use]
    pub fn profile_json(&self) -> Value {
        json!({
            "name": self.name,
            "job": self.job,
        })
    }
}

/// Builds [`UserFixture`] values from a [`FakeSource`].
#[derive(Debug, Clone)]
pub struct UserFactory<F> {
    /// Raw value source.
    source: F,
}

impl<F: FakeSource> UserFactory<F> {
    /// Wraps a fake source.
    #[must_use]
    pub const fn new(source: F) -> Self {
        Self {
            source,
        }
    }

    /// Generates one user.
    pub fn generate(&mut self) -> UserFixture {
        let name = non_blank(self.source.first_name(), "Alex");
        let local = email_local(&self.source.email_local_part());
        let job = non_blank(self.source.job_title(), "Tester");
        let password = non_blank(self.source.password(), "Fallback#2024");
        UserFixture {
            name,
            email: format!("{local}@{FIXTURE_EMAIL_DOMAIN}"),
            job,
            password,
        }
    }
}

/// Generates one user from the thread-local random number generator.
#[must_use]
pub fn generate_user() -> UserFixture {
    UserFactory::new(RandomFaker::new(rand::thread_rng())).generate()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Keeps the first five ASCII alphanumerics of a faked local part.
fn email_local(raw: &str) -> String {
    let local: String = raw
        .chars()
        .take_while(|ch| *ch != '@')
        .filter(char::is_ascii_alphanumeric)
        .take(EMAIL_LOCAL_LEN)
        .collect::<String>()
        .to_ascii_lowercase();
    if local.is_empty() { String::from("user") } else { local }
}

/// Trims `value` and substitutes `fallback` when nothing is left.
fn non_blank(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback.to_string() } else { trimmed.to_string() }
}
