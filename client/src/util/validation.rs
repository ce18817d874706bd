//! Local form validation run before any network call.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::LazyLock;

use regex::Regex;

use crate::net::types::{Address, Role, SignupProfile};

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "@$!%*?&";

pub const VERIFICATION_CODE_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{7,14}$").expect("phone regex"));
static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\d@$!%*?&]+$").expect("password charset regex"));

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// The five independent password predicates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordChecks {
    pub min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_number: bool,
    pub has_special: bool,
}

/// A requirement the password does not meet yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordRequirement {
    MinLength,
    Uppercase,
    Lowercase,
    Special,
    Number,
}

impl PasswordRequirement {
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::MinLength => "Password must be at least 8 characters",
            Self::Uppercase => "Add at least 1 uppercase letter (A-Z)",
            Self::Lowercase => "Add at least 1 lowercase letter (a-z)",
            Self::Special => "Add at least 1 special character (@$!%*?&)",
            Self::Number => "Add at least 1 number (0-9)",
        }
    }
}

impl PasswordChecks {
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= 8,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    /// Number of satisfied predicates, 0..=5, for the strength meter.
    #[must_use]
    pub fn strength(self) -> usize {
        [self.min_length, self.has_uppercase, self.has_lowercase, self.has_number, self.has_special]
            .into_iter()
            .filter(|ok| *ok)
            .count()
    }

    #[must_use]
    pub fn is_strong(self) -> bool {
        self.strength() == 5
    }

    /// First unmet requirement in display order.
    #[must_use]
    pub fn first_missing(self) -> Option<PasswordRequirement> {
        [
            (self.min_length, PasswordRequirement::MinLength),
            (self.has_uppercase, PasswordRequirement::Uppercase),
            (self.has_lowercase, PasswordRequirement::Lowercase),
            (self.has_special, PasswordRequirement::Special),
            (self.has_number, PasswordRequirement::Number),
        ]
        .into_iter()
        .find_map(|(ok, req)| (!ok).then_some(req))
    }
}

/// Keep digits only, truncated to six.
#[must_use]
pub fn normalize_code_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(VERIFICATION_CODE_LEN)
        .collect()
}

/// # Errors
///
/// Returns the inline message when the code is not exactly six digits.
pub fn validate_verification_code(code: &str) -> Result<(), &'static str> {
    if code.len() == VERIFICATION_CODE_LEN && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Please enter a valid 6-digit verification code")
    }
}

// =============================================================================
// Full-profile signup form
// =============================================================================

/// Raw field values of the single-phase signup form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
    pub zip: String,
    /// Comma-separated.
    pub skills: String,
    pub bio: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Validate every field, collecting all failures.
///
/// # Errors
///
/// Returns the list of field errors when any rule fails.
pub fn validate_profile(form: &ProfileForm) -> Result<SignupProfile, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut check = |ok: bool, field: &'static str, message: &'static str| {
        if !ok {
            errors.push(FieldError { field, message });
        }
    };

    check(form.username.chars().count() >= 3, "username", "Username must be at least 3 characters");
    check(is_valid_email(&form.email), "email", "Invalid email address");
    check(form.password.chars().count() >= 8, "password", "Password must be at least 8 characters");
    check(
        PasswordChecks::evaluate(&form.password).is_strong() && PASSWORD_CHARSET_RE.is_match(&form.password),
        "password",
        "Password must contain uppercase, lowercase, number and special character",
    );
    check(form.password == form.confirm_password, "confirmPassword", "Passwords don't match");
    check(form.first_name.chars().count() >= 2, "firstName", "First name must be at least 2 characters");
    check(form.last_name.chars().count() >= 2, "lastName", "Last name must be at least 2 characters");
    check(PHONE_RE.is_match(&form.phone), "phone", "Invalid phone number");
    let role = parse_role(&form.role);
    check(role.is_some(), "role", "Role must be freelancer or client");
    check(form.country.chars().count() >= 2, "country", "Country must be at least 2 characters");
    check(form.state.chars().count() >= 2, "state", "State must be at least 2 characters");
    check(form.city.chars().count() >= 2, "city", "City must be at least 2 characters");
    check(form.street.chars().count() >= 5, "street", "Street address must be at least 5 characters");
    check(form.zip.chars().count() >= 2, "zip", "ZIP code must be at least 2 characters");
    let skills = split_skills(&form.skills);
    check(!skills.is_empty(), "skills", "At least one skill is required");
    check(form.bio.chars().count() <= 500, "bio", "Bio must not exceed 500 characters");

    match role {
        Some(role) if errors.is_empty() => Ok(SignupProfile {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            phone: form.phone.clone(),
            role,
            address: Address {
                country: form.country.clone(),
                state: form.state.clone(),
                city: form.city.clone(),
                street: form.street.clone(),
                zip: form.zip.clone(),
            },
            skills,
            bio: Some(form.bio.trim().to_owned()).filter(|b| !b.is_empty()),
        }),
        _ => Err(errors),
    }
}

fn parse_role(raw: &str) -> Option<Role> {
    match raw {
        "freelancer" => Some(Role::Freelancer),
        "client" => Some(Role::Client),
        _ => None,
    }
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
