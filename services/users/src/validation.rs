//! Input validation for account credentials

use regex::Regex;
use std::sync::OnceLock;

/// Symbols accepted (and one of which is required) in a password
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Extract both credential fields, rejecting absent or blank values
pub fn require_credentials<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), String> {
    match (username, password) {
        (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => Ok((u, p)),
        _ => Err("Please pass username and password.".to_string()),
    }
}

/// Validate password complexity
///
/// At least eight characters drawn from letters, digits and
/// [`PASSWORD_SYMBOLS`], with at least one of each: lowercase, uppercase,
/// digit, symbol.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }

    static CHARSET_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CHARSET_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9@$!%*?&]+$").expect("Failed to compile password regex")
    });

    if !regex.is_match(password) {
        return Err(format!(
            "Password may only contain letters, digits and the symbols {}",
            PASSWORD_SYMBOLS
        ));
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_symbol = false;

    for c in password.chars() {
        if c.is_ascii_uppercase() {
            has_upper = true;
        } else if c.is_ascii_lowercase() {
            has_lower = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if PASSWORD_SYMBOLS.contains(c) {
            has_symbol = true;
        }
    }

    if !has_lower {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !has_upper {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !has_digit {
        return Err("Password must contain at least one digit".to_string());
    }

    if !has_symbol {
        return Err(format!(
            "Password must contain at least one of {}",
            PASSWORD_SYMBOLS
        ));
    }

    Ok(())
}
