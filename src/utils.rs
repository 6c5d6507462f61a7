use chrono::{DateTime, TimeZone, Utc};

use crate::errors::AppError;

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Midnight UTC of the given calendar day.
pub fn utc_date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, AppError> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::internal(format!("invalid date {year}-{month:02}-{day:02}")))
}

/// `GENERAL_MEDICINE` -> `General Medicine`
pub fn humanize(code: &str) -> String {
    code.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Basic form check: exactly one `@` with something on each side, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}
