use crate::error::ClubDashError;

pub const MAX_TICKER_LENGTH: usize = 10;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ClubDashError> {
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(ClubDashError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    if sanitized.len() > max_len {
        return Err(ClubDashError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(sanitized)
}

/// Validate a ticker symbol: sanitize, uppercase, and allow only letters,
/// digits, `.` and `-` (e.g. `BRK.B`, `RDS-A`).
pub fn validate_ticker(input: &str) -> Result<String, ClubDashError> {
    let upper = sanitize_text(input, MAX_TICKER_LENGTH)?.to_uppercase();
    if upper
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        Ok(upper)
    } else {
        Err(ClubDashError::InvalidInput(format!(
            "invalid ticker '{}': use letters, digits, '.' or '-'",
            upper
        )))
    }
}
