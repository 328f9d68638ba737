/// Canonical form of a phone number used as the client dedup key.
///
/// Spaces, dashes, brackets and dots are dropped; a single leading `+` is kept.
/// Returns `None` when no digit is left.
pub fn canonical_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = trimmed.chars().filter(char::is_ascii_digit).collect::<String>();
    if digits.is_empty() {
        return None;
    }
    if trimmed.starts_with('+') {
        Some(format!("+{digits}"))
    } else {
        Some(digits)
    }
}
