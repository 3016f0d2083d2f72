/// Validate a wallet address: `0x` followed by 40 hex digits.
pub fn validate_address(address: &str) -> Option<String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Some("page.connect.invalid_address".to_string());
    }
    match trimmed.strip_prefix("0x") {
        Some(hex) if hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()) => None,
        _ => Some("page.connect.invalid_address".to_string()),
    }
}

pub fn is_address(address: &str) -> bool {
    validate_address(address).is_none()
}
