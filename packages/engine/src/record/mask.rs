const MASK_SUFFIX: &str = "******";

/// Masks a sensitive identifier before it is stored.
///
/// `YYMMDD` gains a `-0******` suffix, `YYMMDD-NNNNNNN` keeps its first eight
/// characters. Anything else, including an already masked value, is returned
/// unchanged.
pub fn mask_sensitive_id(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() == 6 && all_digits(bytes) {
        return format!("{value}-0{MASK_SUFFIX}");
    }
    if bytes.len() == 14 && bytes[6] == b'-' && all_digits(&bytes[..6]) && all_digits(&bytes[7..])
    {
        return format!("{}{MASK_SUFFIX}", &value[..8]);
    }
    value.to_string()
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// Strips the hyphens an import may carry in a phone-style identifier.
pub fn normalize_secondary_id(value: &str) -> String {
    value.chars().filter(|ch| *ch != '-').collect()
}
