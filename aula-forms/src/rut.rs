//! Chilean RUT (Rol Único Tributario) checksum.
//!
//! A RUT is a numeric body plus a modulo-11 check digit (`0`–`9` or `K`),
//! usually written `12.345.678-5`.

/// Longest accepted body, in digits.
const MAX_BODY_DIGITS: usize = 9;

/// Check digit for a RUT body.
pub fn check_digit(body: u32) -> char {
    let mut remaining = body;
    let mut sum = 0u32;
    let mut factor = 2;
    loop {
        sum += (remaining % 10) * factor;
        remaining /= 10;
        factor = if factor == 7 { 2 } else { factor + 1 };
        if remaining == 0 {
            break;
        }
    }
    match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        d => char::from_digit(d, 10).unwrap_or('0'),
    }
}

/// Split a RUT in any common notation into body and check digit.
/// Dots, spaces and the hyphen are ignored; `k` is accepted.
pub fn parse(input: &str) -> Option<(u32, char)> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .collect::<String>()
        .to_uppercase();
    let mut chars = cleaned.chars();
    let dv = chars.next_back()?;
    let body = chars.as_str();
    if body.is_empty()
        || body.len() > MAX_BODY_DIGITS
        || !body.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    if !(dv.is_ascii_digit() || dv == 'K') {
        return None;
    }
    Some((body.parse().ok()?, dv))
}

/// Whether `input` is a RUT with a correct check digit.
pub fn validate(input: &str) -> bool {
    parse(input).is_some_and(|(body, dv)| body > 0 && check_digit(body) == dv)
}

/// Canonical `12.345.678-5` form of a valid RUT.
pub fn format(input: &str) -> Option<String> {
    if !validate(input) {
        return None;
    }
    let (body, dv) = parse(input)?;
    let digits = body.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    Some(format!("{grouped}-{dv}"))
}
