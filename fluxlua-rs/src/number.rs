//! Numeric helpers for the dual string/number representation.
//!
//! [`parse_number`] follows C `atof`: it reads the longest numeric prefix
//! and ignores whatever follows, and a string with no numeric prefix is
//! `0.0`.  This is what lets every leaf value be read as a number without
//! the caller inspecting its type first.

/// Best-effort numeric parse of `s`.
///
/// Accepted prefixes (after leading whitespace, with an optional sign):
/// decimal floats (`12`, `-3.5`, `.5`, `1e10`) and hexadecimal floats
/// (`0x1F`, `0x1.8`, `0x1p4`).  `inf` / `infinity` / `nan`, in any case,
/// are accepted only as the entire string.
pub fn parse_number(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let (negative, body_start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let body = &s[body_start..];

    let magnitude = parse_special(body)
        .or_else(|| parse_hex(body))
        .or_else(|| parse_decimal(body))
        .unwrap_or(0.0);

    if negative { -magnitude } else { magnitude }
}

/// Render an integer table key.  Integer keys must round-trip exactly, so
/// they never go through float formatting.
pub fn format_integer_key(n: i64) -> String {
    n.to_string()
}

// ── Prefix scanners ───────────────────────────────────────────────────────────

/// `inf`, `infinity` and `nan` count only as the whole (trimmed) string,
/// so words such as `"Nancy"` or `"information"` stay non-numeric.
fn parse_special(body: &str) -> Option<f64> {
    let word = body.trim_end();
    if word.eq_ignore_ascii_case("inf") || word.eq_ignore_ascii_case("infinity") {
        Some(f64::INFINITY)
    } else if word.eq_ignore_ascii_case("nan") {
        Some(f64::NAN)
    } else {
        None
    }
}

/// Hexadecimal mantissa with optional fraction and binary exponent
/// (`0x1F`, `0x1.8`, `0x1p4`).
fn parse_hex(body: &str) -> Option<f64> {
    let rest = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"))?;
    let bytes = rest.as_bytes();

    let int_digits = count_hex_digits(bytes);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_hex_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        // "0x" alone: strtod consumes the "0" and stops.
        return Some(0.0);
    }

    // Accumulate in f64 so overlong literals saturate instead of failing.
    let mut mantissa = 0.0;
    for &b in &bytes[..int_digits] {
        mantissa = mantissa * 16.0 + hex_value(b);
    }
    let fraction: &[u8] = if frac_digits > 0 {
        &bytes[int_digits + 1..int_digits + 1 + frac_digits]
    } else {
        &[]
    };
    let mut scale = 1.0 / 16.0;
    for &b in fraction {
        mantissa += hex_value(b) * scale;
        scale /= 16.0;
    }

    // Binary exponent only counts when at least one digit follows it.
    let mut exponent = 0i32;
    if matches!(bytes.get(end), Some(b'p' | b'P')) {
        let mut exp_start = end + 1;
        let negative = match bytes.get(exp_start) {
            Some(b'-') => {
                exp_start += 1;
                true
            }
            Some(b'+') => {
                exp_start += 1;
                false
            }
            _ => false,
        };
        let exp_digits = count_digits(&bytes[exp_start.min(bytes.len())..]);
        if exp_digits > 0 {
            let magnitude = rest[exp_start..exp_start + exp_digits]
                .parse::<i32>()
                .unwrap_or(i32::MAX);
            exponent = if negative { -magnitude } else { magnitude };
        }
    }

    Some(mantissa * 2f64.powi(exponent))
}

fn count_hex_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_hexdigit()).count()
}

fn hex_value(b: u8) -> f64 {
    f64::from((b as char).to_digit(16).unwrap_or(0))
}

fn parse_decimal(body: &str) -> Option<f64> {
    let bytes = body.as_bytes();
    let mut end = 0;

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    body[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
