//! Degree/minute/second strings.
//!
//! Accepts plain decimal degrees (`-12.5`), DMS notation with optional
//! hemisphere (`9d07'54.862"W`, `17d40'W`, `0dE`) and radians with an `r`
//! suffix (`0.5r`).

use crate::error::ProjError;

/// Parse an angle string and return radians.
pub fn dms_to_rad(input: &str) -> Result<f64, ProjError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let err = || ProjError::InvalidDms(input.to_owned());

    if let Ok(deg) = compact.parse::<f64>() {
        if !deg.is_finite() {
            return Err(err());
        }
        return Ok(deg.to_radians());
    }

    let mut rest = compact.as_str();
    let mut sign = 1.0;
    if let Some(r) = rest.strip_prefix('-') {
        sign = -1.0;
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
    }

    let mut degrees = 0.0;
    let mut stage = 0usize;
    let mut seen_number = false;

    loop {
        let (number, tail) = split_number(rest);
        if number.is_empty() {
            break;
        }
        let value: f64 = number.parse().map_err(|_| err())?;
        seen_number = true;

        let mut chars = tail.chars();
        match chars.next() {
            Some('d' | 'D' | '°') if stage == 0 => {
                degrees += value;
                stage = 1;
                rest = chars.as_str();
            }
            Some('\'') if stage <= 1 => {
                degrees += value / 60.0;
                stage = 2;
                rest = chars.as_str();
            }
            Some('"') if stage <= 2 => {
                degrees += value / 3600.0;
                stage = 3;
                rest = chars.as_str();
            }
            Some('r' | 'R') if stage == 0 => {
                let tail = chars.as_str();
                if !tail.is_empty() {
                    return Err(err());
                }
                return Ok(sign * value);
            }
            _ => {
                // A trailing number without a unit belongs to the next field.
                degrees += match stage {
                    0 => value,
                    1 => value / 60.0,
                    2 => value / 3600.0,
                    _ => return Err(err()),
                };
                rest = tail;
                break;
            }
        }
    }

    if !seen_number {
        return Err(err());
    }

    match rest {
        "" | "N" | "n" | "E" | "e" => {}
        "S" | "s" | "W" | "w" => sign = -sign,
        _ => return Err(err()),
    }

    Ok((sign * degrees).to_radians())
}

/// Split the leading unsigned decimal number off `s`.
fn split_number(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}
