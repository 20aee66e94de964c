use crate::countymap::*;

/// FIPS codes are five digits. Exports may drop the leading zero or add a
/// decimal part (1001.0), both are fixed here.
pub fn normalize_fips(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_suffix(".0").unwrap_or(s);
    if !s.is_empty() && s.len() < 5 && s.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>5}", s)
    } else {
        s.to_string()
    }
}

pub fn finite(x: Option<f64>) -> Option<f64> {
    x.filter(|v| v.is_finite())
}

/// A vote count. Missing values count as zero.
pub fn parse_count(x: Option<f64>, lineno: usize, column: &str) -> CmResult<u64> {
    match x {
        None => Ok(0),
        Some(v) if v.is_nan() => Ok(0),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v.round() as u64),
        Some(v) => InvalidValueSnafu {
            lineno,
            column,
            content: v.to_string(),
        }
        .fail(),
    }
}

pub fn parse_year(x: Option<f64>, lineno: usize) -> CmResult<u16> {
    match x {
        Some(v) if v.is_finite() && v >= 0.0 && v <= u16::MAX as f64 && v.fract() == 0.0 => {
            Ok(v as u16)
        }
        Some(v) if v.is_nan() => MissingValueSnafu {
            lineno,
            column: "year",
        }
        .fail(),
        Some(v) => InvalidValueSnafu {
            lineno,
            column: "year",
            content: v.to_string(),
        }
        .fail(),
        None => MissingValueSnafu {
            lineno,
            column: "year",
        }
        .fail(),
    }
}
