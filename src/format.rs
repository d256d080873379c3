//! Text rendering of derived figures.

pub const DEFAULT_PRECISION: usize = 2;

/// Formats `value` with `precision` decimals, dropping trailing zeros and a
/// trailing decimal point: `200.00` becomes `200`, `69.2307` becomes `69.23`.
pub fn format_decimal(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats an optional figure, printing `n/a` when it is indeterminate.
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format_decimal(v, precision),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(200.0, 2), "200");
        assert_eq!(format_decimal(69.230769, 2), "69.23");
        assert_eq!(format_decimal(70.588235, 2), "70.59");
        assert_eq!(format_decimal(12.5, 2), "12.5");
        assert_eq!(format_decimal(1.0 / 3.0, 0), "0");
        assert_eq!(format_decimal(-0.001, 2), "0");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(None, 2), "n/a");
        assert_eq!(format_optional(Some(0.5), 2), "0.5");
    }
}
