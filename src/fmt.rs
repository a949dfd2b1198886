/// Format a float as a rupee amount with thousands separators: ₹1,234.56
/// Non-finite values render as zero; they carry no amount information.
pub fn money(val: f64) -> String {
    let val = if val.is_finite() { val } else { 0.0 };
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = parts[0];
    let dec_part = parts[1];

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-\u{20b9}{with_commas}.{dec_part}")
    } else {
        format!("\u{20b9}{with_commas}.{dec_part}")
    }
}

/// Parse a cell value as an amount. Blank or malformed cells are zero, never
/// an error; currency signs and grouping commas are tolerated. `f64::parse`
/// accepts "inf" and "NaN", so non-finite results count as malformed too.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .trim_start_matches('\u{20b9}')
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "\u{20b9}1,234.56");
        assert_eq!(money(-500.00), "-\u{20b9}500.00");
        assert_eq!(money(0.0), "\u{20b9}0.00");
        assert_eq!(money(1000000.99), "\u{20b9}1,000,000.99");
        assert_eq!(money(42.10), "\u{20b9}42.10");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50000"), 50000.0);
        assert_eq!(parse_amount("1,234.56"), 1234.56);
        assert_eq!(parse_amount("\u{20b9}750"), 750.0);
        assert_eq!(parse_amount("  42 "), 42.0);
    }

    #[test]
    fn test_parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("N/A"), 0.0);
        assert_eq!(parse_amount("12abc"), 0.0);
    }

    #[test]
    fn test_parse_amount_rejects_nonfinite() {
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("-inf"), 0.0);
        assert_eq!(parse_amount("infinity"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn test_money_renders_nonfinite_as_zero() {
        assert_eq!(money(f64::INFINITY), "\u{20b9}0.00");
        assert_eq!(money(f64::NEG_INFINITY), "\u{20b9}0.00");
        assert_eq!(money(f64::NAN), "\u{20b9}0.00");
    }
}
