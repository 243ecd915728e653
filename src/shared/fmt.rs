//! Number formatting for the values a coin row displays.
//!
//! Prices get two decimals from 0.1 upward and enough decimals to show the leading
//! significant digits below it. Market caps and volumes use T/B/M/K suffixes.

/// Insert thousands separators into the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn price_decimals(value: f64) -> usize {
    let abs_value = value.abs();
    if abs_value >= 0.1 || abs_value == 0.0 {
        return 2;
    }
    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Format a USD amount, e.g. `$50,000.00` or `$0.000123`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_string();
    }
    let body = group_thousands(&format!("{:.1$}", value.abs(), price_decimals(value)));
    if value < 0.0 {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Format a signed percentage with two decimals, e.g. `+2.50%`.
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return "0.00%".to_string();
    }
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Format a large USD amount with a magnitude suffix, e.g. `$1.23T`.
pub fn format_market_cap(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    if !value.is_finite() {
        return "$0.00".to_string();
    }
    for (scale, suffix) in UNITS {
        if value.abs() >= scale {
            return format!("${:.2}{}", value / scale, suffix);
        }
    }
    format_currency(value)
}
