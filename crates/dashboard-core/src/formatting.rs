//! Number and currency rendering for KPI cards and reports.

/// Format `value` with comma thousands separators and `decimals` places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    // "-0" / "-0.00" would look odd on a KPI card.
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an integer count with thousands separators.
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a euro amount rounded to whole euros, e.g. `"€2,500"`.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(2500.0), "€2,500");
/// assert_eq!(format_currency(-12.4), "-€12");
/// ```
pub fn format_currency(amount: f64) -> String {
    let rendered = format_number(amount, 0);
    match rendered.strip_prefix('-') {
        Some(abs) => format!("-€{}", abs),
        None => format!("€{}", rendered),
    }
}

/// ROAS with two decimals, as shown on the KPI card.
pub fn format_roas(roas: f64) -> String {
    format!("{:.2}", roas)
}

/// Percentage with two decimals, e.g. `"3.50%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
