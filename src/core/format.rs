//! Display formatting for converted amounts

fn symbol_for(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "NGN" => "₦",
        "JPY" | "CNY" => "¥",
        "INR" => "₹",
        "KES" => "KSh",
        "GHS" => "GH₵",
        "ZAR" => "R",
        "CAD" => "C$",
        "AUD" => "A$",
        _ => return None,
    };
    Some(symbol)
}

/// Trims and upper-cases a user supplied currency code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{cents}")
}

/// Formats `amount` for display, e.g. `₦155,000.00` or `12.50 XYZ`.
pub fn format_amount(amount: f64, code: &str) -> String {
    let number = group_thousands(amount);
    match symbol_for(code) {
        Some(symbol) => match number.strip_prefix('-') {
            Some(rest) => format!("-{symbol}{rest}"),
            None => format!("{symbol}{number}"),
        },
        None => format!("{number} {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_currencies() {
        assert_eq!(format_amount(155000.0, "NGN"), "₦155,000.00");
        assert_eq!(format_amount(92.0, "EUR"), "€92.00");
        assert_eq!(format_amount(1234567.891, "USD"), "$1,234,567.89");
        assert_eq!(format_amount(-5.5, "GBP"), "-£5.50");
    }

    #[test]
    fn test_format_unknown_currency() {
        assert_eq!(format_amount(12.5, "XYZ"), "12.50 XYZ");
        assert_eq!(format_amount(999.999, "XYZ"), "1,000.00 XYZ");
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" ngn "), "NGN");
        assert_eq!(normalize_code("Eur"), "EUR");
    }
}
