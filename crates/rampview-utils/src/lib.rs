//! Utility functions and helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Group the digits of an integer string with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Format a money amount, e.g. `-$1,234.50`
pub fn format_amount(amount: Decimal, symbol: &str, decimal_places: u32) -> String {
    let rounded = amount
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let text = format!("{:.*}", decimal_places as usize, rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}{}.{}", sign, symbol, format_number(int_part), frac),
        None => format!("{}{}{}", sign, symbol, format_number(int_part)),
    }
}

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-1234), "-1,234");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(123450, 2), "$", 2), "$1,234.50");
        assert_eq!(format_amount(Decimal::new(5, 0), "$", 2), "$5.00");
        assert_eq!(format_amount(Decimal::new(-98765, 1), "€", 0), "-€9,877");
        assert_eq!(format_amount(Decimal::new(-1, 3), "$", 2), "$0.00");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Hotel Alpha"), "Hotel Alpha");
    }
}
