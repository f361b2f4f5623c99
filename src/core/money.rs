use rust_decimal::Decimal;
use std::str::FromStr;

/// Smallest difference treated as a real discount or interest adjustment.
/// Deltas at or below one cent are considered rounding noise.
pub fn adjustment_epsilon() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Best-effort parser for amounts typed into payment fields.
///
/// Accepts Brazilian-formatted currency input ("R$ 1.234,56") as well as
/// plain numbers. Everything except digits and the decimal comma is
/// stripped, then the first comma becomes the decimal point. Input that
/// still does not parse resolves to zero; this is a UI input parser, not a
/// validating boundary, so it never fails.
pub fn parse_amount(input: &str) -> Decimal {
    let cleaned: String = input.chars().filter(|c| c.is_ascii_digit() || *c == ',').collect();
    let normalized = cleaned.replacen(',', ".", 1);

    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

/// Formats an amount as Brazilian currency ("R$ 1.234,56").
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{:0<2}", f)),
        None => (text, "00".to_string()),
    };

    // Insert thousands separators right-to-left
    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}
