//! Brazilian real formatting for price inputs and listing cards.
//!
//! Price inputs hold masked display strings ("R$ 1.234,56"). The digits of the
//! string are always read as cents, so typing "12345" shows "R$ 123,45".

pub const PRICE_ON_REQUEST: &str = "Sob consulta";

/// Masks raw keyboard input as currency. Empty or all-zero input gives "".
pub fn mask_currency_brl(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return String::new();
    }

    let padded = format!("{:0>3}", significant);
    let (reais, cents) = padded.split_at(padded.len() - 2);
    format!("R$ {},{}", group_thousands(reais), cents)
}

/// Reads the numeric value back out of a masked string. Empty input gives 0.
pub fn currency_to_number(display: &str) -> f64 {
    let digits: String = display.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0.0;
    }
    digits.parse::<f64>().map(|cents| cents / 100.0).unwrap_or(0.0)
}

/// Formats a stored price; a missing price is shown as "Sob consulta".
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) if value.is_finite() => {
            let cents = (value.abs() * 100.0).round() as u128;
            let body = format!(
                "R$ {},{:02}",
                group_thousands(&(cents / 100).to_string()),
                cents % 100
            );
            if value < 0.0 {
                format!("-{body}")
            } else {
                body
            }
        }
        _ => PRICE_ON_REQUEST.to_string(),
    }
}

pub fn format_price_display(price: Option<f64>, price_on_request: bool) -> String {
    if price_on_request {
        return PRICE_ON_REQUEST.to_string();
    }
    format_price(price)
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_zero_mask_to_empty() {
        assert_eq!(mask_currency_brl(""), "");
        assert_eq!(mask_currency_brl("0"), "");
        assert_eq!(mask_currency_brl("00"), "");
        assert_eq!(mask_currency_brl("R$ 0,00"), "");
    }

    #[test]
    fn digits_are_cents() {
        assert_eq!(mask_currency_brl("10000"), "R$ 100,00");
        assert_eq!(mask_currency_brl("5"), "R$ 0,05");
        assert_eq!(mask_currency_brl("123456789"), "R$ 1.234.567,89");
        assert_eq!(mask_currency_brl("R$ 1.234,5"), "R$ 123,45");
    }

    #[test]
    fn masked_value_reads_back() {
        assert_eq!(currency_to_number(&mask_currency_brl("12345")), 123.45);
        assert_eq!(currency_to_number(""), 0.0);
        assert_eq!(currency_to_number("R$ 450.000,00"), 450_000.0);
    }

    #[test]
    fn remasking_is_stable() {
        let once = mask_currency_brl("98765");
        assert_eq!(mask_currency_brl(&once), once);
    }

    #[test]
    fn formats_stored_prices() {
        assert_eq!(format_price(Some(1_250_000.0)), "R$ 1.250.000,00");
        assert_eq!(format_price(Some(999.9)), "R$ 999,90");
        assert_eq!(format_price(None), PRICE_ON_REQUEST);
        assert_eq!(format_price(Some(f64::NAN)), PRICE_ON_REQUEST);
        assert_eq!(format_price_display(Some(10.0), true), PRICE_ON_REQUEST);
    }
}
