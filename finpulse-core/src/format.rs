//! Display formatting for money and contact details.

use crate::finance::Currency;

fn group_thousands(mut n: u64, sep: char) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(&sep.to_string())
}

/// Format an amount the way the currency's home locale does.
///
/// BRL `R$ 1.234,56`, USD `$1,234.56`, EUR `1.234,56 €`.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let units = cents / 100;
    let frac = cents % 100;

    match currency {
        Currency::Brl => format!("{sign}R$ {},{frac:02}", group_thousands(units, '.')),
        Currency::Usd => format!("{sign}${}.{frac:02}", group_thousands(units, ',')),
        Currency::Eur => format!("{sign}{},{frac:02} €", group_thousands(units, '.')),
    }
}

fn mask_part(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let first = chars.first().map(|c| c.to_string()).unwrap_or_default();
    if chars.len() <= 2 {
        return format!("{first}*");
    }
    let last = chars[chars.len() - 1];
    format!("{first}{}{last}", "*".repeat(chars.len() - 2))
}

/// Partially hide an email address, keeping the top-level domain readable.
///
/// Returns an empty string for anything that does not look like an address.
pub fn mask_email(email: &str) -> String {
    let mut parts = email.split('@');
    let (Some(user), Some(domain)) = (parts.next(), parts.next()) else {
        return String::new();
    };
    if user.is_empty() || domain.is_empty() {
        return String::new();
    }

    match domain.split_once('.') {
        Some((name, tld)) if !name.is_empty() && !tld.is_empty() => {
            format!("{}@{}.{}", mask_part(user), mask_part(name), tld)
        }
        _ => format!("{}@{}", mask_part(user), mask_part(domain)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56, Currency::Brl), "R$ 1.234,56");
        assert_eq!(format_currency(1234.5, Currency::Usd), "$1,234.50");
        assert_eq!(format_currency(1234567.891, Currency::Eur), "1.234.567,89 €");
        assert_eq!(format_currency(-42.0, Currency::Usd), "-$42.00");
        assert_eq!(format_currency(0.0, Currency::Brl), "R$ 0,00");
        assert_eq!(format_currency(-0.001, Currency::Usd), "$0.00");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("maria@example.com"), "m***a@e*****e.com");
        assert_eq!(mask_email("jo@mail.co.uk"), "j*@m**l.co.uk");
        assert_eq!(mask_email("ab@localhost"), "a*@l*******t");
        assert_eq!(mask_email("not-an-email"), "");
        assert_eq!(mask_email("@example.com"), "");
    }
}
