//! Extended string-format predicates.
//!
//! The generator's `FormatRegistry` maps spec format names to these
//! functions by path; generated validators call them directly. Each
//! predicate answers yes/no only — error construction happens at the call
//! site, where the field name and location are known.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use regex::Regex;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
            .expect("email pattern is valid")
    })
}

fn uuid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("uuid pattern is valid")
    })
}

fn hostname_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
            .expect("hostname pattern is valid")
    })
}

fn mac_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$").expect("mac pattern is valid")
    })
}

pub fn is_email(value: &str) -> bool {
    email_re().is_match(value)
}

pub fn is_uuid(value: &str) -> bool {
    uuid_re().is_match(value)
}

pub fn is_uri(value: &str) -> bool {
    match value.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
                && !rest.is_empty()
        }
        None => false,
    }
}

pub fn is_hostname(value: &str) -> bool {
    !value.is_empty() && value.len() <= 253 && hostname_re().is_match(value)
}

pub fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

pub fn is_mac(value: &str) -> bool {
    mac_re().is_match(value)
}

/// Luhn checksum over the digits of the value, separators ignored.
pub fn is_credit_card(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
        .unwrap_or_default();
    if digits.len() < 12 || digits.len() > 19 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

pub fn is_isbn10(value: &str) -> bool {
    let chars: Vec<char> = value.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if chars.len() != 10 {
        return false;
    }
    let mut sum = 0u32;
    for (i, c) in chars.iter().enumerate() {
        let digit = match c.to_digit(10) {
            Some(d) => d,
            // 'X' is only valid as the check digit
            None if i == 9 && (*c == 'X' || *c == 'x') => 10,
            None => return false,
        };
        sum += digit * (10 - i as u32);
    }
    sum % 11 == 0
}

pub fn is_isbn13(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
        .unwrap_or_default();
    if digits.len() != 13 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_email("user@example.com"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("user@"));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn test_uuid() {
        assert!(is_uuid("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!is_uuid("550e8400e29b41d4a716446655440000"));
        assert!(!is_uuid("zzze8400-e29b-41d4-a716-446655440000"));
    }

    #[test]
    fn test_uri() {
        assert!(is_uri("https://example.com/path"));
        assert!(is_uri("ftp://files.example.com"));
        assert!(!is_uri("example.com"));
        assert!(!is_uri("://missing-scheme"));
    }

    #[test]
    fn test_ip_addresses() {
        assert!(is_ipv4("192.168.0.1"));
        assert!(!is_ipv4("256.1.1.1"));
        assert!(is_ipv6("::1"));
        assert!(!is_ipv6("192.168.0.1"));
    }

    #[test]
    fn test_hostname() {
        assert!(is_hostname("example.com"));
        assert!(is_hostname("sub-domain.example.com"));
        assert!(!is_hostname("-leading.example.com"));
        assert!(!is_hostname(""));
    }

    #[test]
    fn test_mac() {
        assert!(is_mac("01:23:45:67:89:ab"));
        assert!(!is_mac("01-23-45-67-89-ab"));
    }

    #[test]
    fn test_credit_card() {
        assert!(is_credit_card("4111 1111 1111 1111"));
        assert!(!is_credit_card("4111 1111 1111 1112"));
        assert!(!is_credit_card("1234"));
    }

    #[test]
    fn test_isbn() {
        assert!(is_isbn10("0-306-40615-2"));
        assert!(!is_isbn10("0-306-40615-3"));
        assert!(is_isbn13("978-3-16-148410-0"));
        assert!(!is_isbn13("978-3-16-148410-1"));
    }
}
