// Shared field patterns. The `regex` crate has no look-around, so password strength is expressed
// as several character-class patterns checked together with `Rule::AllOf`.

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static field pattern must compile")
}

pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$"));

pub static PHONE_DIGITS: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{10,15}$"));

pub static PHONE_FORMATTED: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$"));

pub static MONEY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d+(\.\d{1,2})?$"));

pub static CURRENCY_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z]{3}$"));

pub static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d{4}-\d{2}-\d{2}$"));

pub static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[A-Za-z\d@$!%*?&]{8,}$"));

pub static HAS_LOWER: LazyLock<Regex> = LazyLock::new(|| compile(r"[a-z]"));
pub static HAS_UPPER: LazyLock<Regex> = LazyLock::new(|| compile(r"[A-Z]"));
pub static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| compile(r"\d"));
pub static HAS_SPECIAL: LazyLock<Regex> = LazyLock::new(|| compile(r"[@$!%*?&]"));

pub fn password_classes() -> Vec<&'static Regex> {
    vec![
        &*HAS_LOWER,
        &*HAS_UPPER,
        &*HAS_DIGIT,
        &*HAS_SPECIAL,
        &*PASSWORD_CHARSET,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_case_insensitive() {
        assert!(EMAIL.is_match("Jane.Doe@Example.COM"));
        assert!(!EMAIL.is_match("jane@localhost"));
    }

    #[test]
    fn test_formatted_phone_numbers() {
        assert!(PHONE_FORMATTED.is_match("(555) 123-4567"));
        assert!(PHONE_FORMATTED.is_match("+5551234567"));
        assert!(!PHONE_FORMATTED.is_match("12-34"));
    }

    #[test]
    fn test_password_classes_require_every_class() {
        let strong = "Secr3t!pass";
        let weak = "secretpass1";
        assert!(password_classes().iter().all(|re| re.is_match(strong)));
        assert!(!password_classes().iter().all(|re| re.is_match(weak)));
    }
}
