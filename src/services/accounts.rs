use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Anything but ASCII 0-9. `\D` would keep full-width and other Unicode digits.
fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]").expect("valid digit pattern"))
}

/// Login handle derived from a display name: accents stripped, lowercased, no spaces.
/// "Ana Paula" becomes "anapaula".
pub fn login_handle(name: &str) -> String {
    let stripped: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    whitespace().replace_all(&stripped.to_lowercase(), "").into_owned()
}

/// ASCII digits of a formatted phone number
pub fn phone_digits(phone: &str) -> String {
    non_digits().replace_all(phone, "").into_owned()
}

/// Up to the last four digits of a phone number
pub fn phone_suffix(phone: &str) -> String {
    let digits = phone_digits(phone);
    let start = digits.len().saturating_sub(4);
    digits[start..].to_string()
}

/// Login details generated for a student added by a trainer
#[derive(Debug, Clone, PartialEq)]
pub struct StudentCredentials {
    pub student_id: String,
    pub login: String,
    pub email: String,
    pub password: String,
}

impl StudentCredentials {
    /// The password is the login handle followed by the phone's last four digits.
    /// Phones with fewer digits yield a shorter suffix.
    pub fn generate(name: &str, phone: &str) -> Self {
        let login = login_handle(name);
        let password = format!("{}{}", login, phone_suffix(phone));

        Self {
            student_id: format!("student-{}", Uuid::new_v4()),
            email: format!("{}@app.com", login),
            login,
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_credentials() {
        let credentials = StudentCredentials::generate("Ana Paula", "(11) 98765-4321");
        assert_eq!(credentials.login, "anapaula");
        assert_eq!(credentials.password, "anapaula4321");
        assert_eq!(credentials.email, "anapaula@app.com");
        assert!(credentials.student_id.starts_with("student-"));
    }

    #[test]
    fn test_login_handle_strips_accents() {
        assert_eq!(login_handle("José  Ângelo Núñez"), "joseangelonunez");
        assert_eq!(login_handle("\tMaria\nClara "), "mariaclara");
    }

    #[test]
    fn test_short_phone_yields_short_suffix() {
        assert_eq!(phone_suffix("12"), "12");
        assert_eq!(phone_suffix("no digits"), "");
        assert_eq!(StudentCredentials::generate("Bia", "9-9").password, "bia99");
    }

    #[test]
    fn test_non_ascii_digits_are_dropped() {
        assert_eq!(phone_digits("(11) ９８７６５-４３２１"), "11");
        assert_eq!(phone_digits("٠١٢٣ 4567"), "4567");

        let credentials = StudentCredentials::generate("Ana Paula", "(11) ９８７６５-４３２１");
        assert_eq!(credentials.password, "anapaula11");
    }
}
