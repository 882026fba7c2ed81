//! 表单校验工具
//!
//! 登录、注册、找回密码三个流程共用同一套字段校验，
//! 返回 None 表示通过，Some(文案) 表示对应字段的错误提示

use regex::Regex;
use std::sync::OnceLock;

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

pub fn email_error(email: &str) -> Option<&'static str> {
    if email_regex().is_match(email) {
        None
    } else {
        Some("Please enter a valid email address.")
    }
}

pub fn name_error(name: &str) -> Option<&'static str> {
    if name.chars().count() >= MIN_NAME_LEN {
        None
    } else {
        Some("Name must be at least 2 characters.")
    }
}

pub fn password_error(password: &str) -> Option<&'static str> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        None
    } else {
        Some("Password must be at least 8 characters.")
    }
}

/// 登录页只要求密码非空
pub fn login_password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Please enter your password.")
    } else {
        None
    }
}

pub fn confirm_password_error(password: &str, confirm: &str) -> Option<&'static str> {
    if password == confirm {
        None
    } else {
        Some("Passwords do not match.")
    }
}

pub fn terms_error(accepted: bool) -> Option<&'static str> {
    if accepted {
        None
    } else {
        Some("You must agree to the terms and conditions.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(email_error("john@example.com").is_none());
        assert!(email_error("a@b.co").is_none());

        assert!(email_error("").is_some());
        assert!(email_error("john").is_some());
        assert!(email_error("john@example").is_some());
        assert!(email_error("john doe@example.com").is_some());
        assert!(email_error("john@exa mple.com").is_some());
    }

    #[test]
    fn test_name_validation() {
        assert!(name_error("Jo").is_none());
        assert!(name_error("John Doe").is_none());

        assert_eq!(name_error(""), Some("Name must be at least 2 characters."));
        assert!(name_error("J").is_some());
    }

    #[test]
    fn test_password_validation() {
        assert!(password_error("12345678").is_none());
        assert_eq!(
            password_error("1234567"),
            Some("Password must be at least 8 characters.")
        );
    }

    #[test]
    fn test_login_password_only_requires_presence() {
        assert!(login_password_error("x").is_none());
        assert_eq!(
            login_password_error(""),
            Some("Please enter your password.")
        );
    }

    #[test]
    fn test_confirm_password() {
        assert!(confirm_password_error("abcd1234", "abcd1234").is_none());
        assert_eq!(
            confirm_password_error("abcd1234", "abcd123"),
            Some("Passwords do not match.")
        );
    }

    #[test]
    fn test_terms() {
        assert!(terms_error(true).is_none());
        assert_eq!(
            terms_error(false),
            Some("You must agree to the terms and conditions.")
        );
    }
}
