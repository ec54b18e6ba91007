//! Utility functions

/// Mask an email address for log output.
///
/// Keeps at most the first two characters of the local part and the full
/// domain. Operates on characters, not bytes, so multi-byte local parts and
/// degenerate inputs like `"@example.com"` are safe to mask.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = if local.chars().count() <= 2 { 1 } else { 2 };
        let visible: String = local.chars().take(keep).collect();
        format!("{}***{}", visible, domain)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_email_keeps_domain_only() {
        assert_eq!(mask_email("john.doe@example.com"), "jo***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn mask_email_handles_empty_local_part() {
        assert_eq!(mask_email("@example.com"), "***@example.com");
    }

    #[test]
    fn mask_email_handles_multibyte_local_part() {
        assert_eq!(mask_email("é@example.com"), "é***@example.com");
        assert_eq!(mask_email("日本語@example.com"), "日本***@example.com");
    }
}
