mod common;

#[cfg(test)]
pub mod auth_tests {
    use super::common::*;

    use venuedesk::models::UserRole;
    use venuedesk::services::auth::*;

    #[test]
    fn test_login_destination() {
        use LoginDestination::*;
        use LoginPortal::*;

        assert_eq!(login_destination(UserRole::SuperAdmin, Client), AdminDashboard);
        assert_eq!(login_destination(UserRole::Editor, Admin), AdminDashboard);
        assert_eq!(login_destination(UserRole::User, Client), ClientDashboard);
        assert_eq!(login_destination(UserRole::User, Admin), Denied);

        assert_eq!(AdminDashboard.path(), Some("/painel-admin"));
        assert_eq!(ClientDashboard.path(), Some("/painel-cliente"));
        assert_eq!(Denied.path(), None);
        assert_eq!(Admin.path(), "/login-admin");
    }

    #[test]
    fn test_validate_password_counts_chars() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("çãõéíúâê").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordManager::hash_password("segredo123").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordManager::verify_password("segredo123", &hash).expect("verify"));
        assert!(!PasswordManager::verify_password("segredo124", &hash).expect("verify"));
        assert!(PasswordManager::verify_password("segredo123", "not-a-hash").is_err());

        assert!(PasswordManager::verify_login("segredo123", Some(&hash)));
        assert!(!PasswordManager::verify_login("errada", Some(&hash)));
    }

    #[test]
    fn test_verify_login_without_password_fails() {
        assert!(!PasswordManager::verify_login("qualquer", None));
        assert!(!PasswordManager::verify_login("qualquer", Some("")));
        assert!(!PasswordManager::verify_login("qualquer", Some("not-a-hash")));
    }

    #[test]
    fn test_reset_token() {
        let a = generate_reset_token();
        let b = generate_reset_token();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_reset_expiry_is_one_hour() {
        let now = parse_time("2026-03-01 12:00:00+00");
        assert_eq!(reset_expiry(now), parse_time("2026-03-01 13:00:00+00"));
    }
}
