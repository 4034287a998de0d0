#[cfg(test)]
pub mod config_tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use venuedesk::common::ConfigError;
    use venuedesk::config::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/venuedesk")]).expect("config");

        assert_eq!(config.database_url, "postgres://localhost/venuedesk");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.super_admin_email, None);
        assert_eq!(config.lead_webhook_url.as_deref(), Some(DEFAULT_LEAD_WEBHOOK_URL));
        assert_eq!(
            config.contact_webhook_url.as_deref(),
            Some(DEFAULT_CONTACT_WEBHOOK_URL)
        );
        assert_eq!(config.conversion_api_base, DEFAULT_CONVERSION_API_BASE);
        assert_eq!(config.outbound_timeout, Duration::from_secs(10));
        assert_eq!(config.public_base_url, "http://localhost:8080");
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_missing_database_url() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
        assert!(matches!(
            load(&[("DATABASE_URL", "   ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let result = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]);

        match result {
            Err(ConfigError::Invalid { name, value }) => {
                assert_eq!(name, "DB_MAX_CONNECTIONS");
                assert_eq!(value, "many");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }

        assert!(load(&[("DATABASE_URL", "postgres://db"), ("SECURE_COOKIES", "yes")]).is_err());
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("SUPER_ADMIN_EMAIL", " Admin@Test.com "),
            ("CONVERSION_API_BASE", "https://graph.test/v1/"),
            ("PUBLIC_BASE_URL", "https://eventos.test/"),
            ("LEAD_WEBHOOK_URL", ""),
            ("CONTACT_WEBHOOK_URL", "https://hooks.test/contato"),
            ("OUTBOUND_TIMEOUT_SECS", "3"),
            ("SECURE_COOKIES", "true"),
        ])
        .expect("config");

        assert_eq!(config.super_admin_email.as_deref(), Some("admin@test.com"));
        assert_eq!(config.conversion_api_base, "https://graph.test/v1");
        assert_eq!(config.public_base_url, "https://eventos.test");
        assert_eq!(config.lead_webhook_url.as_deref(), Some(DEFAULT_LEAD_WEBHOOK_URL));
        assert_eq!(config.contact_webhook_url.as_deref(), Some("https://hooks.test/contato"));
        assert_eq!(config.outbound_timeout, Duration::from_secs(3));
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_webhook_can_be_disabled() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("LEAD_WEBHOOK_URL", "OFF"),
            ("CONTACT_WEBHOOK_URL", "off"),
        ])
        .expect("config");

        assert_eq!(config.lead_webhook_url, None);
        assert_eq!(config.contact_webhook_url, None);
    }
}
