mod common;

#[cfg(test)]
pub mod integration_tests {
    use super::common::*;

    use chrono::Utc;
    use uuid::Uuid;

    use venuedesk::models::ApiLog;
    use venuedesk::services::integrations::*;

    fn log(endpoint: &str, status: u16) -> ApiLog {
        ApiLog {
            id: Uuid::new_v4(),
            endpoint: endpoint.to_string(),
            method: "POST".to_string(),
            status,
            timestamp: Utc::now(),
            latency_ms: 12,
        }
    }

    #[test]
    fn test_generate_key_stores_only_hash() {
        let registry = IntegrationRegistry::new();
        let today = date("2026-03-01");

        let generated = registry.generate_key("  CRM  ", today);

        assert!(generated.secret.starts_with("apcef_live_"));
        assert_eq!(generated.secret.len(), "apcef_live_".len() + 48);
        assert_eq!(generated.key.name, "CRM");
        assert_eq!(generated.key.created, today);
        assert_eq!(generated.key.secret_hash, hash_secret(&generated.secret));
        assert!(generated.key.prefix.ends_with("..."));
        assert!(generated.secret.starts_with(generated.key.prefix.trim_end_matches("...")));
        assert_eq!(registry.keys(), [generated.key]);
    }

    #[test]
    fn test_generate_key_default_name_and_unique_secrets() {
        let registry = IntegrationRegistry::new();
        let a = registry.generate_key("", date("2026-03-01"));
        let b = registry.generate_key("   ", date("2026-03-01"));

        assert_eq!(a.key.name, "Nova Chave");
        assert_eq!(b.key.name, "Nova Chave");
        assert_ne!(a.secret, b.secret);
        assert_ne!(a.key.id, b.key.id);
        assert_eq!(registry.keys().len(), 2);
    }

    #[test]
    fn test_revoke_key() {
        let registry = IntegrationRegistry::new();
        let kept = registry.generate_key("kept", date("2026-03-01"));
        let gone = registry.generate_key("gone", date("2026-03-01"));

        assert!(registry.revoke_key(gone.key.id));
        assert!(!registry.revoke_key(gone.key.id));
        assert!(!registry.revoke_key(Uuid::new_v4()));

        let ids: Vec<Uuid> = registry.keys().iter().map(|k| k.id).collect();
        assert_eq!(ids, [kept.key.id]);
    }

    #[test]
    fn test_new_key_was_never_used() {
        let registry = IntegrationRegistry::new();
        let generated = registry.generate_key("CRM", date("2026-03-01"));

        assert_eq!(generated.key.last_used, None);
        assert_eq!(generated.key.last_used_label(), "Nunca");
    }

    #[test]
    fn test_logs_newest_first_and_capped() {
        let registry = IntegrationRegistry::new();
        for i in 0..(API_LOG_CAPACITY + 5) {
            registry.record(log(&format!("/hook/{i}"), 200));
        }

        let logs = registry.logs();
        assert_eq!(logs.len(), API_LOG_CAPACITY);
        assert_eq!(logs[0].endpoint, format!("/hook/{}", API_LOG_CAPACITY + 4));
        assert_eq!(logs[API_LOG_CAPACITY - 1].endpoint, "/hook/5");
    }

    #[test]
    fn test_log_status_helpers() {
        assert!(log("/a", 204).is_success());
        assert!(!log("/a", 500).is_success());
        assert!(!log("/a", 0).is_success());
    }

    #[test]
    fn test_hash_secret_is_sha256_hex() {
        assert_eq!(
            hash_secret("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
