mod common;

#[cfg(test)]
pub mod model_tests {
    use super::common::*;

    use std::str::FromStr;

    use chrono::Duration;
    use rust_decimal::Decimal;

    use venuedesk::models::*;

    #[test]
    fn test_whatsapp_link_strips_non_digits() {
        assert_eq!(whatsapp_link("(27) 3333-3333"), "https://wa.me/552733333333");
        assert_eq!(whatsapp_link(""), "https://wa.me/55");
    }

    #[test]
    fn test_interest_preview() {
        let mut lead = Lead {
            id: get_seed_contact_lead_id(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
            phone: "11999990000".into(),
            interest: "Casamento - teste".into(),
            date: date("2026-05-20"),
            status: LeadStatus::New,
            source: None,
            created_at: parse_time("2026-02-01 09:00:00+00"),
        };
        assert_eq!(lead.interest_preview(), "Casamento - teste");

        lead.interest = "Ã".repeat(31);
        assert_eq!(lead.interest_preview(), format!("{}...", "Ã".repeat(30)));

        lead.interest = "x".repeat(30);
        assert_eq!(lead.interest_preview(), "x".repeat(30));
        assert_eq!(lead.whatsapp_link(), "https://wa.me/5511999990000");
    }

    #[test]
    fn test_space_labels() {
        let mut hall = get_seed_hall();
        assert_eq!(hall.price_label(), "R$ 1500.00");
        assert_eq!(hall.price_value(), 1500.0);
        assert_eq!(hall.gallery_images(), ["https://img.test/s1.jpg", "https://img.test/s2.jpg"]);

        hall.price = None;
        hall.gallery.clear();
        assert_eq!(hall.price_label(), "Sob consulta");
        assert_eq!(hall.price_value(), 0.0);
        assert_eq!(hall.gallery_images(), ["https://img.test/salao.jpg"]);

        hall.image.clear();
        assert!(hall.gallery_images().is_empty());
    }

    #[test]
    fn test_space_validation() {
        assert!(space_create("Novo").validate().is_ok());
        assert!(space_create("  ").validate().is_err());

        let mut space = space_create("Novo");
        space.capacity = -1;
        assert!(space.validate().is_err());

        let mut space = space_create("Novo");
        space.price = Some(Decimal::new(-1, 0));
        assert!(space.validate().is_err());
    }

    #[test]
    fn test_lines_to_list() {
        assert_eq!(
            lines_to_list("  Mesas \n\n Cadeiras\r\n   \nSom"),
            ["Mesas", "Cadeiras", "Som"]
        );
        assert!(lines_to_list("\n  \n").is_empty());
        assert_eq!(
            list_to_lines(&["Mesas".to_string(), "Som".to_string()]),
            "Mesas\nSom"
        );
    }

    #[test]
    fn test_space_type_parsing() {
        assert_eq!(SpaceType::from_str("Sports"), Ok(SpaceType::Sports));
        assert_eq!(SpaceType::from_str(" ao ar livre "), Ok(SpaceType::Outdoor));
        assert!(SpaceType::from_str("garage").is_err());
        assert_eq!(SpaceType::default(), SpaceType::Social);
    }

    #[test]
    fn test_status_enums_parse() {
        assert_eq!("Confirmed".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert!("done".parse::<BookingStatus>().is_err());
        assert_eq!("contacted".parse::<LeadStatus>(), Ok(LeadStatus::Contacted));
        assert_eq!("SUPER_ADMIN".parse::<UserRole>(), Ok(UserRole::SuperAdmin));
        assert_eq!("booking.cancelled".parse::<WebhookEvent>(), Ok(WebhookEvent::BookingCancelled));
        assert!("booking.deleted".parse::<WebhookEvent>().is_err());

        let ids: Vec<&str> = LeadStatus::ALL.iter().map(LeadStatus::as_str).collect();
        assert_eq!(ids, ["new", "contacted", "converted"]);
    }

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::SuperAdmin.is_staff());
        assert!(UserRole::Editor.is_staff());
        assert!(!UserRole::User.is_staff());
        assert!(UserRole::SuperAdmin.can_manage_roles());
        assert!(!UserRole::Editor.can_manage_roles());
    }

    #[test]
    fn test_booking_validation() {
        let mut data = BookingCreate {
            space_id: get_seed_hall().id,
            date: date("2026-03-10"),
            client_name: "Carlos".into(),
            status: BookingStatus::Pending,
            total_value: Some(Decimal::new(100, 0)),
        };
        assert!(data.validate().is_ok());

        data.total_value = Some(Decimal::new(-100, 0));
        assert!(data.validate().is_err());

        data.total_value = None;
        data.client_name = " ".into();
        assert!(data.validate().is_err());

        assert_eq!(get_seed_confirmed_booking().value_label(), "R$ 1500.00");
    }

    #[test]
    fn test_validate_webhook_url() {
        assert!(validate_webhook_url("https://hooks.test/abc").is_ok());
        assert!(validate_webhook_url(" http://localhost:8080?x=1 ").is_ok());
        assert!(validate_webhook_url("ftp://hooks.test").is_err());
        assert!(validate_webhook_url("https://").is_err());
        assert!(validate_webhook_url("https:///path").is_err());
        assert!(validate_webhook_url("hooks.test").is_err());
    }

    #[test]
    fn test_page_title() {
        let config = SiteConfig::default();
        assert_eq!(config.page_title(Some("Contato")), "Contato | APCEF Eventos");
        assert_eq!(config.page_title(Some("  ")), config.seo_title);
        assert_eq!(config.page_title(None), config.seo_title);
    }

    #[test]
    fn test_site_config_update_normalized() {
        let mut update = SiteConfigUpdate::from(&SiteConfig::default());
        update.google_analytics_id = Some("  ".into());
        update.facebook_pixel_id = Some(" 123 ".into());
        update.facebook_access_token = Some(String::new());

        let update = update.normalized();
        assert_eq!(update.google_analytics_id, None);
        assert_eq!(update.facebook_pixel_id.as_deref(), Some("123"));
        assert_eq!(update.facebook_access_token, None);
        assert!(update.validate().is_ok());

        let blank = SiteConfigUpdate::default();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_user_helpers() {
        let mut user = get_seed_client();
        assert!(user.has_password());
        assert_eq!(user.display_name(), "Ana Souza");

        user.full_name = " ".into();
        assert_eq!(user.display_name(), "ana");

        assert!(!get_seed_unclaimed().has_password());

        let profile = UserProfile::from(get_seed_editor());
        assert_eq!(profile.initial(), 'E');
        assert_eq!(profile.role, UserRole::Editor);
    }

    #[test]
    fn test_password_reset_usable() {
        let now = parse_time("2026-03-01 12:00:00+00");
        let mut reset = PasswordReset {
            token: "t".into(),
            user_id: get_seed_client().id,
            expires_at: now + Duration::minutes(5),
            used_at: None,
        };
        assert!(reset.is_usable(now));

        reset.used_at = Some(now);
        assert!(!reset.is_usable(now));

        reset.used_at = None;
        reset.expires_at = now;
        assert!(!reset.is_usable(now));
    }
}
