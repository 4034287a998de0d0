mod common;

#[cfg(test)]
pub mod db_tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::common::*;

    use venuedesk::common::*;
    use venuedesk::db::*;
    use venuedesk::models::*;
    use venuedesk::services::catalog::default_spaces;
    use venuedesk::services::dashboard::DashboardData;

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_migration_integrity(pool: PgPool) {
        let db = Database::from_pool(pool.clone());

        let admin = db
            .get_user(&get_seed_super_admin().id.into())
            .await
            .expect("seeded admin");
        assert_eq!(admin, get_seed_super_admin());

        let hall = get_space(&pool, get_seed_hall().id).await.expect("query");
        assert_eq!(hall, Some(get_seed_hall()));

        let booking = get_booking(&pool, get_seed_confirmed_booking().id)
            .await
            .expect("query");
        assert_eq!(booking, Some(get_seed_confirmed_booking()));

        assert!(get_space(&pool, Uuid::new_v4()).await.expect("query").is_none());
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_from_pool(pool: PgPool) {
        let db = Database::from_pool(pool);
        db.ping().await.expect("ping");
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_get_user_by_email_ignores_case(pool: PgPool) {
        let db = Database::from_pool(pool);

        let user = db.get_user(&" ANA@X.com ".into()).await.expect("user");
        assert_eq!(user, get_seed_client());

        let missing = db.get_user(&"nobody@test.com".into()).await;
        assert!(matches!(missing, Err(ProfileError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_add_user_rejects_duplicates(pool: PgPool) {
        let db = Database::from_pool(pool);

        let created = db
            .add_user(&UserCreate {
                email: " Novo@Test.com ".into(),
                full_name: " Novo Usuário ".into(),
                role: UserRole::Editor,
                password_hash: None,
            })
            .await
            .expect("created");

        assert_eq!(created.email, "novo@test.com");
        assert_eq!(created.full_name, "Novo Usuário");
        assert_eq!(created.role, UserRole::Editor);
        assert!(!created.has_password());
        assert!(!created.protected);

        let duplicate = db
            .add_user(&UserCreate {
                email: "editor@test.com".into(),
                full_name: "Outro".into(),
                role: UserRole::User,
                password_hash: None,
            })
            .await;
        assert!(matches!(duplicate, Err(ProfileError::AlreadyExists(_))));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_register_user_refuses_unclaimed_profile(pool: PgPool) {
        let db = Database::from_pool(pool);
        let unclaimed = get_seed_unclaimed();

        let taken = db
            .register_user("PENDING@test.com", "Outro Nome", "hash-1")
            .await;
        assert!(matches!(taken, Err(ProfileError::AlreadyExists(_))));

        let user = db.get_user(&unclaimed.id.into()).await.expect("profile");
        assert_eq!(user, unclaimed);
        assert!(!user.has_password());
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_register_user_cannot_take_seeded_super_admin(pool: PgPool) {
        let db = Database::from_pool(pool);

        let seeded = db.seed_super_admin("boss@venue.com").await.expect("seeded");
        assert!(!seeded.has_password());

        let stranger = db
            .register_user("boss@venue.com", "Outra Pessoa", "hash")
            .await;
        assert!(matches!(stranger, Err(ProfileError::AlreadyExists(_))));

        let admin = db.get_user(&seeded.id.into()).await.expect("admin");
        assert_eq!(admin.role, UserRole::SuperAdmin);
        assert_eq!(admin.password_hash, None);
        assert_eq!(admin.full_name, seeded.full_name);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_unclaimed_profile_activates_through_reset(pool: PgPool) {
        let db = Database::from_pool(pool);
        let unclaimed = get_seed_unclaimed();
        let now = Utc::now();

        db.create_password_reset(unclaimed.id, "activate", now + Duration::hours(1))
            .await
            .expect("stored");
        let user_id = db
            .consume_password_reset("activate", now)
            .await
            .expect("query")
            .expect("valid token");
        let user = db.update_password(user_id, "owner-hash").await.expect("updated");

        assert_eq!(user.id, unclaimed.id);
        assert_eq!(user.role, UserRole::Editor);
        assert_eq!(user.password_hash.as_deref(), Some("owner-hash"));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_register_user_new_account_is_client(pool: PgPool) {
        let db = Database::from_pool(pool);

        let user = db
            .register_user("maria@test.com", "Maria", "hash")
            .await
            .expect("registered");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.protected);

        let taken = db.register_user("ana@x.com", "Ana", "hash").await;
        assert!(matches!(taken, Err(ProfileError::AlreadyExists(_))));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_list_profiles_newest_first(pool: PgPool) {
        let db = Database::from_pool(pool);

        let profiles = db.list_profiles().await.expect("profiles");
        let emails: Vec<&str> = profiles.iter().map(|p| p.email.as_str()).collect();

        assert_eq!(
            emails,
            ["pending@test.com", "ana@x.com", "editor@test.com", "admin@test.com"]
        );
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_update_role(pool: PgPool) {
        let db = Database::from_pool(pool);

        let profile = db
            .update_role(get_seed_client().id, UserRole::Editor)
            .await
            .expect("updated");
        assert_eq!(profile.role, UserRole::Editor);

        let protected = db
            .update_role(get_seed_super_admin().id, UserRole::User)
            .await;
        assert!(matches!(protected, Err(ProfileError::Protected(_))));

        let missing = db.update_role(Uuid::new_v4(), UserRole::User).await;
        assert!(matches!(missing, Err(ProfileError::NotFound(_))));

        let admin = db
            .get_user(&get_seed_super_admin().id.into())
            .await
            .expect("admin");
        assert_eq!(admin.role, UserRole::SuperAdmin);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_seed_super_admin_is_idempotent(pool: PgPool) {
        let db = Database::from_pool(pool);

        let promoted = db.seed_super_admin(" Editor@Test.com ").await.expect("seeded");
        assert_eq!(promoted.id, get_seed_editor().id);
        assert_eq!(promoted.role, UserRole::SuperAdmin);
        assert!(promoted.protected);

        let fresh = db.seed_super_admin("root@test.com").await.expect("seeded");
        let again = db.seed_super_admin("root@test.com").await.expect("seeded");
        assert_eq!(fresh.id, again.id);
        assert!(!again.has_password());

        let blank = db.seed_super_admin("  ").await;
        assert!(matches!(blank, Err(ProfileError::InvalidRequest(_))));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_password_reset_is_single_use(pool: PgPool) {
        let db = Database::from_pool(pool);
        let client = get_seed_client();
        let now = Utc::now();

        db.create_password_reset(client.id, "token-1", now + Duration::hours(1))
            .await
            .expect("stored");

        let user_id = db.consume_password_reset("token-1", now).await.expect("query");
        assert_eq!(user_id, Some(client.id));

        let reused = db.consume_password_reset("token-1", now).await.expect("query");
        assert_eq!(reused, None);

        db.update_password(client.id, "new-hash").await.expect("updated");
        let user = db.get_user(&client.id.into()).await.expect("user");
        assert_eq!(user.password_hash.as_deref(), Some("new-hash"));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_expired_password_reset_is_refused(pool: PgPool) {
        let db = Database::from_pool(pool);
        let now = Utc::now();

        db.create_password_reset(get_seed_client().id, "old", now - Duration::minutes(1))
            .await
            .expect("stored");

        let user_id = db.consume_password_reset("old", now).await.expect("query");
        assert_eq!(user_id, None);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_space_round_trip_keeps_lists(pool: PgPool) {
        let mut data = space_create("  Espaço Gourmet ");
        data.gallery = vec!["https://img.test/c.jpg".into(), "https://img.test/a.jpg".into()];
        data.features = vec!["Cozinha".into(), "Adega".into()];
        data.items_included = Some(vec!["Fogão".into()]);
        data.price = Some(Decimal::new(99990, 2));

        let created = create_space(&pool, &data).await.expect("created");
        assert_eq!(created.name, "Espaço Gourmet");
        assert_eq!(created.gallery, data.gallery);
        assert_eq!(created.features, data.features);
        assert_eq!(created.items_included, data.items_included);
        assert_eq!(created.price, data.price);

        let fetched = get_space(&pool, created.id).await.expect("query");
        assert_eq!(fetched, Some(created));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_create_space_validates(pool: PgPool) {
        let result = create_space(&pool, &space_create(" ")).await;
        assert!(matches!(result, Err(SpaceError::Invalid(_))));
        assert_eq!(count_spaces(&pool).await.expect("count"), 3);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_update_space(pool: PgPool) {
        let mut data = get_seed_hall().to_create();
        data.capacity = 350;
        data.price = None;
        data.gallery.reverse();

        let updated = update_space(&pool, get_seed_hall().id, &data)
            .await
            .expect("updated");
        assert_eq!(updated.capacity, 350);
        assert_eq!(updated.price, None);
        assert_eq!(updated.gallery, ["https://img.test/s2.jpg", "https://img.test/s1.jpg"]);
        assert!(updated.edited_at > get_seed_hall().edited_at);

        let missing = update_space(&pool, Uuid::new_v4(), &data).await;
        assert!(matches!(missing, Err(SpaceError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_delete_space(pool: PgPool) {
        let in_use = delete_space(&pool, get_seed_hall().id).await;
        assert!(matches!(in_use, Err(SpaceError::InUse(_))));

        delete_space(&pool, get_seed_deck_id()).await.expect("deleted");
        assert!(get_space(&pool, get_seed_deck_id()).await.expect("query").is_none());

        let again = delete_space(&pool, get_seed_deck_id()).await;
        assert!(matches!(again, Err(SpaceError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_space_listings(pool: PgPool) {
        let names: Vec<String> = list_spaces(&pool)
            .await
            .expect("spaces")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Deck da Piscina", "Quadra Poliesportiva", "Salão Nobre"]);

        let featured = list_featured_spaces(&pool, 2).await.expect("featured");
        let ids: Vec<Uuid> = featured.iter().map(|s| s.id).collect();
        assert_eq!(ids, [get_seed_hall().id, get_seed_court_id()]);

        let summaries = list_space_summaries(&pool).await.expect("summaries");
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].space_type, SpaceType::Outdoor);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_replace_all_spaces(pool: PgPool) {
        let catalog = default_spaces();

        let spaces = replace_all_spaces(&pool, &catalog).await.expect("restored");

        assert_eq!(spaces.len(), 10);
        assert!(spaces.iter().all(|s| s.price.is_none()));
        assert_eq!(count_spaces(&pool).await.expect("count"), 10);
        assert!(list_bookings(&pool).await.expect("bookings").is_empty());
        assert!(get_space(&pool, get_seed_hall().id).await.expect("query").is_none());
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_replace_all_spaces_invalid_catalog_changes_nothing(pool: PgPool) {
        let catalog = vec![space_create("Válido"), space_create("")];

        let result = replace_all_spaces(&pool, &catalog).await;

        assert!(matches!(result, Err(SpaceError::Invalid(_))));
        assert_eq!(count_spaces(&pool).await.expect("count"), 3);
        assert_eq!(list_bookings(&pool).await.expect("bookings").len(), 3);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_create_booking(pool: PgPool) {
        let booking = create_booking(
            &pool,
            &BookingCreate {
                space_id: get_seed_deck_id(),
                date: date("2026-03-10"),
                client_name: "  Festa da Firma ".into(),
                status: BookingStatus::Confirmed,
                total_value: Some(Decimal::new(400, 0)),
            },
        )
        .await
        .expect("created");

        assert_eq!(booking.client_name, "Festa da Firma");
        assert_eq!(booking.status, BookingStatus::Confirmed);

        let march = list_bookings_between(&pool, date("2026-03-01"), date("2026-03-31"))
            .await
            .expect("bookings");
        assert_eq!(march.len(), 3);
        assert!(march.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_create_booking_unknown_space(pool: PgPool) {
        let unknown = Uuid::new_v4();
        let result = create_booking(
            &pool,
            &BookingCreate {
                space_id: unknown,
                date: date("2026-03-10"),
                client_name: "Alguém".into(),
                status: BookingStatus::Pending,
                total_value: None,
            },
        )
        .await;

        assert!(matches!(result, Err(BookingError::UnknownSpace(id)) if id == unknown));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_update_booking_status(pool: PgPool) {
        let booking = update_booking_status(&pool, get_seed_pending_booking_id(), BookingStatus::Cancelled)
            .await
            .expect("updated");
        assert_eq!(booking.status, BookingStatus::Cancelled);

        let missing = update_booking_status(&pool, Uuid::new_v4(), BookingStatus::Confirmed).await;
        assert!(matches!(missing, Err(BookingError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_leads_by_email_ignores_case(pool: PgPool) {
        let leads = list_leads_by_email(&pool, " ana@x.COM ").await.expect("leads");

        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, get_seed_contact_lead_id());
        assert_eq!(leads[0].interest, "Casamento - teste");
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_lead_status_and_delete(pool: PgPool) {
        let id = get_seed_contact_lead_id();

        let lead = update_lead_status(&pool, id, LeadStatus::Converted)
            .await
            .expect("query")
            .expect("lead");
        assert_eq!(lead.status, LeadStatus::Converted);

        assert!(delete_lead(&pool, id).await.expect("query"));
        assert!(!delete_lead(&pool, id).await.expect("query"));
        assert!(get_lead(&pool, id).await.expect("query").is_none());
        assert!(update_lead_status(&pool, id, LeadStatus::New).await.expect("query").is_none());
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_create_lead_trims(pool: PgPool) {
        let lead = create_lead(
            &pool,
            &LeadCreate {
                name: " Bruno ".into(),
                email: " bruno@test.com ".into(),
                phone: " 27911112222 ".into(),
                interest: "Aniversário - 50 pessoas".into(),
                date: date("2026-07-01"),
                status: LeadStatus::New,
                source: Some("website_contact_form".into()),
            },
        )
        .await
        .expect("created");

        assert_eq!(lead.name, "Bruno");
        assert_eq!(lead.email, "bruno@test.com");
        assert_eq!(lead.phone, "27911112222");
        assert_eq!(list_leads(&pool).await.expect("leads")[0].id, lead.id);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_webhooks(pool: PgPool) {
        let all = list_webhooks(&pool).await.expect("webhooks");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].event, WebhookEvent::BookingCancelled);

        let active = list_active_webhooks_for(&pool, WebhookEvent::BookingCreated)
            .await
            .expect("webhooks");
        let ids: Vec<Uuid> = active.iter().map(|h| h.id).collect();
        assert_eq!(ids, [get_seed_active_created_hook_id()]);

        assert!(list_active_webhooks_for(&pool, WebhookEvent::BookingUpdated)
            .await
            .expect("webhooks")
            .is_empty());
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_webhook_lifecycle(pool: PgPool) {
        let invalid = create_webhook(&pool, "ftp://hooks.test", WebhookEvent::BookingCreated).await;
        assert!(matches!(invalid, Err(WebhookError::Invalid(_))));

        let hook = create_webhook(&pool, " https://hooks.test/novo ", WebhookEvent::BookingUpdated)
            .await
            .expect("created");
        assert_eq!(hook.url, "https://hooks.test/novo");
        assert!(hook.active);
        assert_eq!(hook.last_triggered, None);

        let off = set_webhook_active(&pool, hook.id, false).await.expect("toggled");
        assert!(!off.active);

        let now = Utc::now();
        touch_webhook(&pool, hook.id, now).await.expect("touched");
        let touched = get_webhook(&pool, hook.id).await.expect("hook");
        assert!(touched.last_triggered.is_some());

        delete_webhook(&pool, hook.id).await.expect("deleted");
        assert!(matches!(get_webhook(&pool, hook.id).await, Err(WebhookError::NotFound(_))));
        assert!(matches!(delete_webhook(&pool, hook.id).await, Err(WebhookError::NotFound(_))));
        assert!(matches!(
            set_webhook_active(&pool, hook.id, true).await,
            Err(WebhookError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_site_config(pool: PgPool) {
        let config = get_site_config(&pool).await.expect("config");
        assert_eq!(config.site_name, "APCEF Eventos");
        assert_eq!(config.google_analytics_id, None);

        let mut update = SiteConfigUpdate::from(&config);
        update.site_name = " Eventos Serra ".into();
        update.google_analytics_id = Some(" G-ABC ".into());
        update.facebook_pixel_id = Some("   ".into());

        let saved = update_site_config(&pool, update).await.expect("saved");
        assert_eq!(saved.id, config.id);
        assert_eq!(saved.site_name, "Eventos Serra");
        assert_eq!(saved.google_analytics_id.as_deref(), Some("G-ABC"));
        assert_eq!(saved.facebook_pixel_id, None);

        assert_eq!(get_site_config(&pool).await.expect("config"), saved);
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_site_config_falls_back_to_defaults(pool: PgPool) {
        sqlx::query("DELETE FROM site_settings")
            .execute(&pool)
            .await
            .expect("cleared");

        let config = get_site_config(&pool).await.expect("config");
        assert_eq!(config, SiteConfig::default());
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_dashboard_data_load(pool: PgPool) {
        let data = DashboardData::load(&pool).await;

        assert_eq!(data.leads.len(), 2);
        assert_eq!(data.bookings.len(), 3);
        assert_eq!(data.spaces.len(), 3);
        assert_eq!(data.profiles.len(), 4);
        assert_eq!(data.webhooks.len(), 3);
        assert_eq!(data.site_config.site_name, "APCEF Eventos");

        assert_eq!(data.leads_with(LeadStatus::New).count(), 1);
        assert_eq!(data.space_name(&get_seed_confirmed_booking()), "Salão Nobre");

        let mut orphan = get_seed_confirmed_booking();
        orphan.space_id = Uuid::new_v4();
        assert_eq!(data.space_name(&orphan), "Espaço removido");
    }

    #[sqlx::test(migrations = "./tests/migrations")]
    async fn test_dashboard_overview(pool: PgPool) {
        let data = DashboardData::load(&pool).await;

        let overview = data.overview(date("2026-03-15"));

        assert_eq!(overview.bookings_this_month, 2);
        assert_eq!(overview.new_leads, 1);
        assert_eq!(overview.recent_bookings.len(), 3);
        assert_eq!(overview.recent_bookings[0].0.date, date("2026-04-01"));
        assert_eq!(overview.recent_bookings[0].1, "Quadra Poliesportiva");
        assert_eq!(overview.recent_leads.len(), 2);
    }
}
