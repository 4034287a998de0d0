#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use venuedesk::models::*;

const SQL_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%#z";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(s, SQL_TIME_FMT)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("Invalid date in test helper")
}

pub fn id(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid uuid in test helper")
}

pub fn get_seed_super_admin() -> User {
    User {
        id: id("00000000-0000-0000-0000-000000000001"),
        email: "admin@test.com".to_string(),
        full_name: "Admin Principal".to_string(),
        role: UserRole::SuperAdmin,
        password_hash: None,
        protected: true,
        created_at: parse_time("2026-01-02 10:00:00+00"),
        edited_at: parse_time("2026-01-02 10:00:00+00"),
    }
}

pub fn get_seed_editor() -> User {
    User {
        id: id("00000000-0000-0000-0000-000000000002"),
        email: "editor@test.com".to_string(),
        full_name: "Edna Editora".to_string(),
        role: UserRole::Editor,
        password_hash: Some("not-a-real-hash".to_string()),
        protected: false,
        created_at: parse_time("2026-01-03 10:00:00+00"),
        edited_at: parse_time("2026-01-03 10:00:00+00"),
    }
}

pub fn get_seed_client() -> User {
    User {
        id: id("00000000-0000-0000-0000-000000000003"),
        email: "ana@x.com".to_string(),
        full_name: "Ana Souza".to_string(),
        role: UserRole::User,
        password_hash: Some("not-a-real-hash".to_string()),
        protected: false,
        created_at: parse_time("2026-01-04 10:00:00+00"),
        edited_at: parse_time("2026-01-04 10:00:00+00"),
    }
}

/// Editor profile created from the admin panel, never claimed.
pub fn get_seed_unclaimed() -> User {
    User {
        id: id("00000000-0000-0000-0000-000000000004"),
        email: "pending@test.com".to_string(),
        full_name: "Perfil Pendente".to_string(),
        role: UserRole::Editor,
        password_hash: None,
        protected: false,
        created_at: parse_time("2026-01-05 10:00:00+00"),
        edited_at: parse_time("2026-01-05 10:00:00+00"),
    }
}

pub fn get_seed_hall() -> Space {
    Space {
        id: id("10000000-0000-0000-0000-000000000001"),
        name: "Salão Nobre".to_string(),
        description: "Salão climatizado para recepções.".to_string(),
        capacity: 300,
        price: Some(Decimal::new(150000, 2)),
        space_type: SpaceType::Social,
        image: "https://img.test/salao.jpg".to_string(),
        gallery: vec![
            "https://img.test/s1.jpg".to_string(),
            "https://img.test/s2.jpg".to_string(),
        ],
        video_url: None,
        features: vec!["Ar condicionado".to_string(), "Palco".to_string()],
        availability: Some("Sábado e Domingo".to_string()),
        items_included: Some(vec!["Mesas".to_string(), "Cadeiras".to_string()]),
        created_at: parse_time("2026-01-02 12:00:00+00"),
        edited_at: parse_time("2026-01-02 12:00:00+00"),
    }
}

pub fn get_seed_court_id() -> Uuid {
    id("10000000-0000-0000-0000-000000000002")
}

/// Has no bookings, so it can be deleted.
pub fn get_seed_deck_id() -> Uuid {
    id("10000000-0000-0000-0000-000000000003")
}

pub fn get_seed_confirmed_booking() -> Booking {
    Booking {
        id: id("20000000-0000-0000-0000-000000000001"),
        space_id: get_seed_hall().id,
        date: date("2026-03-10"),
        client_name: "Carlos Lima".to_string(),
        status: BookingStatus::Confirmed,
        total_value: Some(Decimal::new(150000, 2)),
        created_at: parse_time("2026-02-01 09:00:00+00"),
    }
}

pub fn get_seed_pending_booking_id() -> Uuid {
    id("20000000-0000-0000-0000-000000000002")
}

pub fn get_seed_contact_lead_id() -> Uuid {
    id("30000000-0000-0000-0000-000000000001")
}

pub fn get_seed_active_created_hook_id() -> Uuid {
    id("40000000-0000-0000-0000-000000000001")
}

pub fn get_seed_inactive_hook_id() -> Uuid {
    id("40000000-0000-0000-0000-000000000002")
}

/// In-memory booking for pure tests.
pub fn booking(space_id: Uuid, on: &str, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        space_id,
        date: date(on),
        client_name: "Cliente".to_string(),
        status,
        total_value: None,
        created_at: parse_time("2026-01-01 00:00:00+00"),
    }
}

pub fn space_create(name: &str) -> SpaceCreate {
    SpaceCreate {
        name: name.to_string(),
        description: "Descrição".to_string(),
        capacity: 50,
        price: None,
        space_type: SpaceType::Intimate,
        image: "https://img.test/novo.jpg".to_string(),
        gallery: Vec::new(),
        video_url: None,
        features: Vec::new(),
        availability: None,
        items_included: None,
    }
}
