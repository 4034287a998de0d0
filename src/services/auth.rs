use argon2::{
    Argon2, Params,
    password_hash::{
        Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use std::sync::OnceLock;

use crate::models::UserRole;

pub const MIN_PASSWORD_LEN: usize = 8;

pub struct PasswordManager;

static INSTANCE: OnceLock<Argon2> = OnceLock::new();
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

impl PasswordManager {
    fn engine() -> &'static Argon2<'static> {
        INSTANCE.get_or_init(|| {
            let params = Params::new(
                64 * 1024, // 64MB Memory (m)
                3,         // 3 Iterations (t)
                4,         // 4 Parallelism lanes (p)
                None,      // Default hash length (32 bytes)
            )
            .unwrap_or_default();

            Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
        })
    }

    pub fn hash_password(password: &str) -> Result<String, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::engine().hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, Error> {
        let parsed_hash = PasswordHash::new(stored_hash)?;

        let result = Self::engine().verify_password(password.as_bytes(), &parsed_hash);

        match result {
            Ok(_) => Ok(true),
            Err(Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Checks a login attempt. Accounts without a password still cost one
    /// verification, against a throwaway hash, so unknown emails and
    /// unclaimed profiles take as long as wrong passwords.
    pub fn verify_login(password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash.filter(|h| !h.is_empty()) {
            Some(hash) => Self::verify_password(password, hash).unwrap_or(false),
            None => {
                let dummy = DUMMY_HASH
                    .get_or_init(|| Self::hash_password("venuedesk-dummy-password").ok());
                if let Some(hash) = dummy {
                    let _ = Self::verify_password(password, hash);
                }
                false
            }
        }
    }
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("A senha deve ter pelo menos 8 caracteres.");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoginPortal {
    Client,
    Admin,
}

impl LoginPortal {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Client => "/login-cliente",
            Self::Admin => "/login-admin",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoginDestination {
    AdminDashboard,
    ClientDashboard,
    Denied,
}

impl LoginDestination {
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Self::AdminDashboard => Some("/painel-admin"),
            Self::ClientDashboard => Some("/painel-cliente"),
            Self::Denied => None,
        }
    }
}

/// Where a successfully authenticated user lands. Staff always go to the
/// back office; clients are refused on the admin portal.
pub fn login_destination(role: UserRole, portal: LoginPortal) -> LoginDestination {
    if role.is_staff() {
        return LoginDestination::AdminDashboard;
    }

    match portal {
        LoginPortal::Client => LoginDestination::ClientDashboard,
        LoginPortal::Admin => LoginDestination::Denied,
    }
}

pub fn reset_token_ttl() -> Duration {
    Duration::hours(1)
}

pub fn reset_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + reset_token_ttl()
}

/// 32 random bytes, hex encoded.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
