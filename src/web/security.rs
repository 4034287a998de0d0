use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "vd_uid";

const LOGIN_MAX_ATTEMPTS: usize = 5;
const LOGIN_WINDOW: Duration = Duration::from_secs(300);
const RESET_MAX_ATTEMPTS: usize = 3;
const RESET_WINDOW: Duration = Duration::from_secs(3600);

/// Sliding-window attempt counter, keyed by purpose and client address.
/// Process-local.
pub struct RateLimiter {
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt under `key`. False once `max` attempts already
    /// fall inside `window`; refused attempts are not recorded.
    pub fn allow(&self, key: &str, max: usize, window: Duration) -> bool {
        let now = Instant::now();
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        attempts.retain(|_, times| {
            times.retain(|t| now.duration_since(*t) < window);
            !times.is_empty()
        });

        let times = attempts.entry(key.to_string()).or_default();
        if times.len() >= max {
            return false;
        }

        times.push(now);
        true
    }

    pub fn allow_login(&self, client_ip: &str) -> bool {
        self.allow(&format!("login:{}", client_ip), LOGIN_MAX_ATTEMPTS, LOGIN_WINDOW)
    }

    pub fn allow_password_reset(&self, client_ip: &str) -> bool {
        self.allow(&format!("reset:{}", client_ip), RESET_MAX_ATTEMPTS, RESET_WINDOW)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

pub fn session_cookie(user_id: Uuid, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, user_id.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::days(7))
        .finish()
}

pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(Uuid::nil(), secure);
    cookie.make_removal();
    cookie
}
