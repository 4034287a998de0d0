pub use booking::*;
pub use integration::*;
pub use lead::*;
pub use password_reset::*;
pub use site_config::*;
pub use space::*;
pub use space_type::*;
pub use user::*;
pub use user_role::*;
pub use webhook::*;

mod booking;
mod integration;
mod lead;
mod password_reset;
mod site_config;
mod space;
mod space_type;
mod user;
mod user_role;
mod webhook;
