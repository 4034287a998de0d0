pub use bookings::*;
pub use db::*;
pub use leads::*;
pub use site_settings::*;
pub use spaces::*;
pub use webhooks::*;

mod bookings;
mod db;
mod leads;
mod site_settings;
mod spaces;
mod users;
mod webhooks;
