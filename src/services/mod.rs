pub mod auth;
pub mod calendar;
pub mod catalog;
pub mod dashboard;
pub mod integrations;
pub mod leads;
pub mod tracking;
pub mod webhooks;
