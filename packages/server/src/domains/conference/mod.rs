// Conference domain: CRUD, the formatted filter query, the registration
// engine and the nearly-sold-out announcement cache.

pub mod actions;
pub mod announcements;
pub mod data;
pub mod models;
pub mod query;
pub mod registration;
