// Attendee profile domain: lazy creation, shirt size, attended conferences
// and the session wishlist.

pub mod actions;
pub mod data;
pub mod models;
