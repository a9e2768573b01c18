pub mod announcements;
pub mod conferences;
pub mod health;
pub mod profile;
pub mod sessions;
pub mod speakers;
