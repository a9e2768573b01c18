// ConfHub - conference management API core
//
// This crate provides the backend API for conferences, sessions, speakers and
// attendee profiles, including the registration/wishlist engines and the
// derived announcement / featured-speaker caches.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
