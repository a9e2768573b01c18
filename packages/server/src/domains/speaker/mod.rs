// Speaker domain: the per-speaker session roster and the featured-speaker
// cache refreshed off the request path.

pub mod actions;
pub mod featured;
pub mod models;
