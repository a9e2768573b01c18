// Session domain: sessions inside a conference, the speaker linker entry
// point and attendee wishlists.

pub mod actions;
pub mod data;
pub mod models;
pub mod wishlist;
