// Business domains
pub mod conference;
pub mod profile;
pub mod session;
pub mod speaker;
