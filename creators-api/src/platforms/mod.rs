//! One view per vendor area. Each view borrows the shared client and maps its
//! methods 1:1 onto Scrape Creators endpoints.
pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod reddit;
pub mod truthsocial;
pub mod twitter;
pub mod youtube;
