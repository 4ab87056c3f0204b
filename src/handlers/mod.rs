pub mod api;
pub mod entries;
pub mod reports;
