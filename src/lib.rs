pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod report;
pub mod router;
pub mod types;
pub mod views;

pub use config::Config;
pub use db::{LedgerStore, SqliteLedgerStore};
pub use error::KakeiboError;
