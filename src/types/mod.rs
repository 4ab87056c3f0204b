pub mod month;

pub use month::YearMonth;
