//! Binding and validation of the ledger entry form.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::db::models::{Category, CategoryId, EntryFields, LedgerEntry};

pub const MEMO_MAX_CHARS: usize = 500;
/// Accepted range of `money`, that of a 32-bit integer column.
pub const MONEY_MIN: i64 = i32::MIN as i64;
pub const MONEY_MAX: i64 = i32::MAX as i64;
/// Four-digit years only; stored dates must sort as text.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

const REQUIRED: &str = "This field is required.";
const INVALID_DATE: &str = "Enter a valid date.";
const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
const INVALID_NUMBER: &str = "Enter a whole number.";

/// Raw submitted values. Kept as strings so an invalid submission can be
/// shown back to the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryForm {
    pub date: String,
    pub category: String,
    pub money: String,
    pub memo: String,
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl EntryForm {
    /// Validate against the known categories and produce storable fields.
    pub fn validate(&self, categories: &[Category]) -> Result<EntryFields, FormErrors> {
        let mut errors = FormErrors::default();

        let date = match self.date.trim() {
            "" => {
                errors.add("date", REQUIRED);
                None
            }
            s => {
                let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .filter(|d| YEAR_RANGE.contains(&d.year()));
                if parsed.is_none() {
                    errors.add("date", INVALID_DATE);
                }
                parsed
            }
        };

        let category_id = match self.category.trim() {
            "" => {
                errors.add("category", REQUIRED);
                None
            }
            s => {
                let found = s
                    .parse::<CategoryId>()
                    .ok()
                    .filter(|id| categories.iter().any(|c| c.id == *id));
                if found.is_none() {
                    errors.add("category", INVALID_CHOICE);
                }
                found
            }
        };

        let money = match self.money.trim() {
            "" => {
                errors.add("money", REQUIRED);
                None
            }
            s => match s.parse::<i64>() {
                Err(_) => {
                    errors.add("money", INVALID_NUMBER);
                    None
                }
                Ok(n) if n > MONEY_MAX => {
                    errors.add(
                        "money",
                        format!("Ensure this value is less than or equal to {MONEY_MAX}."),
                    );
                    None
                }
                Ok(n) if n < MONEY_MIN => {
                    errors.add(
                        "money",
                        format!("Ensure this value is greater than or equal to {MONEY_MIN}."),
                    );
                    None
                }
                Ok(n) => Some(n),
            },
        };

        let memo = self.memo.trim();
        let memo_chars = memo.chars().count();
        if memo_chars > MEMO_MAX_CHARS {
            errors.add(
                "memo",
                format!(
                    "Ensure this value has at most {MEMO_MAX_CHARS} characters (it has {memo_chars})."
                ),
            );
        }

        match (date, category_id, money) {
            (Some(date), Some(category_id), Some(money)) if errors.is_empty() => Ok(EntryFields {
                date,
                category_id,
                money,
                memo: memo.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&LedgerEntry> for EntryForm {
    fn from(e: &LedgerEntry) -> Self {
        Self {
            date: e.date.format("%Y-%m-%d").to_string(),
            category: e.category_id.to_string(),
            money: e.money.to_string(),
            memo: e.memo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                category_name: "Food".to_string(),
            },
            Category {
                id: 2,
                category_name: "Transport".to_string(),
            },
        ]
    }

    fn form(date: &str, category: &str, money: &str, memo: &str) -> EntryForm {
        EntryForm {
            date: date.to_string(),
            category: category.to_string(),
            money: money.to_string(),
            memo: memo.to_string(),
        }
    }

    #[test]
    fn binds_valid_submission() {
        let fields = form(" 2024-01-05 ", "1", "-1000", "  lunch ")
            .validate(&categories())
            .unwrap();
        assert_eq!(
            fields,
            EntryFields {
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                category_id: 1,
                money: -1000,
                memo: "lunch".to_string(),
            }
        );
    }

    #[test]
    fn memo_is_optional() {
        assert!(form("2024-01-05", "2", "300", "").validate(&categories()).is_ok());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = EntryForm::default().validate(&categories()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["category", "date", "money"]);
        assert_eq!(errors.field("date"), [REQUIRED]);
        assert!(errors.field("memo").is_empty());
    }

    #[test]
    fn rejects_malformed_values() {
        let errors = form("2024-02-30", "9", "12.5", "")
            .validate(&categories())
            .unwrap_err();
        assert_eq!(errors.field("date"), [INVALID_DATE]);
        assert_eq!(errors.field("category"), [INVALID_CHOICE]);
        assert_eq!(errors.field("money"), [INVALID_NUMBER]);

        let errors = form("2024-01-01", "Food", "99999999999999999999", "")
            .validate(&categories())
            .unwrap_err();
        assert_eq!(errors.field("category"), [INVALID_CHOICE]);
        assert_eq!(errors.field("money"), [INVALID_NUMBER]);
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        for date in ["-0001-01-05", "+12345-01-05", "0000-12-31", "10000-01-01"] {
            let errors = form(date, "1", "1", "").validate(&categories()).unwrap_err();
            assert_eq!(errors.field("date"), [INVALID_DATE], "{date}");
        }
        assert!(form("0001-01-01", "1", "1", "").validate(&categories()).is_ok());
        assert!(form("9999-12-31", "1", "1", "").validate(&categories()).is_ok());
    }

    #[test]
    fn bounds_money_to_32_bits() {
        assert!(form("2024-01-01", "1", "2147483647", "").validate(&categories()).is_ok());
        assert!(form("2024-01-01", "1", "-2147483648", "").validate(&categories()).is_ok());

        let errors = form("2024-01-01", "1", "5000000000000000000", "")
            .validate(&categories())
            .unwrap_err();
        assert_eq!(
            errors.field("money"),
            ["Ensure this value is less than or equal to 2147483647."]
        );

        let errors = form("2024-01-01", "1", "-2147483649", "")
            .validate(&categories())
            .unwrap_err();
        assert_eq!(
            errors.field("money"),
            ["Ensure this value is greater than or equal to -2147483648."]
        );
    }

    #[test]
    fn memo_length_counts_characters() {
        let ok = "家".repeat(MEMO_MAX_CHARS);
        assert!(form("2024-01-01", "1", "1", &ok).validate(&categories()).is_ok());

        let long = "家".repeat(MEMO_MAX_CHARS + 1);
        let errors = form("2024-01-01", "1", "1", &long)
            .validate(&categories())
            .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["memo"]);
    }

    #[test]
    fn prefills_from_entry() {
        let entry = LedgerEntry {
            id: 7,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            category_id: 2,
            category_name: "Transport".to_string(),
            money: 300,
            memo: "bus".to_string(),
        };
        assert_eq!(
            EntryForm::from(&entry),
            form("2024-03-09", "2", "300", "bus")
        );
    }
}
