use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::db::models::{Category, CategoryId, CategoryTotal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShare {
    pub category_name: String,
    pub percent: i64,
}

/// Share of total spend per category, in category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShareReport {
    pub total: i64,
    /// Serialized as a `{name: percent}` object that keeps category order.
    #[serde(rename = "category_dict", serialize_with = "shares_as_map")]
    pub shares: Vec<CategoryShare>,
}

impl CategoryShareReport {
    /// Every category gets a row; categories without entries, or any category
    /// when the ledger total is zero, get 0.
    pub fn build(categories: &[Category], totals: &[CategoryTotal]) -> Self {
        let sums: HashMap<CategoryId, i64> =
            totals.iter().map(|t| (t.category_id, t.total)).collect();
        let total = totals.iter().fold(0i64, |acc, t| acc.saturating_add(t.total));

        let shares = categories
            .iter()
            .map(|c| {
                let percent = match sums.get(&c.id) {
                    Some(&sum) if total != 0 => floor_percent(sum, total),
                    _ => 0,
                };
                CategoryShare {
                    category_name: c.category_name.clone(),
                    percent,
                }
            })
            .collect();

        Self { total, shares }
    }

    pub fn percent_of(&self, category_name: &str) -> Option<i64> {
        self.shares
            .iter()
            .find(|s| s.category_name == category_name)
            .map(|s| s.percent)
    }
}

/// `floor(part / whole * 100)` without going through floating point.
fn floor_percent(part: i64, whole: i64) -> i64 {
    let n = i128::from(part) * 100;
    let d = i128::from(whole);
    let mut q = n / d;
    if n % d != 0 && ((n < 0) != (d < 0)) {
        q -= 1;
    }
    i64::try_from(q).unwrap_or(if q < 0 { i64::MIN } else { i64::MAX })
}

fn shares_as_map<S: Serializer>(shares: &[CategoryShare], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(shares.len()))?;
    for s in shares {
        map.serialize_entry(&s.category_name, &s.percent)?;
    }
    map.end()
}
