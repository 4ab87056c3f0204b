use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::db::models::{Category, CategoryId, CategoryTotal};
use crate::types::month::YearMonth;

/// Line colours, paired positionally with the category list.
pub const BORDER_COLORS: [&str; 10] = [
    "254,97,132,0.8",
    "54,164,235,0.8",
    "0,255,65,0.8",
    "255,241,15,0.8",
    "255,94,25,0.8",
    "84,77,203,0.8",
    "204,153,50,0.8",
    "214,216,165,0.8",
    "33,30,45,0.8",
    "52,38,89,0.8",
];

/// Fill colours, same hues as `BORDER_COLORS` at half opacity.
pub const BACKGROUND_COLORS: [&str; 10] = [
    "254,97,132,0.5",
    "54,164,235,0.5",
    "0,255,65,0.5",
    "255,241,15,0.5",
    "255,94,25,0.5",
    "84,77,203,0.5",
    "204,153,50,0.5",
    "214,216,165,0.5",
    "33,30,45,0.5",
    "52,38,89,0.5",
];

/// `[category_name, "r,g,b,a"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesColor(pub String, pub &'static str);

/// `[month, category_name, amount]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint(pub YearMonth, pub String, pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    pub x_label: Vec<YearMonth>,
    pub category_list: Vec<String>,
    pub border_color: Vec<SeriesColor>,
    pub background_color: Vec<SeriesColor>,
    /// Month-major, one row for every (month, category) pair.
    pub matrix_list: Vec<TrendPoint>,
}

/// One line of the chart: a category's amount for every month of `x_label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    pub label: String,
    pub data: Vec<i64>,
    pub border_color: Option<&'static str>,
    pub background_color: Option<&'static str>,
}

impl TrendReport {
    /// `categories` fixes the series order; `monthly` holds per-month category sums.
    pub fn build(categories: &[Category], monthly: &[(YearMonth, Vec<CategoryTotal>)]) -> Self {
        let x_label: Vec<YearMonth> = monthly
            .iter()
            .map(|(month, _)| *month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let sums: HashMap<(YearMonth, CategoryId), i64> = monthly
            .iter()
            .flat_map(|(month, totals)| {
                totals
                    .iter()
                    .map(move |t| ((*month, t.category_id), t.total))
            })
            .collect();

        let category_list: Vec<String> =
            categories.iter().map(|c| c.category_name.clone()).collect();

        let border_color = category_list
            .iter()
            .zip(BORDER_COLORS)
            .map(|(name, color)| SeriesColor(name.clone(), color))
            .collect();
        let background_color = category_list
            .iter()
            .zip(BACKGROUND_COLORS)
            .map(|(name, color)| SeriesColor(name.clone(), color))
            .collect();

        let matrix_list = x_label
            .iter()
            .flat_map(|month| {
                categories.iter().map(|c| {
                    let amount = sums.get(&(*month, c.id)).copied().unwrap_or(0);
                    TrendPoint(*month, c.category_name.clone(), amount)
                })
            })
            .collect();

        Self {
            x_label,
            category_list,
            border_color,
            background_color,
            matrix_list,
        }
    }

    pub fn amount(&self, month: YearMonth, category_name: &str) -> Option<i64> {
        self.matrix_list
            .iter()
            .find(|p| p.0 == month && p.1 == category_name)
            .map(|p| p.2)
    }

    /// Regroup the matrix into one series per category for a line chart.
    pub fn series(&self) -> Vec<TrendSeries> {
        let width = self.category_list.len();
        self.category_list
            .iter()
            .enumerate()
            .map(|(i, name)| TrendSeries {
                label: name.clone(),
                data: self
                    .matrix_list
                    .iter()
                    .skip(i)
                    .step_by(width)
                    .map(|p| p.2)
                    .collect(),
                border_color: self.border_color.get(i).map(|c| c.1),
                background_color: self.background_color.get(i).map(|c| c.1),
            })
            .collect()
    }
}
