//! Server-side HTML rendered with maud.

pub mod entries;
pub mod reports;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;

use crate::error::KakeiboError;
use crate::router::{CATEGORY_SHARE_VIEW, ENTRIES_VIEW, NEW_ENTRY_VIEW, TREND_VIEW};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: .4rem .6rem; text-align: left; }
td.money { text-align: right; }
.errorlist { color: #b00020; margin: .2rem 0; padding-left: 1rem; }
form p { margin: .6rem 0; }
"#;

pub(crate) fn base(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Kakeibo" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    a href=(ENTRIES_VIEW) { "Entries" }
                    a href=(NEW_ENTRY_VIEW) { "New entry" }
                    a href=(CATEGORY_SHARE_VIEW) { "Category share" }
                    a href=(TREND_VIEW) { "Monthly trend" }
                }
                h1 { (title) }
                (content)
            }
        }
    }
}

/// Script body that draws a Chart.js chart with `config` on `<canvas id="chart">`.
pub(crate) fn chart_script<T: Serialize>(config: &T) -> Result<PreEscaped<String>, KakeiboError> {
    // keep "</script>" inside string values from ending the element
    let json = serde_json::to_string(config)?.replace("</", "<\\/");
    Ok(PreEscaped(format!(
        "new Chart(document.getElementById(\"chart\"), {json});"
    )))
}

pub(crate) fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
