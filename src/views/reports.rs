use maud::{Markup, html};
use serde_json::json;

use super::{base, chart_script};
use crate::error::KakeiboError;
use crate::report::trend::BACKGROUND_COLORS;
use crate::report::{CategoryShareReport, TrendReport};

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4";

fn rgba(color: &str) -> String {
    format!("rgba({color})")
}

pub fn category_share_view(report: &CategoryShareReport) -> Result<Markup, KakeiboError> {
    let config = json!({
        "type": "pie",
        "data": {
            "labels": report.shares.iter().map(|s| &s.category_name).collect::<Vec<_>>(),
            "datasets": [{
                "data": report.shares.iter().map(|s| s.percent).collect::<Vec<_>>(),
                "backgroundColor": BACKGROUND_COLORS
                    .iter()
                    .cycle()
                    .take(report.shares.len())
                    .map(|c| rgba(c))
                    .collect::<Vec<_>>(),
            }],
        },
    });
    let script = chart_script(&config)?;

    Ok(base(
        "Category share",
        html! {
            canvas #chart {}
            table {
                thead { tr { th { "Category" } th { "Share (%)" } } }
                tbody {
                    @for s in &report.shares {
                        tr { td { (s.category_name) } td.money { (s.percent) } }
                    }
                }
            }
            script src=(CHART_JS) {}
            script { (script) }
        },
    ))
}

pub fn trend_view(report: &TrendReport) -> Result<Markup, KakeiboError> {
    let datasets: Vec<_> = report
        .series()
        .into_iter()
        .map(|s| {
            json!({
                "label": s.label,
                "data": s.data,
                "borderColor": s.border_color.map(rgba),
                "backgroundColor": s.background_color.map(rgba),
                "fill": false,
            })
        })
        .collect();
    let config = json!({
        "type": "line",
        "data": { "labels": report.x_label, "datasets": datasets },
    });
    let script = chart_script(&config)?;

    Ok(base(
        "Monthly trend",
        html! {
            @if report.x_label.is_empty() {
                p { "No entries recorded." }
            } @else {
                canvas #chart {}
                script src=(CHART_JS) {}
                script { (script) }
            }
        },
    ))
}
