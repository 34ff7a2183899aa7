use chrono::NaiveDate;
use serde_json::Value;
use std::fmt::Write;

use crate::domain::{
    DashboardReport, RedemptionsReport, TraceabilityReport, display_value, is_truthy,
};

pub const EMPTY_CITY_MESSAGE: &str = "No recycling activity recorded for selected date range.";
const MISSING_LABEL: &str = "—";

// Label/value pair shown as a summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub label: &'static str,
    pub value: String,
}

// Name/count row of a redemption breakdown table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub label: String,
    pub count: String,
}

fn card(label: &'static str, value: impl Into<String>) -> Card {
    Card {
        label,
        value: value.into(),
    }
}

fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

pub fn traceability_cards(report: &TraceabilityReport) -> Vec<Card> {
    vec![
        card("Verified Units Recycled", report.total_scans.to_string()),
        card("Verified Recycling Events", report.validated_scans.to_string()),
        card(
            "Brand-Funded Loyalty Points Issued",
            report.eco_points_issued.to_string(),
        ),
        card(
            "Engaged Consumers",
            report.unique_consumers.unwrap_or(0.0).to_string(),
        ),
        card(
            "Avg Units per Engaged Consumer",
            format!("{:.2}", report.avg_units_per_consumer.unwrap_or(0.0)),
        ),
        card("Points Redemption Rate", percent(report.redemption_rate)),
    ]
}

pub fn redemption_cards(report: &RedemptionsReport) -> Vec<Card> {
    let totals = &report.totals;
    vec![
        card("Total Redemptions", totals.total_redemptions.to_string()),
        card("Active Tokens", totals.active_tokens.to_string()),
        card("Expired Tokens", totals.expired_tokens.to_string()),
        card("Redemption Rate", percent(totals.redemption_rate)),
    ]
}

fn first_truthy(row: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find(|value| is_truthy(value))
        .map(display_value)
}

fn breakdown_rows(rows: &[Value], label_keys: &[&str]) -> Vec<BreakdownRow> {
    rows.iter()
        .map(|row| BreakdownRow {
            label: first_truthy(row, label_keys).unwrap_or_else(|| MISSING_LABEL.to_string()),
            count: first_truthy(row, &["count", "redemptions"]).unwrap_or_else(|| "0".to_string()),
        })
        .collect()
}

pub fn reward_rows(report: &RedemptionsReport) -> Vec<BreakdownRow> {
    breakdown_rows(&report.redemptions_by_reward, &["reward_name", "name"])
}

pub fn partner_rows(report: &RedemptionsReport) -> Vec<BreakdownRow> {
    breakdown_rows(
        &report.redemptions_by_partner,
        &["partner_name", "name", "partner"],
    )
}

// ISO dates render as "05 Feb"; anything else is shown as sent.
pub fn trend_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|date| date.format("%d %b").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn write_cards(out: &mut String, title: &str, cards: &[Card]) {
    let _ = writeln!(out, "{title}");
    let width = cards.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
    for c in cards {
        let _ = writeln!(out, "  {:<width$}  {}", c.label, c.value, width = width);
    }
    out.push('\n');
}

fn write_breakdown(out: &mut String, title: &str, header: &str, rows: &[BreakdownRow]) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  {header} | Redemptions");
    for row in rows {
        let _ = writeln!(out, "  {} | {}", row.label, row.count);
    }
    out.push('\n');
}

/// Renders the whole dashboard as plain text for terminal output.
pub fn render_dashboard(report: &DashboardReport) -> String {
    let trace = &report.traceability;
    let mut out = String::new();

    write_cards(&mut out, "Recycling", &traceability_cards(trace));
    write_cards(&mut out, "Redemptions", &redemption_cards(&report.redemptions));

    let _ = writeln!(out, "Daily Recycling Trend");
    for point in trace.daily_trend.as_deref().unwrap_or_default() {
        let _ = writeln!(out, "  {}  {}", trend_label(&point.date), point.units);
    }
    out.push('\n');

    let _ = writeln!(out, "Recycling by Product");
    for product in trace.per_product.as_deref().unwrap_or_default() {
        let _ = writeln!(out, "  {}  {}", product.product_name, product.units_recycled);
    }
    out.push('\n');

    let _ = writeln!(out, "Recycling Activity by City");
    let cities = trace.geo_breakdown.as_deref().unwrap_or_default();
    if cities.is_empty() {
        let _ = writeln!(out, "  {EMPTY_CITY_MESSAGE}");
    } else {
        let _ = writeln!(out, "  City | Units Recycled | Engaged Consumers");
        for row in cities {
            let _ = writeln!(out, "  {} | {} | {}", row.city, row.units, row.consumers);
        }
    }
    out.push('\n');

    write_breakdown(
        &mut out,
        "Redemptions By Reward",
        "Reward",
        &reward_rows(&report.redemptions),
    );
    write_breakdown(
        &mut out,
        "Redemptions By Partner",
        "Partner",
        &partner_rows(&report.redemptions),
    );

    out
}
