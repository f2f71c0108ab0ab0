//! Text and JSON rendering of a [`DashboardSnapshot`].

use std::fmt::Write as _;

use dashboard_core::formatting::{format_count, format_currency, format_percent, format_roas};
use dashboard_core::labels::sort_label;
use dashboard_runtime::engine::{DashboardSnapshot, EngineState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    /// `settings.format` is validated by clap; anything but `json` is text.
    pub fn from_setting(format: &str) -> Self {
        if format.eq_ignore_ascii_case("json") {
            ReportFormat::Json
        } else {
            ReportFormat::Text
        }
    }
}

pub fn render(snapshot: &DashboardSnapshot, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(snapshot)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
    }
}

pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    let kpis = &snapshot.kpis;

    let _ = writeln!(out, "AG1 Creative Dashboard");
    let mut status_line = format!(
        "Filtres actifs: {} | Tri: {}",
        snapshot.config.active_filter_count(),
        sort_label(snapshot.config.sort)
    );
    if !snapshot.config.search_text.is_empty() {
        let _ = write!(status_line, " | Recherche: \"{}\"", snapshot.config.search_text);
    }
    if !snapshot.config.creator.is_empty() {
        let _ = write!(status_line, " | Créateur: \"{}\"", snapshot.config.creator);
    }
    if snapshot.state == EngineState::Loading {
        status_line.push_str(" | Chargement...");
    }
    let _ = writeln!(out, "{}", status_line);

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "Erreur: {} (données d'exemple affichées)", error);
    }
    if snapshot.warning_count > 0 {
        let _ = writeln!(out, "Avertissements de lecture: {}", snapshot.warning_count);
    }

    // ── KPI cards ─────────────────────────────────────────────────────────
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<22}{}", "Budget dépensé", format_currency(kpis.total_budget));
    let _ = writeln!(out, "{:<22}{}", "Conversions", format_count(kpis.total_conversions));
    let _ = writeln!(out, "{:<22}{}", "Revenu estimé", format_currency(kpis.total_revenue));
    let _ = writeln!(out, "{:<22}{}", "ROAS moyen", format_roas(kpis.average_roas));
    let _ = writeln!(
        out,
        "{:<22}{}",
        "Coût par conversion",
        format_currency(kpis.average_cost_per_conversion)
    );
    let _ = writeln!(
        out,
        "{:<22}{} ({} en ligne)",
        "Créatives",
        kpis.creative_count,
        kpis.active_count
    );

    if snapshot.view.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Aucune créative ne correspond aux filtres.");
        return out;
    }

    // ── Charts ────────────────────────────────────────────────────────────
    let _ = writeln!(out);
    let _ = writeln!(out, "ROAS par mois");
    for point in &snapshot.roas_by_month {
        let _ = writeln!(out, "  {:<20}{}", point.month, format_roas(point.roas));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Budget par produit");
    for point in &snapshot.budget_by_product {
        let _ = writeln!(out, "  {:<20}{}", point.product, format_currency(point.budget));
    }

    // ── Rankings ──────────────────────────────────────────────────────────
    let _ = writeln!(out);
    let _ = writeln!(out, "Top créatives (ROAS)");
    for (rank, creative) in snapshot.top_creatives.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({}) {}",
            rank + 1,
            creative.ad_name,
            creative.creator,
            format_roas(creative.roas)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top créateurs (conversions)");
    for (rank, creator) in snapshot.top_creators.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} {}",
            rank + 1,
            creator.creator,
            format_count(creator.conversions)
        );
    }

    // ── Creative list ─────────────────────────────────────────────────────
    let _ = writeln!(out);
    let _ = writeln!(out, "Créatives ({})", snapshot.view.len());
    for creative in snapshot.view.iter() {
        let date = creative
            .launch_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {} | {} | {} | {} | ROAS {} | {} | {} conv. | CTR {}",
            creative.ad_name,
            creative.product,
            creative.status,
            date,
            format_roas(creative.roas),
            format_currency(creative.budget),
            format_count(creative.conversions),
            format_percent(creative.click_rate)
        );
    }

    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::filters::{Choice, FilterConfig, FilterUpdate, Product};
    use dashboard_core::samples::sample_creatives;
    use dashboard_runtime::engine::AggregationEngine;

    fn snapshot(config: FilterConfig) -> DashboardSnapshot {
        AggregationEngine::with_records(sample_creatives(), config).snapshot()
    }

    #[test]
    fn test_format_from_setting() {
        assert_eq!(ReportFormat::from_setting("json"), ReportFormat::Json);
        assert_eq!(ReportFormat::from_setting("text"), ReportFormat::Text);
    }

    #[test]
    fn test_text_report_sections() {
        let text = render_text(&snapshot(FilterConfig::default()));
        assert!(text.contains("Filtres actifs: 0 | Tri: ROAS ↓"));
        assert!(text.contains("ROAS par mois"));
        assert!(text.contains("Budget par produit"));
        assert!(text.contains("Top créatives (ROAS)"));
        assert!(text.contains("Créatives (5)"));
        assert!(text.contains("AG1_UGC_Emma_Energie_V1"));
        assert!(!text.contains("Erreur"));
    }

    #[test]
    fn test_text_report_empty_view() {
        let mut config = FilterConfig::default();
        config.apply(FilterUpdate::SearchText("introuvable".to_string()));
        let text = render_text(&snapshot(config));
        assert!(text.contains("Aucune créative ne correspond aux filtres."));
        assert!(!text.contains("ROAS par mois"));
    }

    #[test]
    fn test_text_report_shows_error_and_filter_count() {
        let mut config = FilterConfig::default();
        config.apply(FilterUpdate::Product(Choice::Only(Product::Ag1Powder)));
        let mut snap = snapshot(config);
        snap.error = Some("Format CSV invalide".to_string());

        let text = render_text(&snap);
        assert!(text.contains("Filtres actifs: 1"));
        assert!(text.contains("Erreur: Format CSV invalide"));
    }

    #[test]
    fn test_json_report_is_valid() {
        let json = render(&snapshot(FilterConfig::default()), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "idle");
        assert_eq!(value["kpis"]["creative_count"], 5);
        assert_eq!(value["view"].as_array().unwrap().len(), 5);
        assert_eq!(value["top_creatives"].as_array().unwrap().len(), 5);
    }
}
