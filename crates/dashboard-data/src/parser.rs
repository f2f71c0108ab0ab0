//! CSV parsing for the creative performance export.
//!
//! Columns are resolved by header name, so exports with reordered or missing
//! columns still load. Problems inside a row never abort the load: short rows
//! are dropped and unreadable cells fall back to zero / no date, each reported
//! as a [`RowWarning`].

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Creative, CreativeId};
use regex::Regex;
use tracing::debug;

/// Header names of the export, exactly as the ads manager writes them.
pub mod columns {
    pub const AD_NAME: &str = "Nom de l'annonce";
    pub const PRODUCT: &str = "Produit";
    pub const CREATOR: &str = "Créateur";
    pub const CONTENT_TYPE: &str = "Type de contenu";
    pub const MARKETING_ANGLE: &str = "Angle marketing";
    pub const HOOK: &str = "Hook";
    pub const MONTH: &str = "Mois";
    pub const STATUS: &str = "Statut";
    pub const LAUNCH_DATE: &str = "Date de lancement";
    pub const BUDGET: &str = "Budget dépensé (€)";
    pub const CONVERSIONS: &str = "Conversions (achats)";
    pub const REVENUE: &str = "Revenu estimé (€)";
    pub const ROAS: &str = "ROAS";
    pub const COST_PER_CONVERSION: &str = "Coût par conversion (€)";
    pub const IMPRESSIONS: &str = "Impressions";
    pub const CLICKS: &str = "Clics";
    pub const CLICK_RATE: &str = "Taux de clic (%)";

    /// Every known column, in the export's usual order.
    pub const ALL: [&str; 17] = [
        AD_NAME,
        PRODUCT,
        CREATOR,
        CONTENT_TYPE,
        MARKETING_ANGLE,
        HOOK,
        MONTH,
        STATUS,
        LAUNCH_DATE,
        BUDGET,
        CONVERSIONS,
        REVENUE,
        ROAS,
        COST_PER_CONVERSION,
        IMPRESSIONS,
        CLICKS,
        CLICK_RATE,
    ];
}

/// `chrono` format of the launch-date column.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

// ── Warnings ──────────────────────────────────────────────────────────────────

/// What went wrong in a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowWarningKind {
    /// The row had fewer fields than the header and was dropped.
    TooFewFields { expected: usize, found: usize },
    /// A numeric cell could not be read and was stored as zero.
    UnparseableNumber { column: String, value: String },
    /// A launch date could not be read and was stored as absent.
    UnparseableDate { value: String },
}

/// A non-fatal problem found while parsing one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowWarning {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: RowWarningKind,
}

impl RowWarning {
    /// `true` when the row was discarded rather than repaired.
    pub fn is_dropped_row(&self) -> bool {
        matches!(self.kind, RowWarningKind::TooFewFields { .. })
    }
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RowWarningKind::TooFewFields { expected, found } => write!(
                f,
                "line {}: expected {} fields, found {}; row skipped",
                self.line, expected, found
            ),
            RowWarningKind::UnparseableNumber { column, value } => write!(
                f,
                "line {}: '{}' in column '{}' is not a number; using 0",
                self.line, value, column
            ),
            RowWarningKind::UnparseableDate { value } => {
                write!(f, "line {}: '{}' is not a dd/mm/yyyy date", self.line, value)
            }
        }
    }
}

/// Records parsed from one export together with per-row warnings.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub creatives: Vec<Creative>,
    pub warnings: Vec<RowWarning>,
}

impl ParseOutcome {
    /// Number of data rows that were dropped entirely.
    pub fn dropped_rows(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_dropped_row()).count()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse the raw export text into creatives.
///
/// Blank lines are ignored. The first remaining line is the header. Fails
/// with [`DashboardError::InvalidFormat`] when there is no header or no data
/// row after it.
pub fn parse_creatives(raw: &str) -> Result<ParseOutcome> {
    let lines: Vec<(usize, &str)> = raw
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| line.split('\r').map(move |part| (idx + 1, part)))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let Some(((_, header_line), data_lines)) = lines.split_first() else {
        return Err(DashboardError::InvalidFormat("no content".to_string()));
    };
    if data_lines.is_empty() {
        return Err(DashboardError::InvalidFormat(
            "header row without data rows".to_string(),
        ));
    }

    let headers = split_line(header_line.trim_start_matches('\u{feff}'));
    let mut column_map: HashMap<String, usize> = HashMap::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        column_map.entry(name.clone()).or_insert(idx);
    }

    let mut outcome = ParseOutcome::default();
    for (line_no, line) in data_lines {
        let values = split_line(line);
        if values.len() < headers.len() {
            outcome.warnings.push(RowWarning {
                line: *line_no,
                kind: RowWarningKind::TooFewFields {
                    expected: headers.len(),
                    found: values.len(),
                },
            });
            continue;
        }

        let mut row = Row {
            values: &values,
            columns: &column_map,
            line: *line_no,
            warnings: &mut outcome.warnings,
        };
        outcome.creatives.push(row.to_creative());
    }

    debug!(
        "Parsed {} creatives from {} data rows ({} dropped, {} warnings)",
        outcome.creatives.len(),
        data_lines.len(),
        outcome.dropped_rows(),
        outcome.warnings.len()
    );

    Ok(outcome)
}

/// Split one CSV line into trimmed fields.
///
/// A double quote toggles the quoted state and is not kept; a comma only
/// separates fields outside quotes.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Read a decimal cell such as `"1 250,50 €"` or `"3.5%"`.
///
/// Returns `None` when nothing numeric is left after cleaning.
pub fn parse_decimal(cell: &str) -> Option<f64> {
    let normalized = cell.replace(',', ".");
    let cleaned = decimal_noise().replace_all(&normalized, "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a non-negative integer cell such as `"125 000"`.
pub fn parse_integer(cell: &str) -> Option<u64> {
    let cleaned: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.parse::<u64>().ok()
}

/// Read a `dd/mm/yyyy` date cell.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), DATE_FORMAT).ok()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whitespace (including no-break spaces), currency and percent signs.
fn decimal_noise() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s€%]").expect("regex is valid"))
}

/// One data row bound to the header's column map.
struct Row<'a> {
    values: &'a [String],
    columns: &'a HashMap<String, usize>,
    line: usize,
    warnings: &'a mut Vec<RowWarning>,
}

impl Row<'_> {
    fn text(&self, column: &str) -> String {
        self.columns
            .get(column)
            .and_then(|&idx| self.values.get(idx))
            .cloned()
            .unwrap_or_default()
    }

    fn decimal(&mut self, column: &str) -> f64 {
        let cell = self.text(column);
        if cell.is_empty() {
            return 0.0;
        }
        parse_decimal(&cell).unwrap_or_else(|| {
            self.warn_number(column, cell);
            0.0
        })
    }

    fn integer(&mut self, column: &str) -> u64 {
        let cell = self.text(column);
        if cell.is_empty() {
            return 0;
        }
        parse_integer(&cell).unwrap_or_else(|| {
            self.warn_number(column, cell);
            0
        })
    }

    fn date(&mut self, column: &str) -> Option<NaiveDate> {
        let cell = self.text(column);
        if cell.is_empty() {
            return None;
        }
        let parsed = parse_date(&cell);
        if parsed.is_none() {
            self.warnings.push(RowWarning {
                line: self.line,
                kind: RowWarningKind::UnparseableDate { value: cell },
            });
        }
        parsed
    }

    fn warn_number(&mut self, column: &str, value: String) {
        self.warnings.push(RowWarning {
            line: self.line,
            kind: RowWarningKind::UnparseableNumber {
                column: column.to_string(),
                value,
            },
        });
    }

    fn to_creative(&mut self) -> Creative {
        Creative {
            id: CreativeId::new(),
            ad_name: self.text(columns::AD_NAME),
            product: self.text(columns::PRODUCT),
            creator: self.text(columns::CREATOR),
            content_type: self.text(columns::CONTENT_TYPE),
            marketing_angle: self.text(columns::MARKETING_ANGLE),
            hook: self.text(columns::HOOK),
            month: self.text(columns::MONTH),
            status: self.text(columns::STATUS),
            launch_date: self.date(columns::LAUNCH_DATE),
            budget: self.decimal(columns::BUDGET),
            conversions: self.integer(columns::CONVERSIONS),
            revenue: self.decimal(columns::REVENUE),
            roas: self.decimal(columns::ROAS),
            cost_per_conversion: self.decimal(columns::COST_PER_CONVERSION),
            impressions: self.integer(columns::IMPRESSIONS),
            clicks: self.integer(columns::CLICKS),
            click_rate: self.decimal(columns::CLICK_RATE),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Nom de l'annonce,Produit,Créateur,Type de contenu,Angle marketing,Hook,Mois,Statut,Date de lancement,Budget dépensé (€),Conversions (achats),Revenu estimé (€),ROAS,Coût par conversion (€),Impressions,Clics,Taux de clic (%)";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    const EMMA: &str = "AG1_UGC_Emma_Energie_V1,AG1 Powder,Emma Laurent,UGC,Énergie quotidienne,\"Ce qui a changé ma vie, vraiment\",Octobre 2025,En ligne,06/10/2025,\"2 500,00 €\",85,7650,3.06,\"29,41\",125 000,3750,3%";

    // ── split_line ────────────────────────────────────────────────────────────

    #[test]
    fn test_split_line_plain() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_line_quoted_comma() {
        assert_eq!(split_line("\"x, y\",z"), vec!["x, y", "z"]);
    }

    #[test]
    fn test_split_line_trims_and_keeps_empty_fields() {
        assert_eq!(split_line("  a , ,b  ,"), vec!["a", "", "b", ""]);
    }

    // ── cell parsers ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal("2 500,00 €"), Some(2500.0));
        assert_eq!(parse_decimal("3.5%"), Some(3.5));
        assert_eq!(parse_decimal("1\u{202f}200"), Some(1200.0));
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_parse_integer_variants() {
        assert_eq!(parse_integer("125 000"), Some(125_000));
        assert_eq!(parse_integer("12.5"), None);
        assert_eq!(parse_integer("-3"), None);
    }

    #[test]
    fn test_parse_date_variants() {
        assert_eq!(parse_date("06/10/2025"), NaiveDate::from_ymd_opt(2025, 10, 6));
        assert_eq!(parse_date("2025-10-06"), None);
        assert_eq!(parse_date("31/02/2025"), None);
    }

    // ── parse_creatives ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_full_row() {
        let outcome = parse_creatives(&csv(&[EMMA])).unwrap();
        assert_eq!(outcome.creatives.len(), 1);
        assert!(outcome.warnings.is_empty());

        let c = &outcome.creatives[0];
        assert_eq!(c.ad_name, "AG1_UGC_Emma_Energie_V1");
        assert_eq!(c.hook, "Ce qui a changé ma vie, vraiment");
        assert_eq!(c.launch_date, NaiveDate::from_ymd_opt(2025, 10, 6));
        assert_eq!(c.budget, 2500.0);
        assert_eq!(c.conversions, 85);
        assert_eq!(c.revenue, 7650.0);
        assert_eq!(c.roas, 3.06);
        assert_eq!(c.cost_per_conversion, 29.41);
        assert_eq!(c.impressions, 125_000);
        assert_eq!(c.clicks, 3750);
        assert_eq!(c.click_rate, 3.0);
    }

    #[test]
    fn test_columns_looked_up_by_name() {
        let raw = "ROAS,Produit,Nom de l'annonce\n2.5,Shaker,AG1_Shaker_V1\n";
        let outcome = parse_creatives(raw).unwrap();
        let c = &outcome.creatives[0];
        assert_eq!(c.ad_name, "AG1_Shaker_V1");
        assert_eq!(c.product, "Shaker");
        assert_eq!(c.roas, 2.5);
        assert_eq!(c.budget, 0.0);
        assert!(c.launch_date.is_none());
        assert_eq!(c.creator, "");
    }

    #[test]
    fn test_non_numeric_cell_becomes_zero_and_row_kept() {
        let row = EMMA.replace(",85,", ",beaucoup,");
        let outcome = parse_creatives(&csv(&[&row])).unwrap();
        assert_eq!(outcome.creatives.len(), 1);
        assert_eq!(outcome.creatives[0].conversions, 0);
        assert_eq!(
            outcome.warnings,
            vec![RowWarning {
                line: 2,
                kind: RowWarningKind::UnparseableNumber {
                    column: columns::CONVERSIONS.to_string(),
                    value: "beaucoup".to_string(),
                },
            }]
        );
    }

    #[test]
    fn test_blank_metric_cells_are_silent_zero() {
        let raw = "Nom de l'annonce,ROAS,Coût par conversion (€)\nA,,\n";
        let outcome = parse_creatives(raw).unwrap();
        assert_eq!(outcome.creatives[0].roas, 0.0);
        assert_eq!(outcome.creatives[0].cost_per_conversion, 0.0);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_short_rows_dropped_and_parsing_continues() {
        let outcome = parse_creatives(&csv(&["too,short", EMMA, "x", EMMA])).unwrap();
        assert_eq!(outcome.creatives.len(), 2);
        assert_eq!(outcome.dropped_rows(), 2);
        assert_eq!(outcome.warnings[0].line, 2);
        assert_eq!(
            outcome.warnings[0].kind,
            RowWarningKind::TooFewFields {
                expected: 17,
                found: 2
            }
        );
    }

    #[test]
    fn test_bad_date_is_absent_not_sentinel() {
        let row = EMMA.replace("06/10/2025", "bientôt");
        let outcome = parse_creatives(&csv(&[&row])).unwrap();
        assert!(outcome.creatives[0].launch_date.is_none());
        assert!(matches!(
            outcome.warnings[0].kind,
            RowWarningKind::UnparseableDate { .. }
        ));
    }

    #[test]
    fn test_blank_lines_and_crlf_ignored() {
        let raw = format!("{}\r\n\r\n{}\r\n   \r\n", HEADER, EMMA);
        let outcome = parse_creatives(&raw).unwrap();
        assert_eq!(outcome.creatives.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_header_bom_ignored() {
        let raw = "\u{feff}Nom de l'annonce,ROAS\nA,1.5\n";
        let outcome = parse_creatives(raw).unwrap();
        assert_eq!(outcome.creatives[0].ad_name, "A");
    }

    #[test]
    fn test_ids_unique_within_load() {
        let outcome = parse_creatives(&csv(&[EMMA, EMMA, EMMA])).unwrap();
        let ids: std::collections::HashSet<_> = outcome.creatives.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_empty_input_is_invalid_format() {
        assert!(matches!(parse_creatives(""), Err(DashboardError::InvalidFormat(_))));
        assert!(matches!(
            parse_creatives("\n  \n"),
            Err(DashboardError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_header_only_is_invalid_format() {
        assert!(matches!(
            parse_creatives(&format!("{}\n", HEADER)),
            Err(DashboardError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_warning_display() {
        let warning = RowWarning {
            line: 7,
            kind: RowWarningKind::TooFewFields {
                expected: 17,
                found: 3,
            },
        };
        assert_eq!(warning.to_string(), "line 7: expected 17 fields, found 3; row skipped");
    }
}
