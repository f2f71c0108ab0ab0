//! Filtering and sorting of the loaded creatives.
//!
//! A [`FilteredView`] is never edited in place; it is rebuilt from the full
//! record set and the current [`FilterConfig`] whenever either changes.

use std::cmp::Ordering;

use chrono::NaiveDate;
use dashboard_core::filters::{FilterConfig, SortOrder};
use dashboard_core::models::Creative;
use serde::Serialize;

/// The creatives that pass the current filters, in the selected order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilteredView {
    creatives: Vec<Creative>,
}

impl FilteredView {
    /// Filter `records` with `config` and sort the survivors.
    ///
    /// Filters run in a fixed order (product, month, status, content type,
    /// search text, creator) and all must pass. The sort is stable, so
    /// records with equal keys keep their load order.
    pub fn compute(records: &[Creative], config: &FilterConfig) -> Self {
        let search = config.search_text.to_lowercase();
        let creator = config.creator.to_lowercase();

        let mut creatives: Vec<Creative> = records
            .iter()
            .filter(|c| passes_dimensions(c, config))
            .filter(|c| search.is_empty() || matches_search(c, &search))
            .filter(|c| creator.is_empty() || c.creator.to_lowercase().contains(&creator))
            .cloned()
            .collect();

        sort_creatives(&mut creatives, config.sort);
        Self { creatives }
    }

    /// Wrap an already filtered and ordered sequence.
    pub fn from_creatives(creatives: Vec<Creative>) -> Self {
        Self { creatives }
    }

    pub fn creatives(&self) -> &[Creative] {
        &self.creatives
    }

    pub fn len(&self) -> usize {
        self.creatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Creative> {
        self.creatives.iter()
    }
}

/// Sort `creatives` in place by `order`; stable.
///
/// A missing launch date compares as the earliest possible date in both
/// directions, so undated creatives come first in `DateAsc` and last in
/// `DateDesc`.
pub fn sort_creatives(creatives: &mut [Creative], order: SortOrder) {
    match order {
        SortOrder::RoasDesc => creatives.sort_by(|a, b| cmp_f64(b.roas, a.roas)),
        SortOrder::RoasAsc => creatives.sort_by(|a, b| cmp_f64(a.roas, b.roas)),
        SortOrder::BudgetDesc => creatives.sort_by(|a, b| cmp_f64(b.budget, a.budget)),
        SortOrder::BudgetAsc => creatives.sort_by(|a, b| cmp_f64(a.budget, b.budget)),
        SortOrder::ConversionsDesc => creatives.sort_by(|a, b| b.conversions.cmp(&a.conversions)),
        SortOrder::ConversionsAsc => creatives.sort_by(|a, b| a.conversions.cmp(&b.conversions)),
        SortOrder::DateDesc => creatives.sort_by(|a, b| date_key(b).cmp(&date_key(a))),
        SortOrder::DateAsc => creatives.sort_by(|a, b| date_key(a).cmp(&date_key(b))),
    }
}

fn passes_dimensions(c: &Creative, config: &FilterConfig) -> bool {
    config.product.matches(&c.product)
        && config.month.matches(&c.month)
        && config.status.matches(&c.status)
        && config.content_type.matches(&c.content_type)
}

/// `needle` must already be lower-cased.
fn matches_search(c: &Creative, needle: &str) -> bool {
    c.ad_name.to_lowercase().contains(needle)
        || c.creator.to_lowercase().contains(needle)
        || c.product.to_lowercase().contains(needle)
}

fn date_key(c: &Creative) -> NaiveDate {
    c.launch_date.unwrap_or(NaiveDate::MIN)
}

/// Values are finite after parsing; `-0.0` and `0.0` tie.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
