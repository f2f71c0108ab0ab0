//! Filter and sort configuration for the creatives dashboard.
//!
//! Every selectable option is a closed enumeration. Display strings are kept
//! apart in [`crate::labels`], so the comparison logic here never depends on
//! the UI vocabulary directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::labels::WILDCARD;

// ── Dimensions ────────────────────────────────────────────────────────────────

/// A filterable dimension with a fixed set of concrete values.
pub trait Dimension: Copy + Eq + fmt::Debug + 'static {
    /// Every concrete value, in display order.
    const VALUES: &'static [Self];

    /// Label as it appears in the export and in the UI.
    fn label(self) -> &'static str;

    /// Resolve a label back to its value.
    fn from_label(label: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Ag1Powder,
    Ag1TravelPacks,
    VitamineD3K2,
    Omega3,
    Shaker,
    BundleComplet,
    Abonnement,
}

/// Reporting months, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Month {
    July2025,
    August2025,
    September2025,
    October2025,
    November2025,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Live,
    Stopped,
    Paused,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Ugc,
    Podcast,
    StaticImage,
    MotionVideo,
    Testimonial,
}

// ── Choice ────────────────────────────────────────────────────────────────────

/// Either the wildcard ("all") selection or exactly one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: Dimension> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    /// `true` when a record field holding `value` passes this selection.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(selected) => selected.label() == value,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Choice::All => WILDCARD,
            Choice::Only(selected) => selected.label(),
        }
    }

    /// Parse a display label, accepting the wildcard label for [`Choice::All`].
    pub fn parse_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case(WILDCARD) {
            return Some(Choice::All);
        }
        T::from_label(label).map(Choice::Only)
    }
}

// ── SortOrder ─────────────────────────────────────────────────────────────────

/// The eight mutually exclusive orderings of the creatives list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    RoasDesc,
    RoasAsc,
    BudgetDesc,
    BudgetAsc,
    ConversionsDesc,
    ConversionsAsc,
    DateDesc,
    DateAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 8] = [
        SortOrder::RoasDesc,
        SortOrder::RoasAsc,
        SortOrder::BudgetDesc,
        SortOrder::BudgetAsc,
        SortOrder::ConversionsDesc,
        SortOrder::ConversionsAsc,
        SortOrder::DateDesc,
        SortOrder::DateAsc,
    ];

    /// Stable machine key used on the command line and in saved settings.
    pub fn key(self) -> &'static str {
        match self {
            SortOrder::RoasDesc => "roas-desc",
            SortOrder::RoasAsc => "roas-asc",
            SortOrder::BudgetDesc => "budget-desc",
            SortOrder::BudgetAsc => "budget-asc",
            SortOrder::ConversionsDesc => "conversions-desc",
            SortOrder::ConversionsAsc => "conversions-asc",
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(
            self,
            SortOrder::RoasDesc
                | SortOrder::BudgetDesc
                | SortOrder::ConversionsDesc
                | SortOrder::DateDesc
        )
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortOrder {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SortOrder::ALL
            .into_iter()
            .find(|order| order.key() == wanted)
            .ok_or_else(|| DashboardError::Config(format!("unknown sort order: {}", s)))
    }
}

// ── FilterConfig ──────────────────────────────────────────────────────────────

/// A single edit to the [`FilterConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Product(Choice<Product>),
    Month(Choice<Month>),
    Status(Choice<Status>),
    ContentType(Choice<ContentType>),
    SearchText(String),
    Creator(String),
    Sort(SortOrder),
    Reset,
}

/// The active set of filter and sort selections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub product: Choice<Product>,
    pub month: Choice<Month>,
    pub status: Choice<Status>,
    pub content_type: Choice<ContentType>,
    /// Free-text search over ad name, creator and product.
    pub search_text: String,
    /// Substring match on the creator name.
    pub creator: String,
    pub sort: SortOrder,
}

impl FilterConfig {
    /// Apply one edit. Returns `true` when the configuration actually changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let before = self.clone();
        match update {
            FilterUpdate::Product(choice) => self.product = choice,
            FilterUpdate::Month(choice) => self.month = choice,
            FilterUpdate::Status(choice) => self.status = choice,
            FilterUpdate::ContentType(choice) => self.content_type = choice,
            FilterUpdate::SearchText(text) => self.search_text = text,
            FilterUpdate::Creator(text) => self.creator = text,
            FilterUpdate::Sort(order) => self.sort = order,
            FilterUpdate::Reset => self.reset(),
        }
        *self != before
    }

    /// Restore every selection to its default, including the sort order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `true` when any filter (not the sort) narrows the record set.
    pub fn has_active_filters(&self) -> bool {
        !self.product.is_all()
            || !self.month.is_all()
            || !self.status.is_all()
            || !self.content_type.is_all()
            || !self.creator.is_empty()
            || !self.search_text.is_empty()
    }

    /// Number of dimension filters (product, month, status, content type)
    /// that are set to a concrete value.
    pub fn active_filter_count(&self) -> usize {
        [
            self.product.is_all(),
            self.month.is_all(),
            self.status.is_all(),
            self.content_type.is_all(),
        ]
        .iter()
        .filter(|is_all| !**is_all)
        .count()
    }
}
