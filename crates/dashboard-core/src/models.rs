use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::labels::STATUS_ACTIVE;

/// Generated identifier for one creative, unique within a loaded set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreativeId(Uuid);

impl CreativeId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreativeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CreativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One advertising creative, as read from a row of the performance export.
///
/// Values are immutable once loaded; the dashboard only ever derives views
/// from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creative {
    /// Identifier generated at load time.
    pub id: CreativeId,
    /// "Nom de l'annonce".
    pub ad_name: String,
    /// "Produit".
    pub product: String,
    /// "Créateur".
    pub creator: String,
    /// "Type de contenu".
    pub content_type: String,
    /// "Angle marketing".
    pub marketing_angle: String,
    /// "Hook".
    pub hook: String,
    /// Month label, e.g. `"Octobre 2025"`.
    pub month: String,
    /// Lifecycle status label, e.g. `"En ligne"`.
    pub status: String,
    /// Launch date; `None` when the source cell was blank or unparseable.
    #[serde(default)]
    pub launch_date: Option<NaiveDate>,
    /// Budget spent, in euros.
    #[serde(default)]
    pub budget: f64,
    /// Purchases attributed to the creative.
    #[serde(default)]
    pub conversions: u64,
    /// Estimated revenue, in euros.
    #[serde(default)]
    pub revenue: f64,
    /// Return on ad spend as exported; not recomputed from budget/revenue.
    #[serde(default)]
    pub roas: f64,
    /// Cost per conversion, in euros.
    #[serde(default)]
    pub cost_per_conversion: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    /// Click-through rate in percent.
    #[serde(default)]
    pub click_rate: f64,
}

impl Creative {
    /// `true` when the creative is currently running ("En ligne").
    pub fn is_active(&self) -> bool {
        self.status.to_lowercase() == STATUS_ACTIVE.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids_are_unique() {
        let a = Creative::default();
        let b = Creative::default();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_is_active_matches_status_case_insensitively() {
        let live = Creative {
            status: "EN LIGNE".to_string(),
            ..Default::default()
        };
        let paused = Creative {
            status: "En pause".to_string(),
            ..Default::default()
        };
        assert!(live.is_active());
        assert!(!paused.is_active());
    }

    #[test]
    fn test_creative_serializes_missing_date_as_null() {
        let creative = Creative {
            ad_name: "AG1_UGC_Test".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&creative).unwrap();
        assert!(json["launch_date"].is_null());
        assert_eq!(json["ad_name"], "AG1_UGC_Test");
    }

    #[test]
    fn test_creative_id_display_is_uuid() {
        let id = CreativeId::new();
        assert_eq!(id.to_string().len(), 36);
    }
}
