//! French display vocabulary for the dashboard.
//!
//! The export uses these strings verbatim, so they double as the values the
//! filters compare against.

use crate::filters::{ContentType, Dimension, Month, Product, SortOrder, Status};

/// Label of the wildcard selection.
pub const WILDCARD: &str = "Tous";

/// Status label of a creative that is currently running.
pub const STATUS_ACTIVE: &str = "En ligne";

impl Dimension for Product {
    const VALUES: &'static [Self] = &[
        Product::Ag1Powder,
        Product::Ag1TravelPacks,
        Product::VitamineD3K2,
        Product::Omega3,
        Product::Shaker,
        Product::BundleComplet,
        Product::Abonnement,
    ];

    fn label(self) -> &'static str {
        match self {
            Product::Ag1Powder => "AG1 Powder",
            Product::Ag1TravelPacks => "AG1 Travel Packs",
            Product::VitamineD3K2 => "Vitamine D3+K2",
            Product::Omega3 => "Omega-3",
            Product::Shaker => "Shaker",
            Product::BundleComplet => "Bundle Complet",
            Product::Abonnement => "Abonnement",
        }
    }
}

impl Dimension for Month {
    const VALUES: &'static [Self] = &[
        Month::July2025,
        Month::August2025,
        Month::September2025,
        Month::October2025,
        Month::November2025,
    ];

    fn label(self) -> &'static str {
        match self {
            Month::July2025 => "Juillet 2025",
            Month::August2025 => "Août 2025",
            Month::September2025 => "Septembre 2025",
            Month::October2025 => "Octobre 2025",
            Month::November2025 => "Novembre 2025",
        }
    }
}

impl Dimension for Status {
    const VALUES: &'static [Self] = &[
        Status::Live,
        Status::Stopped,
        Status::Paused,
        Status::Archived,
    ];

    fn label(self) -> &'static str {
        match self {
            Status::Live => STATUS_ACTIVE,
            Status::Stopped => "Arrêtée",
            Status::Paused => "En pause",
            Status::Archived => "Archivée",
        }
    }
}

impl Dimension for ContentType {
    const VALUES: &'static [Self] = &[
        ContentType::Ugc,
        ContentType::Podcast,
        ContentType::StaticImage,
        ContentType::MotionVideo,
        ContentType::Testimonial,
    ];

    fn label(self) -> &'static str {
        match self {
            ContentType::Ugc => "UGC",
            ContentType::Podcast => "Podcast",
            ContentType::StaticImage => "Image statique",
            ContentType::MotionVideo => "Motion/Vidéo",
            ContentType::Testimonial => "Témoignage",
        }
    }
}

/// Arrow-style label shown in the sort picker.
pub fn sort_label(order: SortOrder) -> &'static str {
    match order {
        SortOrder::RoasDesc => "ROAS ↓",
        SortOrder::RoasAsc => "ROAS ↑",
        SortOrder::BudgetDesc => "Budget ↓",
        SortOrder::BudgetAsc => "Budget ↑",
        SortOrder::ConversionsDesc => "Conversions ↓",
        SortOrder::ConversionsAsc => "Conversions ↑",
        SortOrder::DateDesc => "Date ↓",
        SortOrder::DateAsc => "Date ↑",
    }
}

/// Position of `label` in the chronological month sequence, if it is known.
pub fn month_rank(label: &str) -> Option<usize> {
    Month::VALUES.iter().position(|m| m.label() == label)
}
