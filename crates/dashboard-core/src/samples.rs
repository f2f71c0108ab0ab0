//! Built-in sample creatives.
//!
//! Served whenever the export cannot be loaded so the dashboard stays usable
//! offline.

use chrono::NaiveDate;

use crate::models::{Creative, CreativeId};

#[allow(clippy::too_many_arguments)]
fn sample(
    ad_name: &str,
    product: &str,
    creator: &str,
    content_type: &str,
    marketing_angle: &str,
    hook: &str,
    month: &str,
    status: &str,
    launch: (i32, u32, u32),
    budget: f64,
    conversions: u64,
    revenue: f64,
    roas: f64,
    cost_per_conversion: f64,
    impressions: u64,
    clicks: u64,
    click_rate: f64,
) -> Creative {
    Creative {
        id: CreativeId::new(),
        ad_name: ad_name.to_string(),
        product: product.to_string(),
        creator: creator.to_string(),
        content_type: content_type.to_string(),
        marketing_angle: marketing_angle.to_string(),
        hook: hook.to_string(),
        month: month.to_string(),
        status: status.to_string(),
        launch_date: NaiveDate::from_ymd_opt(launch.0, launch.1, launch.2),
        budget,
        conversions,
        revenue,
        roas,
        cost_per_conversion,
        impressions,
        clicks,
        click_rate,
    }
}

/// Five representative creatives spanning products, months and statuses.
///
/// Each call mints fresh identifiers.
pub fn sample_creatives() -> Vec<Creative> {
    vec![
        sample(
            "AG1_UGC_Emma_Energie_V1",
            "AG1 Powder",
            "Emma Laurent",
            "UGC",
            "Énergie quotidienne",
            "Ce qui a changé ma vie...",
            "Octobre 2025",
            "En ligne",
            (2025, 10, 6),
            2500.00,
            85,
            7650.00,
            3.06,
            29.41,
            125_000,
            3750,
            3.0,
        ),
        sample(
            "AG1_Podcast_Marc_Routine_V2",
            "Bundle Complet",
            "Marc Dupont",
            "Podcast",
            "Routine matinale",
            "Mon secret de productivité",
            "Novembre 2025",
            "En ligne",
            (2025, 11, 3),
            4200.00,
            142,
            14200.00,
            3.38,
            29.58,
            280_000,
            8400,
            3.0,
        ),
        sample(
            "AG1_Static_Travel_V1",
            "AG1 Travel Packs",
            "Studio Interne",
            "Image statique",
            "Voyage et santé",
            "Gardez vos habitudes en voyage",
            "Septembre 2025",
            "Arrêtée",
            (2025, 9, 15),
            1200.00,
            28,
            1960.00,
            1.63,
            42.86,
            85_000,
            1700,
            2.0,
        ),
        sample(
            "AG1_Video_Sophie_Wellness_V1",
            "AG1 Powder",
            "Sophie Martin",
            "Motion/Vidéo",
            "Bien-être global",
            "3 mois plus tard...",
            "Octobre 2025",
            "En ligne",
            (2025, 10, 20),
            3800.00,
            156,
            14040.00,
            3.69,
            24.36,
            320_000,
            11200,
            3.5,
        ),
        sample(
            "AG1_UGC_Thomas_Sport_V3",
            "Bundle Complet",
            "Thomas Bernard",
            "UGC",
            "Performance sportive",
            "Avant chaque entraînement...",
            "Novembre 2025",
            "En ligne",
            (2025, 11, 10),
            5200.00,
            198,
            21780.00,
            4.19,
            26.26,
            420_000,
            14700,
            3.5,
        ),
    ]
}
