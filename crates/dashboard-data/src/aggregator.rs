//! KPI and chart aggregates over a [`FilteredView`].
//!
//! Every value here is a pure function of the view. An empty view yields
//! zeros and empty series, never an error.

use std::collections::HashMap;

use dashboard_core::filters::SortOrder;
use dashboard_core::labels::month_rank;
use dashboard_core::models::Creative;
use serde::{Deserialize, Serialize};

use crate::view::{sort_creatives, FilteredView};

/// Length of the ranked lists on the overview screen.
pub const TOP_N: usize = 5;

// ── Result types ──────────────────────────────────────────────────────────────

/// Scalar KPIs shown on the overview cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_budget: f64,
    pub total_conversions: u64,
    pub total_revenue: f64,
    pub average_roas: f64,
    pub average_cost_per_conversion: f64,
    pub creative_count: usize,
    pub active_count: usize,
}

/// Mean ROAS of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRoas {
    pub month: String,
    pub roas: f64,
}

/// Budget spent on one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBudget {
    pub product: String,
    pub budget: f64,
}

/// Conversions brought by one creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorConversions {
    pub creator: String,
    pub conversions: u64,
}

// ── Aggregates ────────────────────────────────────────────────────────────────

impl FilteredView {
    pub fn total_budget(&self) -> f64 {
        self.iter().map(|c| c.budget).sum()
    }

    /// Saturates at `u64::MAX`; any `u64` is a valid conversions cell.
    pub fn total_conversions(&self) -> u64 {
        self.iter()
            .fold(0u64, |total, c| total.saturating_add(c.conversions))
    }

    pub fn total_revenue(&self) -> f64 {
        self.iter().map(|c| c.revenue).sum()
    }

    pub fn creative_count(&self) -> usize {
        self.len()
    }

    /// Creatives whose status is "En ligne".
    pub fn active_count(&self) -> usize {
        self.iter().filter(|c| c.is_active()).count()
    }

    /// Mean ROAS, `0` for an empty view.
    pub fn average_roas(&self) -> f64 {
        mean(self.iter().map(|c| c.roas))
    }

    /// Mean cost per conversion over creatives with a positive cost only.
    ///
    /// Rows exported without a cost carry `0` and would otherwise drag the
    /// mean down. Returns `0` when no creative has a positive cost.
    pub fn average_cost_per_conversion(&self) -> f64 {
        mean(
            self.iter()
                .map(|c| c.cost_per_conversion)
                .filter(|cost| *cost > 0.0),
        )
    }

    pub fn kpis(&self) -> KpiSummary {
        KpiSummary {
            total_budget: self.total_budget(),
            total_conversions: self.total_conversions(),
            total_revenue: self.total_revenue(),
            average_roas: self.average_roas(),
            average_cost_per_conversion: self.average_cost_per_conversion(),
            creative_count: self.creative_count(),
            active_count: self.active_count(),
        }
    }

    /// Mean ROAS per month, in calendar order.
    ///
    /// Months outside the known reporting period follow the known ones, in
    /// order of first appearance.
    pub fn roas_by_month(&self) -> Vec<MonthlyRoas> {
        let mut groups = group_in_order(
            self.creatives(),
            |c| c.month.as_str(),
            |acc: &mut (f64, usize), c| {
                acc.0 += c.roas;
                acc.1 += 1;
            },
        );
        groups.sort_by_key(|(month, _)| month_rank(month).unwrap_or(usize::MAX));

        groups
            .into_iter()
            .map(|(month, (sum, count))| MonthlyRoas {
                month,
                roas: sum / count as f64,
            })
            .collect()
    }

    /// Summed budget per product, largest first.
    pub fn budget_by_product(&self) -> Vec<ProductBudget> {
        let mut groups = group_in_order(
            self.creatives(),
            |c| c.product.as_str(),
            |acc: &mut f64, c| *acc += c.budget,
        );
        groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        groups
            .into_iter()
            .map(|(product, budget)| ProductBudget { product, budget })
            .collect()
    }

    /// The five creatives with the highest ROAS; ties keep view order.
    pub fn top5_by_roas(&self) -> Vec<Creative> {
        let mut ranked = self.creatives().to_vec();
        sort_creatives(&mut ranked, SortOrder::RoasDesc);
        ranked.truncate(TOP_N);
        ranked
    }

    /// The five creators with the most conversions.
    pub fn top5_creators_by_conversions(&self) -> Vec<CreatorConversions> {
        let mut groups = group_in_order(
            self.creatives(),
            |c| c.creator.as_str(),
            |acc: &mut u64, c| *acc = acc.saturating_add(c.conversions),
        );
        groups.sort_by(|a, b| b.1.cmp(&a.1));

        groups
            .into_iter()
            .take(TOP_N)
            .map(|(creator, conversions)| CreatorConversions {
                creator,
                conversions,
            })
            .collect()
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Fold creatives into groups keyed by `key`, keeping first-appearance order.
fn group_in_order<T: Default>(
    creatives: &[Creative],
    key: impl Fn(&Creative) -> &str,
    mut fold: impl FnMut(&mut T, &Creative),
) -> Vec<(String, T)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, T)> = Vec::new();

    for creative in creatives {
        let name = key(creative);
        let slot = *index.entry(name).or_insert_with(|| {
            groups.push((name.to_string(), T::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, creative);
    }

    groups
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn creative(name: &str, month: &str, product: &str, creator: &str) -> Creative {
        Creative {
            ad_name: name.to_string(),
            month: month.to_string(),
            product: product.to_string(),
            creator: creator.to_string(),
            status: "En ligne".to_string(),
            ..Default::default()
        }
    }

    fn view(creatives: Vec<Creative>) -> FilteredView {
        FilteredView::from_creatives(creatives)
    }

    // ── scalar KPIs ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_view_defaults() {
        let empty = FilteredView::default();
        assert_eq!(empty.kpis(), KpiSummary::default());
        assert!(empty.roas_by_month().is_empty());
        assert!(empty.budget_by_product().is_empty());
        assert!(empty.top5_by_roas().is_empty());
        assert!(empty.top5_creators_by_conversions().is_empty());
    }

    #[test]
    fn test_totals_and_average_roas() {
        let mut a = creative("a", "Octobre 2025", "Shaker", "Emma");
        a.budget = 1000.0;
        a.revenue = 3000.0;
        a.conversions = 10;
        a.roas = 3.0;
        let mut b = creative("b", "Octobre 2025", "Shaker", "Marc");
        b.budget = 500.0;
        b.revenue = 500.0;
        b.conversions = 5;
        b.roas = 1.0;
        b.status = "Arrêtée".to_string();

        let kpis = view(vec![a, b]).kpis();
        assert_eq!(kpis.total_budget, 1500.0);
        assert_eq!(kpis.total_revenue, 3500.0);
        assert_eq!(kpis.total_conversions, 15);
        assert!((kpis.average_roas - 2.0).abs() < 1e-9);
        assert_eq!(kpis.creative_count, 2);
        assert_eq!(kpis.active_count, 1);
    }

    #[test]
    fn test_conversion_sums_saturate() {
        let raw = "Nom de l'annonce,Créateur,Conversions (achats)\n\
                   A,Emma,18446744073709551615\n\
                   B,Emma,1\n";
        let outcome = crate::parser::parse_creatives(raw).unwrap();
        assert!(outcome.warnings.is_empty());

        let v = FilteredView::compute(&outcome.creatives, &Default::default());
        assert_eq!(v.total_conversions(), u64::MAX);
        assert_eq!(v.kpis().total_conversions, u64::MAX);
        assert_eq!(
            v.top5_creators_by_conversions(),
            vec![CreatorConversions {
                creator: "Emma".to_string(),
                conversions: u64::MAX,
            }]
        );
    }

    #[test]
    fn test_average_cost_excludes_zero_costs() {
        let mut a = creative("a", "", "", "");
        a.cost_per_conversion = 30.0;
        let mut b = creative("b", "", "", "");
        b.cost_per_conversion = 20.0;
        let zero = creative("z", "", "", "");

        let v = view(vec![a, zero, b]);
        assert!((v.average_cost_per_conversion() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_cost_all_zero_is_zero() {
        let v = view(vec![creative("a", "", "", ""), creative("b", "", "", "")]);
        let avg = v.average_cost_per_conversion();
        assert_eq!(avg, 0.0);
        assert!(!avg.is_nan());
    }

    // ── roas_by_month ─────────────────────────────────────────────────────────

    #[test]
    fn test_roas_by_month_canonical_order_and_mean() {
        let mut items = Vec::new();
        for (month, roas) in [
            ("Novembre 2025", 4.0),
            ("Décembre 2025", 9.0),
            ("Juillet 2025", 1.0),
            ("Novembre 2025", 2.0),
            ("Bonus", 5.0),
            ("Août 2025", 1.5),
        ] {
            let mut c = creative("x", month, "Shaker", "Emma");
            c.roas = roas;
            items.push(c);
        }

        let series = view(items).roas_by_month();
        let months: Vec<&str> = series.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(
            months,
            vec!["Juillet 2025", "Août 2025", "Novembre 2025", "Décembre 2025", "Bonus"]
        );
        assert!((series[2].roas - 3.0).abs() < 1e-9);
    }

    // ── budget_by_product ─────────────────────────────────────────────────────

    #[test]
    fn test_budget_by_product_descending() {
        let mut items = Vec::new();
        for (product, budget) in [
            ("Shaker", 100.0),
            ("AG1 Powder", 2000.0),
            ("Shaker", 150.0),
            ("Omega-3", 400.0),
        ] {
            let mut c = creative("x", "Octobre 2025", product, "Emma");
            c.budget = budget;
            items.push(c);
        }

        let series = view(items).budget_by_product();
        assert_eq!(
            series,
            vec![
                ProductBudget {
                    product: "AG1 Powder".to_string(),
                    budget: 2000.0
                },
                ProductBudget {
                    product: "Omega-3".to_string(),
                    budget: 400.0
                },
                ProductBudget {
                    product: "Shaker".to_string(),
                    budget: 250.0
                },
            ]
        );
    }

    // ── rankings ──────────────────────────────────────────────────────────────

    #[test]
    fn test_top5_by_roas_with_fewer_records() {
        let mut items = Vec::new();
        for (name, roas) in [("a", 1.0), ("b", 3.0), ("c", 2.0)] {
            let mut c = creative(name, "Octobre 2025", "Shaker", "Emma");
            c.roas = roas;
            items.push(c);
        }

        let top = view(items).top5_by_roas();
        let names: Vec<&str> = top.iter().map(|c| c.ad_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_top5_by_roas_truncates_and_breaks_ties_by_order() {
        let items: Vec<Creative> = (0..7)
            .map(|i| {
                let mut c = creative(&format!("c{}", i), "Octobre 2025", "Shaker", "Emma");
                c.roas = if i == 6 { 10.0 } else { 2.0 };
                c
            })
            .collect();

        let top = view(items).top5_by_roas();
        let names: Vec<&str> = top.iter().map(|c| c.ad_name.as_str()).collect();
        assert_eq!(names, vec!["c6", "c0", "c1", "c2", "c3"]);
    }

    #[test]
    fn test_top5_creators_by_conversions() {
        let mut items = Vec::new();
        for (creator, conversions) in [
            ("Emma", 10),
            ("Marc", 50),
            ("Sophie", 5),
            ("Emma", 45),
            ("Thomas", 20),
            ("Julie", 1),
            ("Studio", 30),
        ] {
            let mut c = creative("x", "Octobre 2025", "Shaker", creator);
            c.conversions = conversions;
            items.push(c);
        }

        let top = view(items).top5_creators_by_conversions();
        let ranked: Vec<(&str, u64)> = top
            .iter()
            .map(|c| (c.creator.as_str(), c.conversions))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Emma", 55),
                ("Marc", 50),
                ("Studio", 30),
                ("Thomas", 20),
                ("Sophie", 5)
            ]
        );
    }
}
