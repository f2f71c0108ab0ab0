//! Line commands accepted in interactive mode.

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::filters::{Choice, ContentType, Dimension, FilterUpdate, Month, Product, SortOrder, Status};
use dashboard_runtime::coordinator::DashboardCommand;

pub const HELP: &str = "\
Commandes:
  search <texte>        recherche (nom, créateur, produit); vide pour effacer
  creator <texte>       filtre créateur; vide pour effacer
  product <label|Tous>  filtre produit
  month <label|Tous>    filtre mois
  status <label|Tous>   filtre statut
  type <label|Tous>     filtre type de contenu
  sort <clé>            roas-desc, roas-asc, budget-desc, budget-asc,
                        conversions-desc, conversions-asc, date-desc, date-asc
  reset                 réinitialiser les filtres
  refresh               recharger l'export
  quit                  quitter";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(DashboardCommand),
    Help,
}

/// Parse one stdin line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    let update = match verb.to_lowercase().as_str() {
        "help" | "?" => return Ok(Some(Input::Help)),
        "quit" | "exit" | "q" => return Ok(Some(Input::Command(DashboardCommand::Shutdown))),
        "refresh" => return Ok(Some(Input::Command(DashboardCommand::Refresh))),
        "reset" => FilterUpdate::Reset,
        "search" => FilterUpdate::SearchText(arg.to_string()),
        "creator" => FilterUpdate::Creator(arg.to_string()),
        "product" => FilterUpdate::Product(choice::<Product>(arg)?),
        "month" => FilterUpdate::Month(choice::<Month>(arg)?),
        "status" => FilterUpdate::Status(choice::<Status>(arg)?),
        "type" => FilterUpdate::ContentType(choice::<ContentType>(arg)?),
        "sort" => FilterUpdate::Sort(arg.parse::<SortOrder>()?),
        other => {
            return Err(DashboardError::Config(format!(
                "unknown command '{}'; type 'help' for the list",
                other
            )))
        }
    };

    Ok(Some(Input::Command(DashboardCommand::Update(update))))
}

fn choice<T: Dimension>(label: &str) -> Result<Choice<T>> {
    Choice::<T>::parse_label(label).ok_or_else(|| {
        let known: Vec<&str> = T::VALUES.iter().map(|v| v.label()).collect();
        DashboardError::Config(format!(
            "unknown value '{}'; expected Tous or one of: {}",
            label,
            known.join(", ")
        ))
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn update(line: &str) -> FilterUpdate {
        match parse_command(line).unwrap() {
            Some(Input::Command(DashboardCommand::Update(update))) => update,
            other => panic!("expected a filter update, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_is_ignored() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_text_filters_keep_inner_spaces() {
        assert_eq!(
            update("search  energie quotidienne "),
            FilterUpdate::SearchText("energie quotidienne".to_string())
        );
        assert_eq!(update("creator"), FilterUpdate::Creator(String::new()));
    }

    #[test]
    fn test_dimension_filters_use_labels() {
        assert_eq!(
            update("product AG1 Travel Packs"),
            FilterUpdate::Product(Choice::Only(Product::Ag1TravelPacks))
        );
        assert_eq!(update("month Tous"), FilterUpdate::Month(Choice::All));
        assert_eq!(
            update("status Arrêtée"),
            FilterUpdate::Status(Choice::Only(Status::Stopped))
        );
        assert_eq!(
            update("type Podcast"),
            FilterUpdate::ContentType(Choice::Only(ContentType::Podcast))
        );
    }

    #[test]
    fn test_sort_and_reset() {
        assert_eq!(update("sort budget-asc"), FilterUpdate::Sort(SortOrder::BudgetAsc));
        assert_eq!(update("RESET"), FilterUpdate::Reset);
    }

    #[test]
    fn test_control_commands() {
        assert_eq!(
            parse_command("refresh").unwrap(),
            Some(Input::Command(DashboardCommand::Refresh))
        );
        assert_eq!(
            parse_command("quit").unwrap(),
            Some(Input::Command(DashboardCommand::Shutdown))
        );
        assert_eq!(parse_command("help").unwrap(), Some(Input::Help));
    }

    #[test]
    fn test_errors_are_config_errors() {
        assert!(matches!(parse_command("explode"), Err(DashboardError::Config(_))));
        assert!(matches!(parse_command("product Creatine"), Err(DashboardError::Config(_))));
        assert!(matches!(parse_command("sort sideways"), Err(DashboardError::Config(_))));
    }
}
