//! Command handlers layered over the session. Every command routes through
//! the same ledger and budget operations the library exposes; the shell
//! adds no second data path.

use uuid::Uuid;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::domain::category::FIXED_CATEGORIES;
use crate::domain::{Category, CategoryFilter, ExpenseRecord, FilterState};
use crate::errors::TrackerError;
use crate::export;

pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(CommandEntry::new(
        "add",
        "Log a new expense",
        "add <amount> [category#|custom:<label>] [note...]",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "budget",
        "Set the monthly spending limit",
        "budget <limit>",
        cmd_budget,
    ));
    registry.register(CommandEntry::new(
        "list",
        "Show all expenses, newest first",
        "list",
        cmd_list,
    ));
    registry.register(CommandEntry::new(
        "summary",
        "Show totals, remaining budget, and per-category spending",
        "summary",
        cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "daily",
        "Show spending for the last 7 days",
        "daily",
        cmd_daily,
    ));
    registry.register(CommandEntry::new(
        "filter",
        "List expenses matching a query and optional category",
        "filter <query> [category#]",
        cmd_filter,
    ));
    registry.register(CommandEntry::new(
        "remove",
        "Delete an expense by id prefix",
        "remove <id-prefix>",
        cmd_remove,
    ));
    registry.register(CommandEntry::new(
        "insight",
        "Request AI-generated spending advice",
        "insight",
        cmd_insight,
    ));
    registry.register(CommandEntry::new(
        "export",
        "Export the ledger to a CSV file",
        "export <path>",
        cmd_export,
    ));
    registry.register(CommandEntry::new(
        "clear",
        "Delete every logged expense",
        "clear",
        cmd_clear,
    ));
    registry.register(CommandEntry::new(
        "help",
        "List commands or describe one",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit));
    registry
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a number")))
}

/// Interprets an optional category argument: a 1-based index into the
/// fixed set, or `custom:<label>` for a free-form category. Returns `None`
/// when the token is not a category at all (so it can join the note).
fn parse_category_arg(arg: &str) -> Result<Option<Category>, CommandError> {
    if let Ok(index) = arg.parse::<usize>() {
        return Category::from_index(index)
            .map(Some)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "category index must be 1-{}",
                    FIXED_CATEGORIES.len()
                ))
            });
    }
    if let Some(label) = arg.strip_prefix("custom:") {
        let label = label.trim();
        if label.is_empty() {
            return Err(CommandError::InvalidArguments(
                "custom category label must not be empty".into(),
            ));
        }
        return Ok(Some(Category::Custom(label.to_string())));
    }
    Ok(None)
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw_amount) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: add <amount> [category#|custom:<label>] [note...]".into(),
        ));
    };
    let amount = parse_amount(raw_amount)?;

    let (category, note_args) = match args.get(1) {
        Some(arg) => match parse_category_arg(arg)? {
            Some(category) => (category, &args[2..]),
            None => (Category::FoodAndDrinks, &args[1..]),
        },
        None => (Category::FoodAndDrinks, &args[1..]),
    };
    let note = note_args.join(" ");

    let record = context
        .session
        .add_expense(amount, category, &note)
        .map_err(CommandError::from)?;
    output::success(format!(
        "Logged {}{:.2} under {}.",
        context.config.currency_symbol, record.amount, record.category
    ));
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw_limit) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: budget <limit>".into()));
    };
    let limit = parse_amount(raw_limit)?;
    context.session.set_budget(limit)?;
    output::success(format!(
        "Monthly budget set to {}{:.2}.",
        context.config.currency_symbol, limit
    ));
    Ok(())
}

fn print_records(context: &ShellContext, records: &[&ExpenseRecord]) {
    for record in records {
        let id = record.id.to_string();
        output::info(format!(
            "{}  {}  {:<18} {}{:>10.2}  {}",
            &id[..8],
            record.date,
            record.category.label(),
            context.config.currency_symbol,
            record.amount,
            record.note
        ));
    }
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records: Vec<&ExpenseRecord> = context.session.ledger().records().iter().collect();
    if records.is_empty() {
        output::info("No expenses logged yet.");
        return Ok(());
    }
    output::section(format!("Expenses ({})", records.len()));
    print_records(context, &records);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.config.currency_symbol.clone();
    let summary = context.session.summary();
    output::section("Budget summary");
    output::info(format!(
        "Limit: {symbol}{:.2}",
        context.session.budget().monthly_limit
    ));
    output::info(format!("Spent: {symbol}{:.2}", summary.total_spent));
    output::info(format!("Remaining: {symbol}{:.2}", summary.remaining));
    output::info(format!(
        "Used: {:.1}% ({})",
        summary.percent_used, summary.status
    ));

    output::section("By category");
    for entry in context.session.by_category() {
        output::info(format!(
            "{:<18} {symbol}{:.2}",
            entry.category.label(),
            entry.total
        ));
    }
    Ok(())
}

fn cmd_daily(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Last 7 days");
    let symbol = context.config.currency_symbol.clone();
    for point in context
        .session
        .daily_series(crate::core::DEFAULT_WINDOW_DAYS)
    {
        output::info(format!("{}  {symbol}{:.2}", point.date, point.total));
    }
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(query) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: filter <query> [category#]".into(),
        ));
    };
    let category = match args.get(1) {
        Some(arg) => match parse_category_arg(arg)? {
            Some(category) => CategoryFilter::Only(category),
            None => {
                return Err(CommandError::InvalidArguments(format!(
                    "`{arg}` is not a category index or custom:<label>"
                )))
            }
        },
        None => CategoryFilter::All,
    };
    let filter = FilterState {
        query: query.to_string(),
        category,
    };
    let matches = context.session.filtered(&filter);
    if matches.is_empty() {
        output::info("No matching expenses.");
        return Ok(());
    }
    output::section(format!("Matches ({})", matches.len()));
    print_records(context, &matches);
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(prefix) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: remove <id-prefix>".into(),
        ));
    };
    let matches: Vec<Uuid> = context
        .session
        .ledger()
        .records()
        .iter()
        .filter(|record| record.id.to_string().starts_with(prefix))
        .map(|record| record.id)
        .collect();
    match matches.as_slice() {
        [] => {
            output::info(format!("No expense matches id `{prefix}`."));
            Ok(())
        }
        [id] => {
            context.session.remove_expense(*id)?;
            output::success("Expense removed.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "`{prefix}` matches {} expenses, give more characters",
            matches.len()
        ))),
    }
}

fn cmd_insight(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let reply = context.advice.request_insight(
        context.session.ledger().records(),
        context.session.budget(),
        &context.config.currency_symbol,
    );
    match reply {
        Ok(text) => {
            output::section("Smart insights");
            output::info(text);
            Ok(())
        }
        Err(TrackerError::AdviceBusy) => {
            output::warning("An advice request is already in flight; try again shortly.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(path) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: export <path>".into()));
    };
    let records = context.session.ledger().records();
    export::export_to_path(records, std::path::Path::new(path))?;
    output::success(format!("Exported {} records to {path}.", records.len()));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dropped = context.session.clear_expenses()?;
    output::success(format!("Cleared {dropped} expenses."));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => {
            output::section("Available commands");
            for entry in context.registry.list() {
                output::info(format!("{:<10} {}", entry.name, entry.description));
            }
            output::info("Use `help <command>` for details.");
        }
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.name));
                output::info(format!("description: {}", entry.description));
                output::info(format!("usage: {}", entry.usage));
            }
            None => context.suggest_command(name),
        },
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_arg_accepts_indexes_and_custom_labels() {
        assert_eq!(
            parse_category_arg("1").unwrap(),
            Some(Category::FoodAndDrinks)
        );
        assert_eq!(
            parse_category_arg("custom:Recharge").unwrap(),
            Some(Category::Custom("Recharge".into()))
        );
        assert_eq!(parse_category_arg("lunch").unwrap(), None);
        assert!(parse_category_arg("0").is_err());
        assert!(parse_category_arg("9").is_err());
        assert!(parse_category_arg("custom:").is_err());
    }

    #[test]
    fn amounts_must_be_numeric() {
        assert!(parse_amount("12.5").is_ok());
        assert!(parse_amount("abc").is_err());
    }
}
