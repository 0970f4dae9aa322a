//! CRUD subcommands for every resource the backend exposes.

use anyhow::{Context, Result, bail};
use carteira_api::{
    ApiClient, DebitedRequest, ExpenseCategoryRequest, ExpenseRequest, IncomeTypeRequest,
    InvestmentRequest, InvestmentTypeRequest, UserIncomeRequest,
};
use carteira_core::{
    EntityId, MonthWindow, Resolver, format_brl, group_investments_per_type,
};
use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::auth::authed_client;
use crate::config::Config;
use crate::render::{goal_section, record_line};

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List expense categories
    List,
    /// Create a category
    Add { name: String },
    /// Rename a category
    Update { id: EntityId, name: String },
    /// Delete a category
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum DebitedCommand {
    /// List debit sources (accounts and cards)
    List,
    /// Create a debit source
    Add {
        name: String,
        /// Budget for the source
        #[arg(long, default_value_t = 0.0)]
        value: f64,
    },
    /// Replace a debit source
    Update {
        id: EntityId,
        name: String,
        #[arg(long, default_value_t = 0.0)]
        value: f64,
    },
    /// Delete a debit source
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum IncomeTypeCommand {
    /// List income types
    List,
    /// Create an income type
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Replace an income type
    Update {
        id: EntityId,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete an income type
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum IncomeCommand {
    /// List incomes of a month (default: current)
    List {
        #[arg(long)]
        month: Option<MonthWindow>,
    },
    /// Record an income
    Add {
        value: f64,
        /// Income type id
        #[arg(long = "type")]
        income_type: EntityId,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Replace an income
    Update {
        id: EntityId,
        value: f64,
        #[arg(long = "type")]
        income_type: EntityId,
        /// YYYY-MM-DD; required so the record keeps its month
        #[arg(long)]
        date: NaiveDate,
    },
    /// Delete an income
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    /// List expenses of a month (default: current)
    List {
        #[arg(long)]
        month: Option<MonthWindow>,
    },
    /// Record an expense
    Add {
        description: String,
        value: f64,
        /// Category id
        #[arg(long)]
        category: EntityId,
        /// Debit source id
        #[arg(long)]
        debited: Option<EntityId>,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Replace an expense
    Update {
        id: EntityId,
        description: String,
        value: f64,
        #[arg(long)]
        category: EntityId,
        #[arg(long)]
        debited: Option<EntityId>,
        /// YYYY-MM-DD; required so the record keeps its month
        #[arg(long)]
        date: NaiveDate,
    },
    /// Delete an expense
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum InvestmentTypeCommand {
    /// List investment types and their goals
    List,
    /// Create an investment type
    Add {
        description: String,
        #[arg(long, default_value_t = 0.0)]
        goal: f64,
    },
    /// Replace an investment type
    Update {
        id: EntityId,
        description: String,
        #[arg(long, default_value_t = 0.0)]
        goal: f64,
    },
    /// Delete an investment type
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum InvestmentCommand {
    /// List investments of a month (default: current)
    List {
        #[arg(long)]
        month: Option<MonthWindow>,
    },
    /// Progress per investment type as grouped by the server
    PerType {
        #[arg(long)]
        month: Option<MonthWindow>,
    },
    /// Record an investment
    Add {
        description: String,
        value: f64,
        /// Investment type id
        #[arg(long = "type")]
        investment_type: EntityId,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Replace an investment
    Update {
        id: EntityId,
        description: String,
        value: f64,
        #[arg(long = "type")]
        investment_type: EntityId,
        /// YYYY-MM-DD; required so the record keeps its month
        #[arg(long)]
        date: NaiveDate,
    },
    /// Delete an investment
    Delete { id: EntityId },
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn window_or_current(month: Option<MonthWindow>) -> MonthWindow {
    month.unwrap_or_else(MonthWindow::current)
}

fn check_value(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        bail!("value must be a non-negative amount, got {}", value);
    }
    Ok(value)
}

fn done(action: &str, what: &str, status: u16) {
    println!("{} {} (HTTP {})", action, what, status);
}

pub async fn categories(cfg: &Config, cmd: CategoryCommand) -> Result<()> {
    let c = authed_client(cfg)?;
    match cmd {
        CategoryCommand::List => {
            for cat in c.list_categories().await.context("listing categories")? {
                println!("{:>6}  {}", cat.id, cat.name);
            }
        }
        CategoryCommand::Add { name } => {
            let status = c.create_category(&ExpenseCategoryRequest { name }).await?;
            done("Created", "category", status);
        }
        CategoryCommand::Update { id, name } => {
            let status = c.update_category(id, &ExpenseCategoryRequest { name }).await?;
            done("Updated", &format!("category {id}"), status);
        }
        CategoryCommand::Delete { id } => {
            let status = c.delete_category(id).await?;
            done("Deleted", &format!("category {id}"), status);
        }
    }
    Ok(())
}

pub async fn debited(cfg: &Config, cmd: DebitedCommand) -> Result<()> {
    let c = authed_client(cfg)?;
    match cmd {
        DebitedCommand::List => {
            for d in c.list_debited().await.context("listing debit sources")? {
                let value = d.value.map(format_brl).unwrap_or_default();
                println!("{:>6}  {:<24} {:>16}", d.id, d.name, value);
            }
        }
        DebitedCommand::Add { name, value } => {
            let data = DebitedRequest {
                name,
                value: check_value(value)?,
            };
            done("Created", "debit source", c.create_debited(&data).await?);
        }
        DebitedCommand::Update { id, name, value } => {
            let data = DebitedRequest {
                name,
                value: check_value(value)?,
            };
            let status = c.update_debited(id, &data).await?;
            done("Updated", &format!("debit source {id}"), status);
        }
        DebitedCommand::Delete { id } => {
            let status = c.delete_debited(id).await?;
            done("Deleted", &format!("debit source {id}"), status);
        }
    }
    Ok(())
}

pub async fn income_types(cfg: &Config, cmd: IncomeTypeCommand) -> Result<()> {
    let c = authed_client(cfg)?;
    match cmd {
        IncomeTypeCommand::List => {
            for t in c.list_income_types().await.context("listing income types")? {
                println!("{:>6}  {:<24} {}", t.id, t.name, t.description);
            }
        }
        IncomeTypeCommand::Add { name, description } => {
            let status = c
                .create_income_type(&IncomeTypeRequest { name, description })
                .await?;
            done("Created", "income type", status);
        }
        IncomeTypeCommand::Update {
            id,
            name,
            description,
        } => {
            let status = c
                .update_income_type(id, &IncomeTypeRequest { name, description })
                .await?;
            done("Updated", &format!("income type {id}"), status);
        }
        IncomeTypeCommand::Delete { id } => {
            let status = c.delete_income_type(id).await?;
            done("Deleted", &format!("income type {id}"), status);
        }
    }
    Ok(())
}

pub async fn incomes(cfg: &Config, cmd: IncomeCommand) -> Result<()> {
    let c = authed_client(cfg)?;
    match cmd {
        IncomeCommand::List { month } => list_incomes(&c, window_or_current(month)).await?,
        IncomeCommand::Add {
            value,
            income_type,
            date,
        } => {
            let data = UserIncomeRequest {
                value: check_value(value)?,
                id_income: income_type,
                date: date.unwrap_or_else(today),
            };
            done("Created", "income", c.create_income(&data).await?);
        }
        IncomeCommand::Update {
            id,
            value,
            income_type,
            date,
        } => {
            let data = UserIncomeRequest {
                value: check_value(value)?,
                id_income: income_type,
                date,
            };
            let status = c.update_income(id, &data).await?;
            done("Updated", &format!("income {id}"), status);
        }
        IncomeCommand::Delete { id } => {
            let status = c.delete_income(id).await?;
            done("Deleted", &format!("income {id}"), status);
        }
    }
    Ok(())
}

async fn list_incomes(c: &ApiClient, window: MonthWindow) -> Result<()> {
    let (types, incomes) = tokio::try_join!(c.list_income_types(), c.list_incomes(Some(window)))
        .context("listing incomes")?;
    let types = Resolver::new(&types);

    println!("# Receitas: {}\n", window.label_pt());
    let mut total = 0.0;
    for i in &incomes {
        println!(
            "{}",
            record_line(i.id, Some(i.date), types.name_of(i.id_income), i.value)
        );
        total += i.value;
    }
    println!("\nTotal: {}", format_brl(total));
    Ok(())
}

pub async fn expenses(cfg: &Config, cmd: ExpenseCommand) -> Result<()> {
    let c = authed_client(cfg)?;
    match cmd {
        ExpenseCommand::List { month } => list_expenses(&c, window_or_current(month)).await?,
        ExpenseCommand::Add {
            description,
            value,
            category,
            debited,
            date,
        } => {
            let data = ExpenseRequest {
                description,
                value: check_value(value)?,
                date: date.unwrap_or_else(today),
                id_category: category,
                id_sub_category: None,
                id_debited: debited,
            };
            done("Created", "expense", c.create_expense(&data).await?);
        }
        ExpenseCommand::Update {
            id,
            description,
            value,
            category,
            debited,
            date,
        } => {
            let data = ExpenseRequest {
                description,
                value: check_value(value)?,
                date,
                id_category: category,
                id_sub_category: None,
                id_debited: debited,
            };
            let status = c.update_expense(id, &data).await?;
            done("Updated", &format!("expense {id}"), status);
        }
        ExpenseCommand::Delete { id } => {
            let status = c.delete_expense(id).await?;
            done("Deleted", &format!("expense {id}"), status);
        }
    }
    Ok(())
}

async fn list_expenses(c: &ApiClient, window: MonthWindow) -> Result<()> {
    let (categories, sources, expenses) = tokio::try_join!(
        c.list_categories(),
        c.list_debited(),
        c.list_expenses(Some(window))
    )
    .context("listing expenses")?;
    let categories = Resolver::new(&categories);
    let sources = Resolver::new(&sources);

    println!("# Despesas: {}\n", window.label_pt());
    let mut total = 0.0;
    for e in &expenses {
        let label = format!(
            "{} · {} · {}",
            e.description,
            categories.name_of(e.id_category),
            sources.name_of_opt(e.id_debited)
        );
        println!("{}", record_line(e.id, Some(e.date), &label, e.value));
        total += e.value;
    }
    println!("\nTotal: {}", format_brl(total));
    Ok(())
}

pub async fn investment_types(cfg: &Config, cmd: InvestmentTypeCommand) -> Result<()> {
    let c = authed_client(cfg)?;
    match cmd {
        InvestmentTypeCommand::List => {
            for t in c
                .list_investment_types()
                .await
                .context("listing investment types")?
            {
                println!("{}", record_line(t.id, None, &t.description, t.value));
            }
        }
        InvestmentTypeCommand::Add { description, goal } => {
            let data = InvestmentTypeRequest {
                description,
                value: check_value(goal)?,
            };
            done("Created", "investment type", c.create_investment_type(&data).await?);
        }
        InvestmentTypeCommand::Update {
            id,
            description,
            goal,
        } => {
            let data = InvestmentTypeRequest {
                description,
                value: check_value(goal)?,
            };
            let status = c.update_investment_type(id, &data).await?;
            done("Updated", &format!("investment type {id}"), status);
        }
        InvestmentTypeCommand::Delete { id } => {
            let status = c.delete_investment_type(id).await?;
            done("Deleted", &format!("investment type {id}"), status);
        }
    }
    Ok(())
}

pub async fn investments(cfg: &Config, cmd: InvestmentCommand) -> Result<()> {
    let c = authed_client(cfg)?;
    match cmd {
        InvestmentCommand::List { month } => {
            list_investments(&c, window_or_current(month)).await?
        }
        InvestmentCommand::PerType { month } => {
            let window = window_or_current(month);
            let per_type = c
                .list_investments_per_type(Some(window))
                .await
                .context("listing investments per type")?;
            let mut out = String::new();
            goal_section(
                &mut out,
                &format!("Investimentos por tipo: {}", window.label_pt()),
                &group_investments_per_type(&per_type),
                cfg.display.bar_width,
            );
            print!("{}", out);
        }
        InvestmentCommand::Add {
            description,
            value,
            investment_type,
            date,
        } => {
            let data = InvestmentRequest {
                description,
                value: check_value(value)?,
                date: date.unwrap_or_else(today),
                id_investment_type: investment_type,
            };
            done("Created", "investment", c.create_investment(&data).await?);
        }
        InvestmentCommand::Update {
            id,
            description,
            value,
            investment_type,
            date,
        } => {
            let data = InvestmentRequest {
                description,
                value: check_value(value)?,
                date,
                id_investment_type: investment_type,
            };
            let status = c.update_investment(id, &data).await?;
            done("Updated", &format!("investment {id}"), status);
        }
        InvestmentCommand::Delete { id } => {
            let status = c.delete_investment(id).await?;
            done("Deleted", &format!("investment {id}"), status);
        }
    }
    Ok(())
}

async fn list_investments(c: &ApiClient, window: MonthWindow) -> Result<()> {
    let (types, investments) =
        tokio::try_join!(c.list_investment_types(), c.list_investments(Some(window)))
            .context("listing investments")?;
    let types = Resolver::new(&types);

    println!("# Investimentos: {}\n", window.label_pt());
    let mut total = 0.0;
    for i in &investments {
        let label = format!(
            "{} · {}",
            i.description,
            types.name_of(i.id_investment_type)
        );
        println!("{}", record_line(i.id, Some(i.date), &label, i.value));
        total += i.value;
    }
    println!("\nTotal: {}", format_brl(total));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        assert_eq!(check_value(12.5).unwrap(), 12.5);
        assert_eq!(check_value(0.0).unwrap(), 0.0);
        assert!(check_value(-1.0).is_err());
        assert!(check_value(f64::NAN).is_err());
        assert!(check_value(f64::INFINITY).is_err());
    }

    #[test]
    fn test_window_defaults_to_current() {
        let march = MonthWindow::new(2026, 3).unwrap();
        assert_eq!(window_or_current(Some(march)), march);
        let before = MonthWindow::current();
        let got = window_or_current(None);
        // The clock may cross into the next month between the two reads.
        assert!(got == before || got == before.next());
    }
}
