//! carteira-core: record types and the aggregation engine behind the dashboard

pub mod aggregate;
pub mod dashboard;
pub mod money;
pub mod period;
pub mod records;
pub mod resolve;
pub mod totals;

pub use aggregate::{
    GroupSummary, group_by_category, group_by_debit_source, group_by_investment_type,
    group_incomes_by_type, group_investments_per_type, percent_of,
};
pub use dashboard::{Dashboard, DashboardInput};
pub use money::{format_brl, format_percent, progress_bar};
pub use period::{MonthWindow, PeriodError};
pub use records::{
    Debited, EntityId, Expense, ExpenseCategory, GroupingEntity, IncomeType, Investment,
    InvestmentEntry, InvestmentPerType, InvestmentType, Monetary, UserIncome, wire_date,
};
pub use resolve::{Resolver, resolve_name};
pub use totals::{Totals, compute_totals};
