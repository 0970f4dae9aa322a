//! Dashboard assembly: every aggregation over one fetched snapshot.

use serde::Serialize;

use crate::aggregate::{
    GroupSummary, group_by_category, group_by_debit_source, group_by_investment_type,
    group_incomes_by_type,
};
use crate::period::MonthWindow;
use crate::records::{
    Debited, Expense, ExpenseCategory, IncomeType, Investment, InvestmentType, UserIncome,
};
use crate::resolve::Resolver;
use crate::totals::{Totals, compute_totals};

/// Collections fetched for one month window. Treated as an immutable snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInput {
    pub window: MonthWindow,
    pub categories: Vec<ExpenseCategory>,
    pub debit_sources: Vec<Debited>,
    pub expenses: Vec<Expense>,
    pub income_types: Vec<IncomeType>,
    pub incomes: Vec<UserIncome>,
    pub investment_types: Vec<InvestmentType>,
    pub investments: Vec<Investment>,
}

impl DashboardInput {
    /// Empty snapshot for `window`.
    pub fn new(window: MonthWindow) -> Self {
        Self {
            window,
            categories: Vec::new(),
            debit_sources: Vec::new(),
            expenses: Vec::new(),
            income_types: Vec::new(),
            incomes: Vec::new(),
            investment_types: Vec::new(),
            investments: Vec::new(),
        }
    }
}

/// Everything the dashboard screen shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub window: MonthWindow,
    pub by_category: Vec<GroupSummary<Expense>>,
    pub by_debit_source: Vec<GroupSummary<Expense>>,
    pub by_income_type: Vec<GroupSummary<UserIncome>>,
    pub by_investment_type: Vec<GroupSummary<Investment>>,
    pub totals: Totals,
    /// Expenses whose category is not in the loaded set
    pub orphaned_expenses: usize,
}

impl Dashboard {
    pub fn build(input: &DashboardInput) -> Self {
        let categories = Resolver::new(&input.categories);
        let orphaned_expenses = input
            .expenses
            .iter()
            .filter(|e| !categories.contains(e.id_category))
            .count();

        Self {
            window: input.window,
            by_category: group_by_category(&input.expenses, &input.categories),
            by_debit_source: group_by_debit_source(&input.expenses, &input.debit_sources),
            by_income_type: group_incomes_by_type(&input.incomes, &input.income_types),
            by_investment_type: group_by_investment_type(
                &input.investments,
                &input.investment_types,
            ),
            totals: compute_totals(&input.expenses, &input.incomes, &input.investments),
            orphaned_expenses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
            && self.by_income_type.is_empty()
            && self.by_investment_type.is_empty()
            && self.totals == Totals::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> MonthWindow {
        MonthWindow::new(2026, 3).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let d = Dashboard::build(&DashboardInput::new(window()));
        assert!(d.is_empty());
        assert!(d.by_debit_source.is_empty());
        assert_eq!(d.orphaned_expenses, 0);
    }

    #[test]
    fn test_orphans_counted_but_not_grouped() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let mut input = DashboardInput::new(window());
        input.categories = vec![ExpenseCategory::new(1, "Food")];
        input.expenses = vec![
            Expense::new(1, "a", 100.0, date, 1),
            Expense::new(2, "b", 50.0, date, 999),
        ];

        let d = Dashboard::build(&input);
        assert_eq!(d.by_category.len(), 1);
        assert_eq!(d.by_category[0].total, 100.0);
        assert_eq!(d.totals.total_expense, 150.0);
        assert_eq!(d.orphaned_expenses, 1);
        assert!(!d.is_empty());
    }

    #[test]
    fn test_investment_goals_shown_without_contributions() {
        let mut input = DashboardInput::new(window());
        input.investment_types = vec![InvestmentType::new(1, "Reserva", 1000.0)];
        let d = Dashboard::build(&input);
        assert_eq!(d.by_investment_type.len(), 1);
        assert_eq!(d.by_investment_type[0].total, 0.0);
        assert!(!d.is_empty(), "an unmet goal is still something to show");
    }

    #[test]
    fn test_serializes_camel_case() {
        let d = Dashboard::build(&DashboardInput::new(window()));
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("byDebitSource").is_some());
        assert_eq!(json["totals"]["totalExpense"], 0.0);
        assert_eq!(json["window"]["month"], 3);
    }
}
