//! Grand totals over the raw collections, independent of any grouping.

use serde::Serialize;

use crate::aggregate::percent_of;
use crate::records::Monetary;

/// Flat totals shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_expense: f64,
    pub total_income: f64,
    pub total_invested: f64,
    /// Income minus expenses minus investments
    pub balance: f64,
}

impl Totals {
    /// Share of income not spent on expenses, as a percentage.
    pub fn savings_rate(&self) -> f64 {
        percent_of(self.total_income - self.total_expense, self.total_income)
    }

    pub fn is_negative(&self) -> bool {
        self.balance < 0.0
    }
}

fn sum<T: Monetary>(records: &[T]) -> f64 {
    records.iter().map(Monetary::value).sum()
}

/// Sum every collection. Investments count as an outflow against the balance.
/// Records with unknown foreign keys are included.
pub fn compute_totals<E, I, V>(expenses: &[E], incomes: &[I], investments: &[V]) -> Totals
where
    E: Monetary,
    I: Monetary,
    V: Monetary,
{
    let total_expense = sum(expenses);
    let total_income = sum(incomes);
    let total_invested = sum(investments);

    Totals {
        total_expense,
        total_income,
        total_invested,
        balance: total_income - total_expense - total_invested,
    }
}
