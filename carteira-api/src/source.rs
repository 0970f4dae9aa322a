//! Record fetching for the dashboard: the `RecordSource` seam, the
//! fan-out/fan-in load and last-filter-wins reloading.

use std::sync::atomic::{AtomicU64, Ordering};

use carteira_core::{
    Dashboard, DashboardInput, Debited, Expense, ExpenseCategory, IncomeType, Investment,
    InvestmentType, MonthWindow, UserIncome,
};
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Supplier of the collections the dashboard aggregates.
///
/// Dated collections are expected to be filtered to `window` already.
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    async fn categories(&self) -> Result<Vec<ExpenseCategory>, ApiError>;
    async fn debit_sources(&self) -> Result<Vec<Debited>, ApiError>;
    async fn expenses(&self, window: MonthWindow) -> Result<Vec<Expense>, ApiError>;
    async fn income_types(&self) -> Result<Vec<IncomeType>, ApiError>;
    async fn incomes(&self, window: MonthWindow) -> Result<Vec<UserIncome>, ApiError>;
    async fn investment_types(&self) -> Result<Vec<InvestmentType>, ApiError>;
    async fn investments(&self, window: MonthWindow) -> Result<Vec<Investment>, ApiError>;
}

impl RecordSource for ApiClient {
    async fn categories(&self) -> Result<Vec<ExpenseCategory>, ApiError> {
        self.list_categories().await
    }

    async fn debit_sources(&self) -> Result<Vec<Debited>, ApiError> {
        self.list_debited().await
    }

    async fn expenses(&self, window: MonthWindow) -> Result<Vec<Expense>, ApiError> {
        self.list_expenses(Some(window)).await
    }

    async fn income_types(&self) -> Result<Vec<IncomeType>, ApiError> {
        self.list_income_types().await
    }

    async fn incomes(&self, window: MonthWindow) -> Result<Vec<UserIncome>, ApiError> {
        self.list_incomes(Some(window)).await
    }

    async fn investment_types(&self) -> Result<Vec<InvestmentType>, ApiError> {
        self.list_investment_types().await
    }

    async fn investments(&self, window: MonthWindow) -> Result<Vec<Investment>, ApiError> {
        self.list_investments(Some(window)).await
    }
}

/// Fetch every collection concurrently and return once all of them resolved.
/// The first failure fails the whole load.
pub async fn load_dashboard_input<S: RecordSource>(
    source: &S,
    window: MonthWindow,
) -> Result<DashboardInput, ApiError> {
    let (categories, debit_sources, expenses, income_types, incomes, investment_types, investments) =
        tokio::try_join!(
            source.categories(),
            source.debit_sources(),
            source.expenses(window),
            source.income_types(),
            source.incomes(window),
            source.investment_types(),
            source.investments(window),
        )?;

    debug!(
        %window,
        expenses = expenses.len(),
        incomes = incomes.len(),
        investments = investments.len(),
        "snapshot loaded"
    );

    Ok(DashboardInput {
        window,
        categories,
        debit_sources,
        expenses,
        income_types,
        incomes,
        investment_types,
        investments,
    })
}

/// Reloads the dashboard whenever the month changes; the newest request wins.
///
/// Each `load` takes a generation ticket. A load that finishes after a newer
/// one started returns `Ok(None)`; its snapshot or error is dropped.
pub struct DashboardLoader<S> {
    source: S,
    generation: AtomicU64,
}

impl<S: RecordSource> DashboardLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub async fn load(&self, window: MonthWindow) -> Result<Option<Dashboard>, ApiError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, %window, "loading dashboard");

        let loaded = load_dashboard_input(&self.source, window).await;

        // A superseded load is dropped whether it succeeded or failed.
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != ticket {
            info!(ticket, latest, %window, "discarding superseded dashboard load");
            return Ok(None);
        }

        Ok(Some(Dashboard::build(&loaded?)))
    }
}
