//! carteira-api: REST client for the finance backend and the dashboard loader

pub mod client;
pub mod endpoints;
pub mod error;
pub mod messages;
pub mod session;
pub mod source;

pub use client::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, error_message};
pub use messages::{
    AuthResponse, DebitedRequest, ExpenseCategoryRequest, ExpenseRequest, IncomeTypeRequest,
    InvestmentRequest, InvestmentTypeRequest, LoginRequest, RegisterRequest, UserIncomeRequest,
};
pub use session::{Session, UserInfo};
pub use source::{DashboardLoader, RecordSource, load_dashboard_input};
