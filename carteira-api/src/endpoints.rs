//! CRUD endpoints, one block per resource.
//!
//! Write calls return the HTTP status code; the API's write responses carry
//! nothing the client needs.

use carteira_core::{
    Debited, EntityId, Expense, ExpenseCategory, IncomeType, Investment, InvestmentPerType,
    InvestmentType, MonthWindow, UserIncome,
};
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::messages::{
    DebitedRequest, ExpenseCategoryRequest, ExpenseRequest, IncomeTypeRequest,
    InvestmentRequest, InvestmentTypeRequest, UserIncomeRequest, WithId,
};

fn date_param(window: Option<MonthWindow>) -> Option<String> {
    window.map(|w| w.query_param())
}

impl ApiClient {
    // --- Income types ---

    pub async fn list_income_types(&self) -> Result<Vec<IncomeType>, ApiError> {
        self.get_list("/Income", None).await
    }

    pub async fn create_income_type(&self, data: &IncomeTypeRequest) -> Result<u16, ApiError> {
        self.send(Method::POST, "/Income", Some(data)).await
    }

    pub async fn update_income_type(
        &self,
        id: EntityId,
        data: &IncomeTypeRequest,
    ) -> Result<u16, ApiError> {
        let body = WithId { id, fields: data };
        self.send(Method::PUT, "/Income", Some(&body)).await
    }

    pub async fn delete_income_type(&self, id: EntityId) -> Result<u16, ApiError> {
        self.delete(&format!("/Income/{id}")).await
    }

    // --- User incomes ---

    pub async fn list_incomes(&self, window: Option<MonthWindow>) -> Result<Vec<UserIncome>, ApiError> {
        self.get_list("/User/UserIncome", date_param(window)).await
    }

    pub async fn create_income(&self, data: &UserIncomeRequest) -> Result<u16, ApiError> {
        self.send(Method::POST, "/User/userincome", Some(data)).await
    }

    pub async fn update_income(&self, id: EntityId, data: &UserIncomeRequest) -> Result<u16, ApiError> {
        self.send(Method::PUT, &format!("/user/userIncome/{id}"), Some(data))
            .await
    }

    pub async fn delete_income(&self, id: EntityId) -> Result<u16, ApiError> {
        self.delete(&format!("/user/userIncome/{id}")).await
    }

    // --- Expense categories ---

    pub async fn list_categories(&self) -> Result<Vec<ExpenseCategory>, ApiError> {
        self.get_list("/Category", None).await
    }

    pub async fn create_category(&self, data: &ExpenseCategoryRequest) -> Result<u16, ApiError> {
        self.send(Method::POST, "/Category", Some(data)).await
    }

    pub async fn update_category(
        &self,
        id: EntityId,
        data: &ExpenseCategoryRequest,
    ) -> Result<u16, ApiError> {
        let body = WithId { id, fields: data };
        self.send(Method::PUT, "/Category", Some(&body)).await
    }

    pub async fn delete_category(&self, id: EntityId) -> Result<u16, ApiError> {
        self.delete(&format!("/Category/{id}")).await
    }

    // --- Expenses ---

    pub async fn list_expenses(&self, window: Option<MonthWindow>) -> Result<Vec<Expense>, ApiError> {
        self.get_list("/OutGoing", date_param(window)).await
    }

    pub async fn create_expense(&self, data: &ExpenseRequest) -> Result<u16, ApiError> {
        self.send(Method::POST, "/OutGoing", Some(data)).await
    }

    pub async fn update_expense(&self, id: EntityId, data: &ExpenseRequest) -> Result<u16, ApiError> {
        self.send(Method::PUT, &format!("/OutGoing/{id}"), Some(data))
            .await
    }

    pub async fn delete_expense(&self, id: EntityId) -> Result<u16, ApiError> {
        self.delete(&format!("/OutGoing/{id}")).await
    }

    // --- Debit sources ---

    pub async fn list_debited(&self) -> Result<Vec<Debited>, ApiError> {
        self.get_list("/Debited", None).await
    }

    pub async fn create_debited(&self, data: &DebitedRequest) -> Result<u16, ApiError> {
        self.send(Method::POST, "/Debited", Some(data)).await
    }

    pub async fn update_debited(&self, id: EntityId, data: &DebitedRequest) -> Result<u16, ApiError> {
        self.send(Method::PUT, &format!("/Debited/{id}"), Some(data))
            .await
    }

    pub async fn delete_debited(&self, id: EntityId) -> Result<u16, ApiError> {
        self.delete(&format!("/Debited/{id}")).await
    }

    // --- Investment types ---

    pub async fn list_investment_types(&self) -> Result<Vec<InvestmentType>, ApiError> {
        self.get_list("/InvestmentType", None).await
    }

    pub async fn create_investment_type(&self, data: &InvestmentTypeRequest) -> Result<u16, ApiError> {
        self.send(Method::POST, "/InvestmentType", Some(data)).await
    }

    pub async fn update_investment_type(
        &self,
        id: EntityId,
        data: &InvestmentTypeRequest,
    ) -> Result<u16, ApiError> {
        self.send(Method::PUT, &format!("/InvestmentType/{id}"), Some(data))
            .await
    }

    pub async fn delete_investment_type(&self, id: EntityId) -> Result<u16, ApiError> {
        self.delete(&format!("/InvestmentType/{id}")).await
    }

    // --- Investments ---

    pub async fn list_investments(&self, window: Option<MonthWindow>) -> Result<Vec<Investment>, ApiError> {
        self.get_list("/Investment", date_param(window)).await
    }

    /// Investments already grouped per type by the server.
    pub async fn list_investments_per_type(
        &self,
        window: Option<MonthWindow>,
    ) -> Result<Vec<InvestmentPerType>, ApiError> {
        self.get_list("/Investment/PerType", date_param(window)).await
    }

    pub async fn create_investment(&self, data: &InvestmentRequest) -> Result<u16, ApiError> {
        self.send(Method::POST, "/Investment", Some(data)).await
    }

    pub async fn update_investment(&self, id: EntityId, data: &InvestmentRequest) -> Result<u16, ApiError> {
        self.send(Method::PUT, &format!("/Investment/{id}"), Some(data))
            .await
    }

    pub async fn delete_investment(&self, id: EntityId) -> Result<u16, ApiError> {
        self.delete(&format!("/Investment/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_param() {
        let w = MonthWindow::new(2026, 11).unwrap();
        assert_eq!(date_param(Some(w)).as_deref(), Some("2026-11-01"));
        assert_eq!(date_param(None), None);
    }
}
