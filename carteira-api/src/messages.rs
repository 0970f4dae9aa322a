//! Request bodies and response envelopes of the REST API.

use carteira_core::{EntityId, wire_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::session::UserInfo;

// --- Auth ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub document: String,
    pub password: String,
}

/// Answer to both login and register.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

// --- Entities ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitedRequest {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTypeRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTypeRequest {
    pub description: String,
    /// Goal
    pub value: f64,
}

// --- Dated records ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    pub description: String,
    pub value: f64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub id_category: EntityId,
    pub id_sub_category: Option<EntityId>,
    pub id_debited: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIncomeRequest {
    pub value: f64,
    pub id_income: EntityId,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    pub description: String,
    pub value: f64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub id_investment_type: EntityId,
}

/// Body of the PUT endpoints that take the id inside the payload.
#[derive(Debug, Clone, Serialize)]
pub struct WithId<'a, T> {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: &'a T,
}

// --- Envelopes ---

/// Lists come wrapped as `{ value: [...], statusCode, formatters, ... }`;
/// a few endpoints answer with the bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Wrapped {
        value: Vec<T>,
        #[serde(default, rename = "statusCode")]
        status_code: Option<u16>,
    },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Wrapped { value, .. } => value,
            Listing::Bare(items) => items,
        }
    }
}
