//! Record and grouping-entity types as the finance API serves them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier shared by every record and entity on the API side.
pub type EntityId = i64;

/// Anything that contributes money to a total.
pub trait Monetary {
    fn value(&self) -> f64;
}

/// A dimension records are aggregated by (category, debit source, investment type...).
pub trait GroupingEntity {
    /// Label shown when a foreign key matches no loaded entity.
    const SENTINEL: &'static str;

    fn id(&self) -> EntityId;
    fn display_name(&self) -> &str;

    /// Budget or goal attached to the entity, if any.
    fn target_value(&self) -> Option<f64> {
        None
    }
}

/// Wire dates arrive either as `YYYY-MM-DD` or as a full ISO-8601 timestamp.
/// Only the calendar date is kept.
pub mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let day = raw.trim().split('T').next()?;
        NaiveDate::parse_from_str(day, FORMAT).ok()
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
    }
}

// --- Grouping entities ---

/// Expense category (`/Category`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: EntityId,
    pub name: String,
}

impl ExpenseCategory {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl GroupingEntity for ExpenseCategory {
    const SENTINEL: &'static str = "Outros";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Debit source: the account or card an expense is paid from.
/// `value` is the amount available on it, when the user tracks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debited {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
}

impl Debited {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

impl GroupingEntity for Debited {
    const SENTINEL: &'static str = "Desconhecido";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn target_value(&self) -> Option<f64> {
        self.value
    }
}

/// Investment type; `value` is the goal the user wants to reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentType {
    pub id: EntityId,
    pub description: String,
    #[serde(default)]
    pub value: f64,
}

impl InvestmentType {
    pub fn new(id: EntityId, description: impl Into<String>, goal: f64) -> Self {
        Self {
            id,
            description: description.into(),
            value: goal,
        }
    }
}

impl GroupingEntity for InvestmentType {
    const SENTINEL: &'static str = "Outros";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.description
    }

    fn target_value(&self) -> Option<f64> {
        Some(self.value)
    }
}

/// Income type (salary, freelance...), referenced by `UserIncome::id_income`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeType {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl IncomeType {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
        }
    }
}

impl GroupingEntity for IncomeType {
    const SENTINEL: &'static str = "Outros";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

// --- Monetary records ---

/// One expense line (`/OutGoing`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_user: Option<EntityId>,
    #[serde(default)]
    pub description: String,
    pub value: f64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub id_category: EntityId,
    #[serde(default)]
    pub id_sub_category: Option<EntityId>,
    #[serde(default)]
    pub id_debited: Option<EntityId>,
}

impl Expense {
    pub fn new(
        id: EntityId,
        description: impl Into<String>,
        value: f64,
        date: NaiveDate,
        id_category: EntityId,
    ) -> Self {
        Self {
            id,
            id_user: None,
            description: description.into(),
            value,
            date,
            id_category,
            id_sub_category: None,
            id_debited: None,
        }
    }

    pub fn with_debited(mut self, id_debited: EntityId) -> Self {
        self.id_debited = Some(id_debited);
        self
    }
}

impl Monetary for Expense {
    fn value(&self) -> f64 {
        self.value
    }
}

/// One income line (`/User/UserIncome`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIncome {
    pub id: EntityId,
    pub id_income: EntityId,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub value: f64,
}

impl UserIncome {
    pub fn new(id: EntityId, id_income: EntityId, value: f64, date: NaiveDate) -> Self {
        Self {
            id,
            id_income,
            date,
            value,
        }
    }
}

impl Monetary for UserIncome {
    fn value(&self) -> f64 {
        self.value
    }
}

/// One investment contribution (`/Investment`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: EntityId,
    #[serde(default)]
    pub description: String,
    pub value: f64,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    // The backend spells it both ways depending on the endpoint.
    #[serde(alias = "idInvestimentType")]
    pub id_investment_type: EntityId,
}

impl Investment {
    pub fn new(
        id: EntityId,
        description: impl Into<String>,
        value: f64,
        date: NaiveDate,
        id_investment_type: EntityId,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            value,
            date,
            id_investment_type,
        }
    }
}

impl Monetary for Investment {
    fn value(&self) -> f64 {
        self.value
    }
}

/// Contribution nested inside a server-side `InvestmentPerType` group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentEntry {
    pub id_investment: EntityId,
    #[serde(default)]
    pub description_investment: String,
    pub value: f64,
}

impl Monetary for InvestmentEntry {
    fn value(&self) -> f64 {
        self.value
    }
}

/// Investments pre-grouped per type by the server.
///
/// `percentage` is whatever the server computed; it is kept for completeness
/// but never trusted (see `aggregate::group_investments_per_type`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPerType {
    pub id_investment_type: EntityId,
    #[serde(default)]
    pub description_investment_type: String,
    /// Goal for the type
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub value_reached: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub investments: Vec<InvestmentEntry>,
}

impl Monetary for InvestmentPerType {
    fn value(&self) -> f64 {
        self.value_reached
    }
}
