//! Grouping of monetary records by resolved entity.
//!
//! Each public function fixes one grouping semantics (ordering, percentage
//! basis, suppression of empty groups). Records whose key resolves to no
//! entity are left out of every group; grand totals are computed elsewhere
//! and still count them.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::records::{
    Debited, EntityId, Expense, ExpenseCategory, GroupingEntity, IncomeType, Investment,
    InvestmentEntry, InvestmentPerType, InvestmentType, Monetary, UserIncome,
};
use crate::resolve::Resolver;

/// One group of records sharing a grouping entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary<R> {
    pub entity_id: EntityId,
    pub name: String,
    /// Goal or budget of the entity, for goal groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    pub items: Vec<R>,
    pub total: f64,
    /// Raw percentage; may exceed 100
    pub percentage: f64,
}

impl<R> GroupSummary<R> {
    /// Fill fraction for a bounded bar, in `[0, 1]`. The raw percentage stays
    /// available for the text next to it.
    pub fn bar_fraction(&self) -> f64 {
        (self.percentage / 100.0).clamp(0.0, 1.0)
    }

    /// Amount still missing to reach the target.
    pub fn remaining(&self) -> Option<f64> {
        self.target.map(|t| (t - self.total).max(0.0))
    }

    pub fn is_target_reached(&self) -> bool {
        matches!(self.target, Some(t) if t > 0.0 && self.total >= t)
    }
}

/// `part / basis * 100`, or 0 when the basis cannot be divided by.
pub fn percent_of(part: f64, basis: f64) -> f64 {
    if !(basis > 0.0) || !basis.is_finite() {
        return 0.0;
    }
    let pct = part / basis * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

#[derive(Debug, Clone, Copy)]
enum Order {
    FirstEncounter,
    EntityOrder,
}

#[derive(Debug, Clone, Copy)]
enum Basis {
    InputTotal,
    EntityTarget,
}

#[derive(Debug, Clone, Copy)]
struct Policy {
    order: Order,
    basis: Basis,
    keep_empty: bool,
}

const SHARE: Policy = Policy {
    order: Order::FirstEncounter,
    basis: Basis::InputTotal,
    keep_empty: false,
};

const BREAKDOWN: Policy = Policy {
    order: Order::EntityOrder,
    basis: Basis::InputTotal,
    keep_empty: false,
};

const GOAL: Policy = Policy {
    order: Order::EntityOrder,
    basis: Basis::EntityTarget,
    keep_empty: true,
};

fn aggregate<R, E, K>(records: &[R], entities: &[E], key: K, policy: Policy) -> Vec<GroupSummary<R>>
where
    R: Monetary + Clone,
    E: GroupingEntity,
    K: Fn(&R) -> Option<EntityId>,
{
    let resolver = Resolver::new(entities);
    let input_total: f64 = records.iter().map(Monetary::value).sum();

    let mut buckets: HashMap<EntityId, Vec<&R>> = HashMap::new();
    let mut encountered: Vec<EntityId> = Vec::new();
    for record in records {
        let Some(id) = key(record) else { continue };
        if !resolver.contains(id) {
            continue;
        }
        let bucket = buckets.entry(id).or_default();
        if bucket.is_empty() {
            encountered.push(id);
        }
        bucket.push(record);
    }

    let order = match policy.order {
        Order::FirstEncounter => encountered,
        Order::EntityOrder => {
            let mut seen = HashSet::new();
            entities
                .iter()
                .map(GroupingEntity::id)
                .filter(|id| seen.insert(*id))
                .collect()
        }
    };

    order
        .into_iter()
        .filter_map(|id| {
            let entity = resolver.lookup(id)?;
            let items: Vec<R> = buckets
                .remove(&id)
                .unwrap_or_default()
                .into_iter()
                .cloned()
                .collect();
            let total: f64 = items.iter().map(Monetary::value).sum();
            if !policy.keep_empty && !(total > 0.0) {
                return None;
            }

            let percentage = match policy.basis {
                Basis::InputTotal => percent_of(total, input_total),
                Basis::EntityTarget => percent_of(total, entity.target_value().unwrap_or(0.0)),
            };

            Some(GroupSummary {
                entity_id: id,
                name: entity.display_name().to_string(),
                target: match policy.basis {
                    Basis::EntityTarget => entity.target_value(),
                    Basis::InputTotal => None,
                },
                items,
                total,
                percentage,
            })
        })
        .collect()
}

/// Expenses per category, in the order categories first appear in `expenses`.
/// Percentages are shares of the total of all expenses.
pub fn group_by_category(
    expenses: &[Expense],
    categories: &[ExpenseCategory],
) -> Vec<GroupSummary<Expense>> {
    aggregate(expenses, categories, |e| Some(e.id_category), SHARE)
}

/// Expenses per debit source, in the order sources are supplied.
/// Sources with no spending are left out; expenses without a source are orphans.
pub fn group_by_debit_source(
    expenses: &[Expense],
    sources: &[Debited],
) -> Vec<GroupSummary<Expense>> {
    aggregate(expenses, sources, |e| e.id_debited, BREAKDOWN)
}

/// Incomes per income type, in first-encounter order.
pub fn group_incomes_by_type(
    incomes: &[UserIncome],
    types: &[IncomeType],
) -> Vec<GroupSummary<UserIncome>> {
    aggregate(incomes, types, |i| Some(i.id_income), SHARE)
}

/// Contributions per investment type against each type's goal.
/// Every type is emitted, including the ones with nothing invested yet.
pub fn group_by_investment_type(
    investments: &[Investment],
    types: &[InvestmentType],
) -> Vec<GroupSummary<Investment>> {
    aggregate(investments, types, |i| Some(i.id_investment_type), GOAL)
}

/// Same shape as [`group_by_investment_type`] for groups the server already built.
///
/// `total` is the reached value; the percentage is always recomputed from
/// `valueReached / value` and the server's own `percentage` is ignored.
pub fn group_investments_per_type(
    per_type: &[InvestmentPerType],
) -> Vec<GroupSummary<InvestmentEntry>> {
    per_type
        .iter()
        .map(|p| GroupSummary {
            entity_id: p.id_investment_type,
            name: if p.description_investment_type.is_empty() {
                InvestmentType::SENTINEL.to_string()
            } else {
                p.description_investment_type.clone()
            },
            target: Some(p.value),
            items: p.investments.clone(),
            total: p.value_reached,
            percentage: percent_of(p.value_reached, p.value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_first_encounter_order() {
        let cats = vec![
            ExpenseCategory::new(1, "Alimentação"),
            ExpenseCategory::new(2, "Transporte"),
            ExpenseCategory::new(3, "Moradia"),
        ];
        let expenses = vec![
            Expense::new(1, "Aluguel", 1000.0, day(1), 3),
            Expense::new(2, "Mercado", 350.0, day(2), 1),
            Expense::new(3, "Padaria", 50.0, day(3), 1),
        ];
        let groups = group_by_category(&expenses, &cats);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Moradia", "Alimentação"]);
        assert_eq!(groups[1].total, 400.0);
        assert_eq!(groups[1].items.len(), 2);
        // Items keep input order
        assert_eq!(groups[1].items[0].description, "Mercado");
    }

    #[test]
    fn test_category_share_percentages() {
        let cats = vec![ExpenseCategory::new(1, "A"), ExpenseCategory::new(2, "B")];
        let expenses = vec![
            Expense::new(1, "x", 75.0, day(1), 1),
            Expense::new(2, "y", 25.0, day(1), 2),
        ];
        let groups = group_by_category(&expenses, &cats);
        assert_eq!(groups[0].percentage, 75.0);
        assert_eq!(groups[1].percentage, 25.0);
        assert_eq!(groups[0].target, None);
    }

    #[test]
    fn test_debit_source_entity_order_and_suppression() {
        let sources = vec![
            Debited::new(1, "Nubank"),
            Debited::new(2, "Itaú"),
            Debited::new(3, "Dinheiro"),
        ];
        let expenses = vec![
            Expense::new(1, "a", 30.0, day(1), 1).with_debited(3),
            Expense::new(2, "b", 70.0, day(1), 1).with_debited(1),
        ];
        let groups = group_by_debit_source(&expenses, &sources);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Nubank", "Dinheiro"]);
        assert_eq!(groups[0].percentage, 70.0);
    }

    #[test]
    fn test_expense_without_source_is_orphan() {
        let sources = vec![Debited::new(1, "Nubank")];
        let expenses = vec![
            Expense::new(1, "a", 50.0, day(1), 1).with_debited(1),
            Expense::new(2, "b", 50.0, day(1), 1),
        ];
        let groups = group_by_debit_source(&expenses, &sources);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total, 50.0);
        // Basis includes the orphan
        assert_eq!(groups[0].percentage, 50.0);
    }

    #[test]
    fn test_investment_goal_percentage() {
        let types = vec![
            InvestmentType::new(1, "Reserva", 1000.0),
            InvestmentType::new(2, "Viagem", 0.0),
            InvestmentType::new(3, "Aposentadoria", 5000.0),
        ];
        let investments = vec![
            Investment::new(1, "CDB", 250.0, day(5), 1),
            Investment::new(2, "Poupança", 100.0, day(6), 2),
        ];
        let groups = group_by_investment_type(&investments, &types);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].percentage, 25.0);
        assert_eq!(groups[0].remaining(), Some(750.0));
        // Zero goal never divides
        assert_eq!(groups[1].percentage, 0.0);
        assert_eq!(groups[2].total, 0.0);
        assert_eq!(groups[2].percentage, 0.0);
        assert_eq!(groups[2].target, Some(5000.0));
    }

    #[test]
    fn test_per_type_recomputes_percentage() {
        let per_type = vec![InvestmentPerType {
            id_investment_type: 4,
            description_investment_type: "Reserva".to_string(),
            value: 2000.0,
            value_reached: 500.0,
            percentage: 80.0,
            investments: vec![InvestmentEntry {
                id_investment: 1,
                description_investment: "Tesouro".to_string(),
                value: 500.0,
            }],
        }];
        let groups = group_investments_per_type(&per_type);
        assert_eq!(groups[0].percentage, 25.0);
        assert_eq!(groups[0].total, 500.0);
        assert_eq!(groups[0].items.len(), 1);
    }

    #[test]
    fn test_bar_fraction_clamps() {
        let g: GroupSummary<Expense> = GroupSummary {
            entity_id: 1,
            name: "x".to_string(),
            target: Some(100.0),
            items: Vec::new(),
            total: 150.0,
            percentage: 150.0,
        };
        assert_eq!(g.bar_fraction(), 1.0);
        assert_eq!(g.percentage, 150.0);
        assert_eq!(g.remaining(), Some(0.0));
        assert!(g.is_target_reached());
    }

    #[test]
    fn test_percent_of_edge_cases() {
        assert_eq!(percent_of(10.0, 0.0), 0.0);
        assert_eq!(percent_of(10.0, -5.0), 0.0);
        assert_eq!(percent_of(10.0, f64::NAN), 0.0);
        assert_eq!(percent_of(10.0, f64::INFINITY), 0.0);
        assert_eq!(percent_of(150.0, 100.0), 150.0);
    }

    #[test]
    fn test_incomes_by_type() {
        let types = vec![IncomeType::new(1, "Salário"), IncomeType::new(2, "Freelance")];
        let incomes = vec![
            UserIncome::new(1, 2, 1500.0, day(15)),
            UserIncome::new(2, 1, 5000.0, day(1)),
            UserIncome::new(3, 9, 300.0, day(20)),
        ];
        let groups = group_incomes_by_type(&incomes, &types);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Freelance");
        assert_eq!(groups[1].total, 5000.0);
    }
}
