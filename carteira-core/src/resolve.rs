//! Foreign-key resolution against loaded grouping entities.
//!
//! Resolution is total: an id nobody knows maps to the entity type's sentinel
//! label, never to an error.

use std::collections::HashMap;

use crate::records::{EntityId, GroupingEntity};

/// Id -> entity index built once per aggregation pass.
#[derive(Debug, Clone)]
pub struct Resolver<'a, E> {
    by_id: HashMap<EntityId, &'a E>,
}

impl<'a, E: GroupingEntity> Resolver<'a, E> {
    /// Index `entities` by id. When two entities share an id the first one wins.
    pub fn new(entities: &'a [E]) -> Self {
        let mut by_id = HashMap::with_capacity(entities.len());
        for entity in entities {
            by_id.entry(entity.id()).or_insert(entity);
        }
        Self { by_id }
    }

    pub fn lookup(&self, id: EntityId) -> Option<&'a E> {
        self.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Display name for `id`, or the sentinel when unresolved.
    pub fn name_of(&self, id: EntityId) -> &'a str {
        match self.lookup(id) {
            Some(entity) => entity.display_name(),
            None => E::SENTINEL,
        }
    }

    /// Same as [`Resolver::name_of`] for optional keys; `None` resolves to the sentinel.
    pub fn name_of_opt(&self, id: Option<EntityId>) -> &'a str {
        id.map_or(E::SENTINEL, |id| self.name_of(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// One-off lookup without building an index.
pub fn resolve_name<E: GroupingEntity>(id: EntityId, entities: &[E]) -> &str {
    entities
        .iter()
        .find(|e| e.id() == id)
        .map_or(E::SENTINEL, |e| e.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Debited, ExpenseCategory, InvestmentType};

    fn categories() -> Vec<ExpenseCategory> {
        vec![
            ExpenseCategory::new(1, "Alimentação"),
            ExpenseCategory::new(2, "Transporte"),
        ]
    }

    #[test]
    fn test_name_of_known_id() {
        let cats = categories();
        let r = Resolver::new(&cats);
        assert_eq!(r.name_of(2), "Transporte");
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_unknown_id_yields_sentinel() {
        let cats = categories();
        assert_eq!(Resolver::new(&cats).name_of(999), "Outros");

        let sources = vec![Debited::new(1, "Nubank")];
        assert_eq!(Resolver::new(&sources).name_of(42), "Desconhecido");
        assert_eq!(Resolver::new(&sources).name_of_opt(None), "Desconhecido");

        let types: Vec<InvestmentType> = Vec::new();
        let r = Resolver::new(&types);
        assert!(r.is_empty());
        assert_eq!(r.name_of(1), "Outros");
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let cats = vec![
            ExpenseCategory::new(1, "Primeira"),
            ExpenseCategory::new(1, "Segunda"),
        ];
        assert_eq!(Resolver::new(&cats).name_of(1), "Primeira");
        assert_eq!(resolve_name(1, &cats), "Primeira");
    }

    #[test]
    fn test_resolve_name_linear() {
        let cats = categories();
        assert_eq!(resolve_name(1, &cats), "Alimentação");
        assert_eq!(resolve_name(3, &cats), "Outros");
    }

    #[test]
    fn test_match_is_exact() {
        let cats = vec![ExpenseCategory::new(10, "Casa")];
        let r = Resolver::new(&cats);
        assert!(r.contains(10));
        assert!(!r.contains(1));
        assert!(!r.contains(-10));
    }
}
