use std::collections::HashMap;

use crate::model::symbol::{Symbol, SymbolId};

/// Name-keyed registry of a library's symbols.
///
/// Symbols live in an arena indexed by [`SymbolId`]; keyframes refer to each
/// other through ids, never through owning pointers. A name declared twice
/// resolves to the later declaration, the earlier one stays in the arena but
/// is no longer reachable by name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) by_name: HashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn by_name(&self, name: &str) -> Option<&Symbol> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Visible entries ordered by id, i.e. by declaration order.
    pub fn entries(&self) -> Vec<(&str, SymbolId)> {
        let mut entries: Vec<_> = self
            .by_name
            .iter()
            .map(|(name, id)| (name.as_str(), *id))
            .collect();
        entries.sort_by_key(|(_, id)| *id);
        entries
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index())
    }
}

/// Mutable table used only while a library is loading.
///
/// Movie stubs are inserted straight away; texture slots are reserved in
/// manifest order and filled as their atlas arrives, so the finished table
/// does not depend on the order in which atlases complete.
#[derive(Debug, Default)]
pub struct TableBuilder {
    slots: Vec<Option<Symbol>>,
    by_name: HashMap<String, SymbolId>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) -> SymbolId {
        let id = self.reserve(symbol.name());
        self.slots[id.index()] = Some(symbol);
        id
    }

    pub fn reserve(&mut self, name: &str) -> SymbolId {
        let id = SymbolId(self.slots.len() as u32);
        self.slots.push(None);
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Fills a reserved slot. Returns false when `id` was never reserved.
    pub fn fill(&mut self, id: SymbolId, symbol: Symbol) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) => {
                *slot = Some(symbol);
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Finishes the table, or returns the builder when a reserved slot was
    /// never filled.
    pub fn build(self) -> Result<SymbolTable, Self> {
        if self.pending() > 0 {
            return Err(self);
        }
        Ok(SymbolTable {
            symbols: self.slots.into_iter().flatten().collect(),
            by_name: self.by_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie::MovieSymbol;

    fn movie(name: &str) -> Symbol {
        Symbol::Movie(MovieSymbol {
            name: name.into(),
            layers: Vec::new(),
        })
    }

    #[test]
    fn reserved_slots_block_build_until_filled() {
        let mut builder = TableBuilder::new();
        builder.insert(movie("walk"));
        let slot = builder.reserve("run");
        assert_eq!(builder.pending(), 1);

        let mut builder = builder.build().unwrap_err();
        assert!(!builder.fill(SymbolId(7), movie("stray")));
        assert!(builder.fill(slot, movie("run")));
        let table = builder.build().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("run"), Some(slot));
        assert_eq!(table.by_name("walk").map(Symbol::name), Some("walk"));
    }

    #[test]
    fn later_declaration_shadows_earlier() {
        let mut builder = TableBuilder::new();
        builder.insert(movie("dup"));
        let second = builder.insert(movie("dup"));
        let table = builder.build().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("dup"), Some(second));
        assert_eq!(table.entries(), vec![("dup", second)]);
    }
}
