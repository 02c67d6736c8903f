use hashbrown::HashMap;

use super::Symbol;

/// Numbers distinct symbols so transitions can be compared by id.
///
/// Two symbols get the same id iff they compare equal. Id 0 is reserved
/// for default transitions.
#[derive(Debug, Clone)]
pub struct SymbolAlphabet {
    key_table: Vec<Symbol>,
    symbol_to_id: HashMap<Symbol, usize>,
}

impl SymbolAlphabet {
    /// Id standing for a default transition.
    pub const DEFAULT: usize = 0;

    /// An alphabet holding only the default id.
    pub fn new() -> SymbolAlphabet {
        SymbolAlphabet {
            key_table: vec![],
            symbol_to_id: HashMap::new(),
        }
    }

    /// Returns the id of `symbol`, numbering it if it is new.
    pub fn add_symbol(&mut self, symbol: &Symbol) -> usize {
        if let Some(&id) = self.symbol_to_id.get(symbol) {
            return id;
        }
        self.key_table.push(symbol.clone());
        let id = self.key_table.len();
        self.symbol_to_id.insert(symbol.clone(), id);
        id
    }

    /// Id of `symbol`, if it was added.
    #[inline(always)]
    pub fn symbol_id(&self, symbol: &Symbol) -> Option<usize> {
        self.symbol_to_id.get(symbol).copied()
    }

    /// The symbol numbered `id`. Id 0 has none.
    #[inline(always)]
    pub fn symbol(&self, id: usize) -> Option<&Symbol> {
        id.checked_sub(1).and_then(|i| self.key_table.get(i))
    }

    /// Symbols in id order, starting at id 1.
    #[inline(always)]
    pub fn key_table(&self) -> &[Symbol] {
        &self.key_table
    }

    /// Number of symbols, not counting the default.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.key_table.len()
    }

    /// True if no symbol was added.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.key_table.is_empty()
    }
}

impl Default for SymbolAlphabet {
    fn default() -> SymbolAlphabet {
        SymbolAlphabet::new()
    }
}
