/*! Finite-state automata over structured linguistic symbols.

Implements the automaton operations used to apply ELAG disambiguation
grammars to the text automata of [`Unitex`]: determinization,
minimization, intersection, complementation and concatenation. Labels are
not plain letters but part-of-speech tags with features, so every
operation is built on an algebra of symbols (comparison, containment,
intersection and subtraction) defined by a tagset.

[`Unitex`]: (https://unitexgramlab.org)

# Usage examples

```
use elag::automaton::{elag_determinize, elag_minimize, SingleGraph};
use elag::language::Language;
use elag::symbol::Symbol;
use elag::types::StateId;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let tagset = "NAME demo\nPOS V\ninflex:\n  number = s p\ncomplete:\n  <number>\n.\n";
let mut language = Language::from_tagset_str(tagset)?;

let mut g = SingleGraph::with_states(2);
g.state_mut(StateId::new(0)).set_initial(true);
g.state_mut(StateId::new(1)).set_final(true);
for label in ["<V>", "<V:s>"] {
    let symbols = Symbol::parse_grammar(&mut language, label)?;
    g.add_transitions(StateId::new(0), symbols, StateId::new(1));
}

elag_determinize(&language, &mut g)?;
elag_minimize(&mut g, 0)?;
assert_eq!(g.len(), 2);
# Ok(())
# }
```

The `elag` command of the `elag-bin` crate applies the same operations
to automata stored as JSON.

*/

#![warn(missing_docs)]

pub mod automaton;
/// Pipeline settings.
pub mod config;
/// Names and character tables shared across the crate.
pub mod constants;
pub mod language;
pub mod symbol;
/// Id newtypes.
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::automaton::{AutomatonDocument, AutomatonError, IntersectionMode, SingleGraph};
pub use crate::config::ElagConfig;
pub use crate::language::{Language, LanguageError};
pub use crate::symbol::{Symbol, SymbolError};

/// Routes the library's `log` output through `env_logger`, for hosts that
/// set up no logger of their own. Calling it again does nothing.
#[cfg(feature = "logging")]
pub fn enable_logging() {
    let _ = env_logger::try_init();
}
