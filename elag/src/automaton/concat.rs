use super::{Result, SingleGraph};
use crate::language::Language;
use crate::types::StateId;

/// Appends a copy of `b` to `a`, so that `a` recognises the words of `a`
/// followed by the words of `b`.
///
/// Every final state of `a` stops being final and takes over the
/// transitions of `b`'s initial states; it stays final only if one of
/// them is. Defaults on both sides of the splice are made explicit first,
/// since a default means "anything not listed here" and the splice adds
/// to what is listed.
pub fn elag_concat(language: &Language, a: &mut SingleGraph, mut b: SingleGraph) -> Result<()> {
    let entries = b.initials();
    for q in &entries {
        b.explicit_default_transition(language, *q)?;
    }

    let finals: Vec<StateId> = (0..a.len())
        .map(StateId::new)
        .filter(|q| a.state(*q).terminal)
        .collect();

    let offset = a.len();
    let before = (a.len(), b.len());
    for mut state in b.states {
        state.initial = false;
        for t in &mut state.transitions {
            t.target = t.target.offset(offset);
        }
        state.default = state.default.map(|d| d.offset(offset));
        a.states.push(state);
    }

    for f in finals {
        a.state_mut(f).set_final(false);
        a.explicit_default_transition(language, f)?;
        for q in &entries {
            let entry = a.state(q.offset(offset)).clone();
            let state = a.state_mut(f);
            state.transitions.extend(entry.transitions);
            if entry.terminal {
                state.terminal = true;
            }
        }
    }

    log::debug!(
        "concat: {} + {} states -> {}",
        before.0,
        before.1,
        a.len()
    );
    Ok(())
}
