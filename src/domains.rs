//! The candidate words of each variable.

use bit_set::BitSet;
use std::rc::Rc;

use crate::{VarToken, WordIdx};

/// The domain store: the candidate words of every variable.
///
/// Each domain is shared copy-on-write, so cloning the store to take a
/// snapshot is cheap and later edits never reach the snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Domains {
    domains: Vec<Rc<BitSet>>,
}

impl Domains {
    /// Give each of `num_vars` variables every one of `num_words` words.
    pub fn new(num_vars: usize, num_words: usize) -> Self {
        let all: BitSet = (0..num_words).collect();
        let all = Rc::new(all);
        Domains {
            domains: vec![all; num_vars],
        }
    }

    /// Count the candidates of a variable.
    pub fn len(&self, var: VarToken) -> usize {
        self.domains[var.0].len()
    }

    pub fn is_empty(&self, var: VarToken) -> bool {
        self.domains[var.0].is_empty()
    }

    /// Check whether any variable has run out of candidates.
    pub fn any_empty(&self) -> bool {
        self.domains.iter().any(|d| d.is_empty())
    }

    pub fn contains(&self, var: VarToken, word: WordIdx) -> bool {
        self.domains[var.0].contains(word)
    }

    /// Get an iterator over the candidates of a variable, in vocabulary order.
    pub fn iter(&self, var: VarToken) -> impl Iterator<Item = WordIdx> + '_ {
        self.domains[var.0].iter()
    }

    /// The only candidate of a variable, if it has exactly one.
    pub fn single(&self, var: VarToken) -> Option<WordIdx> {
        let domain = &self.domains[var.0];
        if domain.len() == 1 {
            domain.iter().next()
        } else {
            None
        }
    }

    /// Keep only the candidates of `var` matching `keep`.
    ///
    /// Returns whether any candidate was removed.
    pub fn retain<F: FnMut(WordIdx) -> bool>(&mut self, var: VarToken, mut keep: F) -> bool {
        let discard: Vec<WordIdx> = self.domains[var.0].iter().filter(|&w| !keep(w)).collect();
        if discard.is_empty() {
            return false;
        }

        let set = Rc::make_mut(&mut self.domains[var.0]);
        for word in discard {
            set.remove(word);
        }
        true
    }

    /// Narrow the candidates of `var` to exactly `word`.
    pub fn set_single(&mut self, var: VarToken, word: WordIdx) {
        let set = Rc::make_mut(&mut self.domains[var.0]);
        set.clear();
        set.insert(word);
    }

    /// Take a snapshot of every domain for a later [`restore`](Self::restore).
    pub fn snapshot(&self) -> Domains {
        self.clone()
    }

    /// Put back the domains exactly as they were in `snapshot`.
    pub fn restore(&mut self, snapshot: Domains) {
        *self = snapshot;
    }
}
