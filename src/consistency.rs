//! Node and arc consistency over the domain store.

use log::trace;
use std::collections::HashSet;

use crate::search::CrosswordSearch;
use crate::VarToken;

impl CrosswordSearch<'_> {
    /// Remove from every domain the words whose length differs from
    /// their variable's length.
    pub fn enforce_node_consistency(&mut self) {
        let crossword = self.crossword;
        for var in crossword.tokens() {
            let length = crossword[var].length;
            self.domains.retain(var, |word| crossword.word_len(word) == length);
        }
    }

    /// Make `x` arc consistent with `y`: remove every word of `x` that
    /// no word of `y` agrees with at their overlap.
    ///
    /// Returns whether the domain of `x` changed. Variables that do not
    /// cross are left alone.
    pub fn revise(&mut self, x: VarToken, y: VarToken) -> bool {
        let crossword = self.crossword;
        let (ix, iy) = match crossword.overlap(x, y) {
            Some(overlap) => overlap,
            None => return false,
        };

        let supported: HashSet<char> = self
            .domains
            .iter(y)
            .filter_map(|word| crossword.letter(word, iy))
            .collect();

        let revised = self.domains.retain(x, |word| {
            crossword
                .letter(word, ix)
                .map_or(false, |c| supported.contains(&c))
        });

        if revised {
            trace!(
                "revised {} against {}: {} left",
                crossword[x],
                crossword[y],
                self.domains.len(x)
            );
        }
        revised
    }

    /// Enforce arc consistency with AC-3.
    ///
    /// The worklist starts as `arcs`, or as every arc of the crossword
    /// when None. Returns false if some domain ends up empty.
    pub fn ac3(&mut self, arcs: Option<Vec<(VarToken, VarToken)>>) -> bool {
        if self.domains.any_empty() {
            return false;
        }

        let crossword = self.crossword;
        let mut arcs = arcs.unwrap_or_else(|| {
            crossword
                .tokens()
                .flat_map(move |x| crossword.neighbors(x).map(move |y| (x, y)))
                .collect()
        });

        while let Some((x, y)) = arcs.pop() {
            if !self.revise(x, y) {
                continue;
            }

            if self.domains.is_empty(x) {
                return false;
            }

            arcs.extend(crossword.neighbors(x).filter(|&z| z != y).map(|z| (z, x)));
        }

        true
    }
}
