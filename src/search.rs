//! The solving session and the backtracking search.

use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;

use crate::assignment::{Assignment, Solution};
use crate::crossword::Crossword;
use crate::domains::Domains;
use crate::{VarToken, WordIdx};

/// Intermediate solving state: the domain store of one crossword.
#[derive(Clone)]
pub struct CrosswordSearch<'a> {
    pub(crate) crossword: &'a Crossword,
    pub(crate) domains: Domains,

    // The number of words tried while solving.
    num_guesses: u32,
}

/*--------------------------------------------------------------*/

impl Crossword {
    /// Take the obvious steps, pruning every domain by word length and
    /// arc consistency. Stops when it must start guessing.
    /// Primarily for testing.
    ///
    /// Returns the intermediate search state, or None if a
    /// contradiction was found.
    pub fn step(&self) -> Option<CrosswordSearch<'_>> {
        let mut search = CrosswordSearch::new(self);
        if search.propagate() {
            Some(search)
        } else {
            None
        }
    }

    /// Find any way to fill the crossword.
    ///
    /// # Examples
    ///
    /// ```
    /// let crossword = crossword_solver::Crossword::parse(
    ///     "___\n#_#\n#_#\n",
    ///     "CAT\nDOG\nART\n",
    /// ).unwrap();
    ///
    /// let solution = crossword.solve_any().expect("solution");
    /// assert_eq!(solution.to_string(), "CAT\n█R█\n█T█\n");
    /// ```
    pub fn solve_any(&self) -> Option<Solution<'_>> {
        CrosswordSearch::new(self).solve_any()
    }

    /// Find every way to fill the crossword.
    pub fn solve_all(&self) -> Vec<Solution<'_>> {
        CrosswordSearch::new(self).solve_all()
    }

    /// Find the way to fill the crossword, verifying that it is unique.
    ///
    /// # Examples
    ///
    /// ```
    /// let crossword = crossword_solver::Crossword::parse(
    ///     "___\n###\n___\n",
    ///     "CAT\nDOG\n",
    /// ).unwrap();
    ///
    /// // CAT/DOG and DOG/CAT both fit.
    /// assert!(crossword.solve_unique().is_none());
    /// ```
    pub fn solve_unique(&self) -> Option<Solution<'_>> {
        CrosswordSearch::new(self).solve_unique()
    }
}

/*--------------------------------------------------------------*/

impl<'a> CrosswordSearch<'a> {
    /// Start a session where every variable may take any word.
    pub fn new(crossword: &'a Crossword) -> Self {
        CrosswordSearch {
            crossword,
            domains: Domains::new(crossword.variables().len(), crossword.words().len()),
            num_guesses: 0,
        }
    }

    pub fn crossword(&self) -> &'a Crossword {
        self.crossword
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Get the number of words tried to solve the last crossword.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses
    }

    /// Find any way to fill the crossword.
    pub fn solve_any(&mut self) -> Option<Solution<'a>> {
        let mut solutions = self.solve(1);
        solutions.pop()
    }

    /// Find the way to fill the crossword, or None if there is no
    /// solution or more than one.
    pub fn solve_unique(&mut self) -> Option<Solution<'a>> {
        let mut solutions = self.solve(2);
        if solutions.len() == 1 {
            solutions.pop()
        } else {
            None
        }
    }

    /// Find every way to fill the crossword.
    pub fn solve_all(&mut self) -> Vec<Solution<'a>> {
        self.solve(usize::MAX)
    }

    /// Solve from fresh domains, finding up to count solutions.
    fn solve(&mut self, count: usize) -> Vec<Solution<'a>> {
        let crossword = self.crossword;
        self.domains = Domains::new(crossword.variables().len(), crossword.words().len());
        self.num_guesses = 0;

        let mut solutions = Vec::new();
        if self.propagate() {
            self.search(Assignment::new(), count, &mut solutions);
        }

        debug!(
            "found {} solution(s) after {} guesses",
            solutions.len(),
            self.num_guesses
        );
        solutions
            .into_iter()
            .map(|assignment| Solution::new(crossword, assignment))
            .collect()
    }

    /// Enforce node consistency, then arc consistency on every arc.
    ///
    /// Returns false if some variable has no candidates left.
    pub(crate) fn propagate(&mut self) -> bool {
        self.enforce_node_consistency();
        debug!("node consistency: {:?}", self.domain_sizes());

        let consistent = self.ac3(None);
        debug!("arc consistency: {:?}", self.domain_sizes());
        consistent
    }

    fn domain_sizes(&self) -> Vec<usize> {
        self.crossword
            .tokens()
            .map(|var| self.domains.len(var))
            .collect()
    }

    /// Choose the unassigned variable with the fewest candidates left,
    /// preferring the one crossing the most variables on a tie. Further
    /// ties go to the earliest variable.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<VarToken> {
        self.crossword
            .tokens()
            .filter(|&var| !assignment.contains(var))
            .min_by_key(|&var| (self.domains.len(var), Reverse(self.crossword.degree(var))))
    }

    /// Order the candidates of `var`, least constraining first.
    ///
    /// A candidate's cost is the number of unassigned neighbours that
    /// also hold the same word as a candidate. Equal costs keep
    /// vocabulary order.
    pub fn order_domain_values(&self, var: VarToken, assignment: &Assignment) -> Vec<WordIdx> {
        let mut words: Vec<WordIdx> = self.domains.iter(var).collect();
        words.sort_by_cached_key(|&word| {
            self.crossword
                .neighbors(var)
                .filter(|&n| !assignment.contains(n) && self.domains.contains(n, word))
                .count()
        });
        words
    }

    /// Check that every assigned word fits its variable, agrees with
    /// the assigned words crossing it, and is used only once.
    pub fn is_consistent(&self, assignment: &Assignment) -> bool {
        let crossword = self.crossword;
        let mut used = HashSet::with_capacity(assignment.len());

        for (var, word) in assignment.iter() {
            if crossword.word_len(word) != crossword[var].length {
                return false;
            }

            if !used.insert(word) {
                return false;
            }

            for other in crossword.neighbors(var) {
                if let (Some(other_word), Some((ix, iy))) =
                    (assignment.get(other), crossword.overlap(var, other))
                {
                    if crossword.letter(word, ix) != crossword.letter(other_word, iy) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Extend `assignment` into a complete, consistent one.
    ///
    /// Returns None if no extension exists. On failure the domains are
    /// left as they were on entry.
    pub fn backtrack(&mut self, assignment: Assignment) -> Option<Assignment> {
        let mut solutions = Vec::with_capacity(1);
        self.search(assignment, 1, &mut solutions);
        solutions.pop()
    }

    /// Search for complete assignments extending `assignment` until
    /// `count` solutions have been found.
    fn search(&mut self, assignment: Assignment, count: usize, solutions: &mut Vec<Assignment>) {
        if assignment.is_complete(self.crossword.variables().len()) {
            solutions.push(assignment);
            return;
        }

        let var = match self.select_unassigned_variable(&assignment) {
            Some(var) => var,
            None => return,
        };

        for word in self.order_domain_values(var, &assignment) {
            let mut trial = assignment.clone();
            trial.insert(var, word);
            if !self.is_consistent(&trial) {
                continue;
            }

            self.num_guesses += 1;
            let snapshot = self.domains.snapshot();
            self.domains.set_single(var, word);

            if let Some(inferred) = self.infer(var, &trial) {
                trial.extend(inferred);
                if self.is_consistent(&trial) {
                    self.search(trial, count, solutions);
                    if solutions.len() >= count {
                        // Reached desired number of solutions.
                        return;
                    }
                }
            }

            trace!(
                "backtracking {} = {}",
                self.crossword[var],
                self.crossword.word(word)
            );
            self.domains.restore(snapshot);
        }
    }

    /// Maintain arc consistency after `var` has been narrowed to one
    /// word: revise each unassigned neighbour against it.
    ///
    /// Returns the neighbours left with exactly one candidate, or None
    /// if some domain was wiped out.
    fn infer(
        &mut self,
        var: VarToken,
        assignment: &Assignment,
    ) -> Option<Vec<(VarToken, WordIdx)>> {
        let arcs: Vec<(VarToken, VarToken)> = self
            .crossword
            .neighbors(var)
            .filter(|&n| !assignment.contains(n))
            .map(|n| (n, var))
            .collect();

        if arcs.is_empty() {
            return Some(Vec::new());
        }

        if !self.ac3(Some(arcs.clone())) {
            return None;
        }

        let inferred = arcs
            .iter()
            .filter_map(|&(n, _)| self.domains.single(n).map(|word| (n, word)))
            .collect();
        Some(inferred)
    }
}

impl fmt::Debug for CrosswordSearch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "CrosswordSearch={{")?;
        for var in self.crossword.tokens() {
            writeln!(f)?;
            write!(f, "  {}:", self.crossword[var])?;
            for word in self.domains.iter(var) {
                write!(f, " {}", self.crossword.word(word))?;
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Assignment, Crossword, CrosswordSearch, VarToken};

    const CROSS: &str = "___\n#_#\n#_#\n";

    #[test]
    fn test_no_vars() {
        let crossword = Crossword::parse("#_#\n", "CAT\n").unwrap();
        assert!(crossword.variables().is_empty());
        assert!(crossword.solve_any().is_some());
        assert_eq!(crossword.solve_all().len(), 1);
        assert!(crossword.step().is_some());
    }

    #[test]
    fn test_select_fewest_candidates() {
        // Three across words, each crossed by both down words.
        let crossword = Crossword::parse("__\n__\n__\n", "AB\nCD\nEF\nACE\nBDF\n").unwrap();
        let mut search = CrosswordSearch::new(&crossword);
        search.enforce_node_consistency();

        let assignment = Assignment::new();
        // Down words have two candidates, across words three.
        assert_eq!(search.select_unassigned_variable(&assignment), Some(VarToken(3)));

        let mut assignment = Assignment::new();
        assignment.insert(VarToken(3), 0);
        assignment.insert(VarToken(4), 1);
        assert_eq!(search.select_unassigned_variable(&assignment), Some(VarToken(0)));
    }

    #[test]
    fn test_select_highest_degree_on_tie() {
        // The down word crosses both across words.
        let crossword = Crossword::parse("___\n#_#\n___\n", "ABC\nDEF\nGHI\n").unwrap();
        let mut search = CrosswordSearch::new(&crossword);
        search.enforce_node_consistency();

        assert_eq!(crossword.degree(VarToken(2)), 2);
        assert_eq!(search.select_unassigned_variable(&Assignment::new()), Some(VarToken(2)));
    }

    #[test]
    fn test_order_least_constraining_first() {
        let crossword = Crossword::parse(CROSS, "ART\nCAT\nDOG\n").unwrap();
        let mut search = CrosswordSearch::new(&crossword);
        search.enforce_node_consistency();
        search.domains.retain(VarToken(1), |word| word != 1);

        // CAT is no longer a candidate of the crossing word.
        assert_eq!(
            search.order_domain_values(VarToken(0), &Assignment::new()),
            [1, 0, 2]
        );

        // Assigned neighbours are ignored.
        let mut assignment = Assignment::new();
        assignment.insert(VarToken(1), 0);
        assert_eq!(search.order_domain_values(VarToken(0), &assignment), [0, 1, 2]);
    }

    #[test]
    fn test_is_consistent() {
        let crossword = Crossword::parse(CROSS, "ART\nCAT\nDOG\nTO\n").unwrap();
        let search = CrosswordSearch::new(&crossword);
        let across = VarToken(0);
        let down = VarToken(1);

        let mut assignment = Assignment::new();
        assert!(search.is_consistent(&assignment));

        assignment.insert(across, 1);
        assignment.insert(down, 0);
        assert!(search.is_consistent(&assignment));

        // Letters disagree.
        assignment.insert(down, 2);
        assert!(!search.is_consistent(&assignment));

        // Wrong length.
        let mut assignment = Assignment::new();
        assignment.insert(across, 3);
        assert!(!search.is_consistent(&assignment));
    }

    #[test]
    fn test_is_consistent_distinct_words() {
        let crossword = Crossword::parse("___\n###\n___\n", "CAT\n").unwrap();
        let search = CrosswordSearch::new(&crossword);

        let mut assignment = Assignment::new();
        assignment.insert(VarToken(0), 0);
        assignment.insert(VarToken(1), 0);
        assert!(!search.is_consistent(&assignment));
    }

    #[test]
    fn test_backtrack_restores_domains_on_failure() {
        let crossword = Crossword::parse("___\n###\n___\n", "CAT\n").unwrap();
        let mut search = CrosswordSearch::new(&crossword);
        search.enforce_node_consistency();
        assert!(search.ac3(None));

        let before = search.domains().clone();
        assert!(search.backtrack(Assignment::new()).is_none());
        assert_eq!(search.domains(), &before);
        assert_eq!(search.num_guesses(), 1);
    }

    #[test]
    fn test_inference_fills_crossing_word() {
        let crossword = Crossword::parse(CROSS, "ART\nCAT\nDOG\nDEN\n").unwrap();
        let mut search = CrosswordSearch::new(&crossword);
        search.enforce_node_consistency();

        let solution = search.backtrack(Assignment::new()).expect("solution");
        assert_eq!(solution.get(VarToken(0)), Some(1));
        assert_eq!(solution.get(VarToken(1)), Some(0));

        // ART was tried first and wiped out the crossing word.
        assert_eq!(search.num_guesses(), 2);
    }

    #[test]
    fn test_backtrack_undoes_inference() {
        // Any word for one variable forces the same word on the other.
        let crossword = Crossword::parse(CROSS, "AAA\nBBB\n").unwrap();
        let mut search = CrosswordSearch::new(&crossword);
        search.enforce_node_consistency();
        let (across, down) = (VarToken(0), VarToken(1));
        let before = search.domains().clone();

        let assignment = Assignment::new();
        assert!(assignment.is_empty());

        let snapshot = search.domains.snapshot();
        search.domains.set_single(across, 0);
        assert_eq!(search.infer(across, &assignment), Some(vec![(down, 0)]));
        assert_eq!(search.domains().len(down), 1);
        search.domains.restore(snapshot);
        assert_eq!(search.domains(), &before);

        // Both branches narrow the down word, then fail on the repeat.
        assert!(search.backtrack(assignment).is_none());
        assert_eq!(search.num_guesses(), 2);
        assert_eq!(search.domains(), &before);
        assert_eq!(search.domains().len(down), 2);
    }

    #[test]
    fn test_solve_unique() {
        let crossword = Crossword::parse(CROSS, "CAT\nDOG\nART\n").unwrap();
        let solution = crossword.solve_unique().expect("unique");
        assert_eq!(&solution[VarToken(0)], "CAT");
        assert_eq!(&solution[VarToken(1)], "ART");
    }
}
