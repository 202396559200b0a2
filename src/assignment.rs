//! Partial and finished assignments of words to variables.

use std::collections::BTreeMap;
use std::ops;

use crate::crossword::{Crossword, Variable};
use crate::{VarToken, WordIdx};

/// A partial mapping from variables to the words chosen for them.
///
/// Search frames clone the assignment when branching, so sibling
/// branches never see each other's choices.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    words: BTreeMap<VarToken, WordIdx>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: VarToken) -> Option<WordIdx> {
        self.words.get(&var).copied()
    }

    pub fn insert(&mut self, var: VarToken, word: WordIdx) {
        self.words.insert(var, word);
    }

    pub fn contains(&self, var: VarToken) -> bool {
        self.words.contains_key(&var)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether every one of `num_vars` variables is assigned.
    pub fn is_complete(&self, num_vars: usize) -> bool {
        self.words.len() == num_vars
    }

    /// Get an iterator over the assigned variables and their words, in
    /// variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VarToken, WordIdx)> + '_ {
        self.words.iter().map(|(&var, &word)| (var, word))
    }
}

impl Extend<(VarToken, WordIdx)> for Assignment {
    fn extend<I: IntoIterator<Item = (VarToken, WordIdx)>>(&mut self, iter: I) {
        self.words.extend(iter);
    }
}

/// A dictionary mapping crossword variables to the words filling them.
#[derive(Clone, Debug)]
pub struct Solution<'a> {
    crossword: &'a Crossword,
    assignment: Assignment,
}

impl<'a> Solution<'a> {
    pub(crate) fn new(crossword: &'a Crossword, assignment: Assignment) -> Self {
        Solution {
            crossword,
            assignment,
        }
    }

    pub fn crossword(&self) -> &'a Crossword {
        self.crossword
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Get the word filling a variable.
    pub fn get(&self, var: &Variable) -> Option<&'a str> {
        let tok = self.crossword.token(var)?;
        self.assignment
            .get(tok)
            .map(|word| self.crossword.word(word))
    }

    /// Get an iterator over the variables and the words filling them.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Variable, &'a str)> + '_ {
        let crossword = self.crossword;
        self.assignment
            .iter()
            .map(move |(var, word)| (&crossword[var], crossword.word(word)))
    }
}

impl ops::Index<VarToken> for Solution<'_> {
    type Output = str;

    /// Get the word filling a variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable has not been assigned.
    fn index(&self, var: VarToken) -> &str {
        match self.assignment.get(var) {
            Some(word) => self.crossword.word(word),
            None => panic!("unassigned"),
        }
    }
}
