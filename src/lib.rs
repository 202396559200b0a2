//! This crate fills crossword grids with words from a vocabulary.
//! The grid is treated as a constraint satisfaction problem: each slot
//! is a variable, the vocabulary is its domain, and crossing slots must
//! agree on their shared letter.

pub mod assignment;
pub mod crossword;

mod consistency;
mod domains;
mod error;
mod render;
mod search;

pub use assignment::{Assignment, Solution};
pub use crossword::{Crossword, Direction, Variable};
pub use domains::Domains;
pub use error::Error;
pub use search::CrosswordSearch;

/// A crossword variable token.
///
/// Tokens index the variable list of the [`Crossword`] they were
/// created from, in its fixed variable order.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarToken(pub(crate) usize);

impl VarToken {
    /// The position of the variable in the crossword's variable order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The index of a word in the crossword's (sorted) vocabulary.
pub type WordIdx = usize;

/// A result while loading a crossword.
pub type Result<T> = std::result::Result<T, Error>;
