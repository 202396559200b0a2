//! The crossword's geometry and vocabulary.

use bit_set::BitSet;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::ops;
use std::path::Path;

use crate::{Error, Result, VarToken, WordIdx};

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Across,
    Down,
}

/// A slot in the grid that holds one word.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

/// The crossword to be filled.
///
/// Holds the grid, the variables found in it, the overlaps between
/// crossing variables and the vocabulary. Immutable once parsed.
pub struct Crossword {
    width: usize,
    height: usize,

    // Row-major mask of fillable cells.
    structure: Vec<bool>,

    // Across variables first, then down, each in row-major order of
    // their first cell.
    variables: Vec<Variable>,

    // For each ordered pair of crossing variables, the offsets of the
    // shared cell in the first and second variable.
    overlaps: HashMap<(VarToken, VarToken), (usize, usize)>,

    // The variables that each variable crosses.
    neighbors: Vec<BitSet>,

    // Sorted and de-duplicated.
    words: Vec<String>,

    // The letters of each word, for indexing by overlap offset.
    letters: Vec<Vec<char>>,
}

/*--------------------------------------------------------------*/

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Variable {
            row,
            col,
            direction,
            length,
        }
    }

    /// The `(row, col)` cells covered by the variable, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |k| match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.col, direction, self.length
        )
    }
}

/*--------------------------------------------------------------*/

impl Crossword {
    /// Parse a crossword from a grid structure and a word list.
    ///
    /// In the structure, `_` marks a fillable cell and any other
    /// character a blocked one. The word list holds one word per line.
    ///
    /// # Examples
    ///
    /// ```
    /// let crossword = crossword_solver::Crossword::parse(
    ///     "___\n#_#\n#_#\n",
    ///     "cat\ndog\nart\n",
    /// ).unwrap();
    ///
    /// assert_eq!(crossword.variables().len(), 2);
    /// assert_eq!(crossword.words(), ["ART", "CAT", "DOG"]);
    /// ```
    pub fn parse(structure: &str, words: &str) -> Result<Self> {
        let mut rows: Vec<&str> = structure
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        while rows.last().map_or(false, |row| row.is_empty()) {
            rows.pop();
        }
        while rows.first().map_or(false, |row| row.is_empty()) {
            rows.remove(0);
        }

        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(Error::EmptyStructure);
        }

        let mut mask = vec![false; width * height];
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                mask[row * width + col] = c == '_';
            }
        }

        let words = words
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_uppercase)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self::new(width, height, mask, words))
    }

    /// Read the structure and word list files, then parse them.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(structure: P, words: Q) -> Result<Self> {
        let structure = read(structure.as_ref())?;
        let words = read(words.as_ref())?;
        Self::parse(&structure, &words)
    }

    fn new(width: usize, height: usize, structure: Vec<bool>, words: Vec<String>) -> Self {
        let mut crossword = Crossword {
            width,
            height,
            structure,
            variables: Vec::new(),
            overlaps: HashMap::new(),
            neighbors: Vec::new(),
            letters: words.iter().map(|w| w.chars().collect()).collect(),
            words,
        };

        crossword.variables = crossword.find_variables();
        crossword.init_overlaps();
        crossword
    }

    /// Find the runs of at least two fillable cells.
    fn find_variables(&self) -> Vec<Variable> {
        let mut variables = Vec::new();

        for &direction in &[Direction::Across, Direction::Down] {
            for row in 0..self.height {
                for col in 0..self.width {
                    if !self.is_fillable(row, col) {
                        continue;
                    }

                    let starts = match direction {
                        Direction::Across => col == 0 || !self.is_fillable(row, col - 1),
                        Direction::Down => row == 0 || !self.is_fillable(row - 1, col),
                    };
                    if !starts {
                        continue;
                    }

                    let length = (0..)
                        .take_while(|&k| match direction {
                            Direction::Across => self.is_fillable(row, col + k),
                            Direction::Down => self.is_fillable(row + k, col),
                        })
                        .count();

                    if length > 1 {
                        variables.push(Variable::new(row, col, direction, length));
                    }
                }
            }
        }

        variables
    }

    /// Record the shared cell of every pair of crossing variables.
    fn init_overlaps(&mut self) {
        // Each cell is covered by at most one across and one down variable.
        let mut cells: HashMap<(usize, usize), Vec<(VarToken, usize)>> = HashMap::new();
        for (idx, var) in self.variables.iter().enumerate() {
            for (k, cell) in var.cells().enumerate() {
                cells.entry(cell).or_default().push((VarToken(idx), k));
            }
        }

        let mut neighbors = vec![BitSet::new(); self.variables.len()];
        for occupants in cells.values() {
            for &(x, ix) in occupants {
                for &(y, iy) in occupants {
                    if x != y {
                        self.overlaps.insert((x, y), (ix, iy));
                        neighbors[x.0].insert(y.0);
                    }
                }
            }
        }

        self.neighbors = neighbors;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a cell can hold a letter. Cells outside the grid
    /// are blocked.
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.structure[row * self.width + col]
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Get an iterator over the tokens of all variables, in variable order.
    pub fn tokens(&self) -> impl Iterator<Item = VarToken> {
        (0..self.variables.len()).map(VarToken)
    }

    /// Look up the token of a variable.
    pub fn token(&self, var: &Variable) -> Option<VarToken> {
        self.variables.iter().position(|v| v == var).map(VarToken)
    }

    /// The offsets `(ix, iy)` at which the words of `x` and `y` must
    /// agree, or None if they do not cross.
    pub fn overlap(&self, x: VarToken, y: VarToken) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Get an iterator over the variables crossing `var`.
    pub fn neighbors(&self, var: VarToken) -> impl Iterator<Item = VarToken> + '_ {
        self.neighbors[var.0].iter().map(VarToken)
    }

    /// The number of variables crossing `var`.
    pub fn degree(&self, var: VarToken) -> usize {
        self.neighbors[var.0].len()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, idx: WordIdx) -> &str {
        &self.words[idx]
    }

    /// The number of letters in a word.
    pub fn word_len(&self, idx: WordIdx) -> usize {
        self.letters[idx].len()
    }

    /// The letter at offset `k` of a word, or None past its end.
    pub fn letter(&self, idx: WordIdx, k: usize) -> Option<char> {
        self.letters[idx].get(k).copied()
    }
}

impl ops::Index<VarToken> for Crossword {
    type Output = Variable;

    fn index(&self, var: VarToken) -> &Variable {
        &self.variables[var.0]
    }
}

impl fmt::Debug for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Crossword={{")?;
        for (idx, var) in self.variables.iter().enumerate() {
            writeln!(f)?;
            write!(f, "  var {}: {}", idx, var)?;
        }
        write!(f, "}}")
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
