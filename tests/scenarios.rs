//! Small crosswords with known fills.

use crossword_solver::{Crossword, CrosswordSearch, Direction, Solution, Variable};

const CROSS: &str = "\
___
#_#
#_#
";

fn word<'a>(
    solution: &Solution<'a>,
    row: usize,
    col: usize,
    direction: Direction,
    length: usize,
) -> &'a str {
    solution
        .get(&Variable::new(row, col, direction, length))
        .expect("assigned")
}

#[test]
fn crossing_pair() {
    let crossword = Crossword::parse(CROSS, "CAT\nDOG\nART\n").unwrap();
    let mut search = CrosswordSearch::new(&crossword);
    let solution = search.solve_any().expect("solution");

    assert_eq!(word(&solution, 0, 0, Direction::Across, 3), "CAT");
    assert_eq!(word(&solution, 0, 1, Direction::Down, 3), "ART");
    print!("{}", solution);
    println!("crossing_pair: {} guesses", search.num_guesses());
}

#[test]
fn crossing_pair_without_shared_letter() {
    let crossword = Crossword::parse(CROSS, "CAT\nDOG\n").unwrap();
    assert!(crossword.step().is_none());
    assert!(crossword.solve_any().is_none());
    assert!(crossword.solve_all().is_empty());
}

#[test]
fn isolated_variable() {
    let crossword = Crossword::parse("____\n", "CAT\nFISH\nBIRDS\n").unwrap();

    let search = crossword.step().expect("consistent");
    let var = crossword.tokens().next().unwrap();
    assert_eq!(search.domains().single(var), Some(2));

    let solution = crossword.solve_unique().expect("unique");
    assert_eq!(word(&solution, 0, 0, Direction::Across, 4), "FISH");
    assert_eq!(solution.assignment().len(), 1);
    assert_eq!(solution.assignment().get(var), Some(2));
}

#[test]
fn separate_variables_take_distinct_words() {
    let crossword = Crossword::parse("___\n###\n___\n", "CAT\nDOG\n").unwrap();
    let solution = crossword.solve_any().expect("solution");

    let top = word(&solution, 0, 0, Direction::Across, 3);
    let bottom = word(&solution, 2, 0, Direction::Across, 3);
    assert_ne!(top, bottom);
    assert_eq!(crossword.solve_all().len(), 2);

    let crossword = Crossword::parse("___\n###\n___\n", "CAT\n").unwrap();
    assert!(crossword.solve_any().is_none());
}

#[test]
fn shared_candidate_goes_to_one_variable() {
    // The top word is forced to CAT by its crossing word, so the bottom
    // word must give up CAT even though it is its first candidate.
    let crossword = Crossword::parse("___\n#_#\n###\n___\n", "CAT\nDOG\nAX\n").unwrap();
    let solution = crossword.solve_unique().expect("unique");

    assert_eq!(word(&solution, 0, 0, Direction::Across, 3), "CAT");
    assert_eq!(word(&solution, 0, 1, Direction::Down, 2), "AX");
    assert_eq!(word(&solution, 3, 0, Direction::Across, 3), "DOG");
}

#[test]
fn structure0() {
    let crossword = Crossword::parse(
        include_str!("../data/structure0.txt"),
        include_str!("../data/words0.txt"),
    )
    .unwrap();
    let mut search = CrosswordSearch::new(&crossword);
    let solution = search.solve_any().expect("solution");

    assert_eq!(
        solution.to_string(),
        "\
█SIX█
█E██F
█V██I
█E██V
█NINE
"
    );
    assert_eq!(solution.iter().count(), 4);
    println!("structure0: {} guesses", search.num_guesses());
}
