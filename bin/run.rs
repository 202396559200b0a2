//! Fill a crossword from the command line.
//!
//! ```text
//! run structure.txt words.txt [output.txt | output.png]
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossword_solver::Crossword;

#[derive(Debug, Parser)]
#[command(name = "run", about = "Fill a crossword grid from a word list")]
struct Args {
    /// Grid structure: `_` for fillable cells, anything else for blocked ones.
    structure: PathBuf,

    /// Word list, one word per line.
    words: PathBuf,

    /// Also write the filled grid to this file: an image for `.png`,
    /// `.jpg` and the like, text otherwise.
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let crossword = Crossword::from_files(&args.structure, &args.words)
        .context("failed to load crossword")?;
    log::info!(
        "{} variables, {} words",
        crossword.variables().len(),
        crossword.words().len()
    );

    match crossword.solve_any() {
        None => println!("No solution."),
        Some(solution) => {
            print!("{}", solution);
            if let Some(output) = &args.output {
                solution
                    .save(output)
                    .with_context(|| format!("failed to save {}", output.display()))?;
            }
        }
    }

    Ok(())
}
