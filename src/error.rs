use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a crossword or saving its fill.
///
/// Failing to fill a grid is not an error; the solver reports it as an
/// absent solution.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write image {}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid font")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("structure has no cells")]
    EmptyStructure,
}
