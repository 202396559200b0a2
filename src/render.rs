//! Text and image rendering of a filled crossword.

use ab_glyph::{FontRef, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::assignment::Solution;
use crate::{Error, Result};

const BLOCK: char = '█';

const FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Side of one grid cell in the image, in pixels.
pub const CELL_SIZE: u32 = 100;
const CELL_BORDER: u32 = 2;
const FONT_SIZE: f32 = 80.0;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

impl Solution<'_> {
    /// Lay the words out on the grid. Cells no word covers are None.
    pub fn letter_grid(&self) -> Vec<Vec<Option<char>>> {
        let crossword = self.crossword();
        let mut letters = vec![vec![None; crossword.width()]; crossword.height()];

        for (var, word) in self.iter() {
            for ((row, col), c) in var.cells().zip(word.chars()) {
                letters[row][col] = Some(c);
            }
        }

        letters
    }

    /// Draw the grid: blocked cells black, fillable cells white with
    /// their letter centred.
    pub fn to_image(&self) -> Result<RgbImage> {
        let crossword = self.crossword();
        let font = FontRef::try_from_slice(FONT)?;
        let scale = PxScale::from(FONT_SIZE);
        let interior = CELL_SIZE - 2 * CELL_BORDER;

        let mut img = RgbImage::from_pixel(
            crossword.width() as u32 * CELL_SIZE,
            crossword.height() as u32 * CELL_SIZE,
            BLACK,
        );

        for (row, line) in self.letter_grid().iter().enumerate() {
            for (col, letter) in line.iter().enumerate() {
                if !crossword.is_fillable(row, col) {
                    continue;
                }

                let left = col as u32 * CELL_SIZE + CELL_BORDER;
                let top = row as u32 * CELL_SIZE + CELL_BORDER;
                let cell = Rect::at(left as i32, top as i32).of_size(interior, interior);
                draw_filled_rect_mut(&mut img, cell, WHITE);

                if let Some(c) = letter {
                    let text = c.to_string();
                    let (w, h) = text_size(scale, &font, &text);
                    let x = left as i32 + (interior as i32 - w as i32) / 2;
                    let y = top as i32 + (interior as i32 - h as i32) / 2 - 10;
                    draw_text_mut(&mut img, BLACK, x, y, scale, &font, &text);
                }
            }
        }

        Ok(img)
    }

    /// Write the grid to a file.
    ///
    /// Paths with an image extension (`.png`, `.jpg`, ...) get the
    /// drawing from [`Solution::to_image`]; anything else gets the text
    /// rendering.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if ImageFormat::from_path(path).is_ok() {
            return self.to_image()?.save(path).map_err(|source| Error::Image {
                path: path.to_path_buf(),
                source,
            });
        }

        fs::write(path, self.to_string()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let crossword = self.crossword();
        let letters = self.letter_grid();

        for (row, line) in letters.iter().enumerate() {
            for (col, letter) in line.iter().enumerate() {
                if crossword.is_fillable(row, col) {
                    write!(f, "{}", letter.unwrap_or(' '))?;
                } else {
                    write!(f, "{}", BLOCK)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
