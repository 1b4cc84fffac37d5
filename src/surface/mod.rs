//! Absolute-position drawing primitives the layout engine draws through.
//!
//! Coordinates are points with the origin at the top-left corner of the page
//! and Y growing downwards. Text is placed as a cell whose top edge sits at
//! the cursor.

pub mod trace;

use std::path::Path;

use crate::error::Error;
use crate::model::{FontFamily, Rgb};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintMode {
    Fill,
    Stroke,
    FillStroke,
}

pub trait Surface {
    fn set_fill_color(&mut self, color: Rgb);
    fn set_text_color(&mut self, color: Rgb);
    fn set_line_color(&mut self, color: Rgb);
    /// Fails with [`Error::UnknownFont`] when the family was never loaded.
    fn set_font(&mut self, family: FontFamily, size: f32) -> Result<(), Error>;
    fn set_line_width(&mut self, width: f32);
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, mode: PaintMode);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn draw_image(&mut self, path: &Path, x: f32, y: f32, w: f32, h: f32) -> Result<(), Error>;
    fn set_cursor(&mut self, x: f32, y: f32);
    fn cursor(&self) -> (f32, f32);
    /// Draws `text` at the cursor with the current font and text color.
    /// The cursor does not move.
    fn draw_text(&mut self, text: &str) -> Result<(), Error>;
    /// Width of `text` under the current font and size.
    fn measure_text_width(&self, text: &str) -> Result<f32, Error>;
    fn new_page(&mut self);
}
