use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{PaintMode, Surface};
use crate::error::Error;
use crate::fonts::FontBook;
use crate::model::{FontFamily, Rgb};

/// One recorded drawing call. Text carries the cursor it was drawn at.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    FillColor(Rgb),
    TextColor(Rgb),
    LineColor(Rgb),
    Font { family: FontFamily, size: f32 },
    LineWidth(f32),
    Rect { x: f32, y: f32, w: f32, h: f32, mode: PaintMode },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Image { path: PathBuf, x: f32, y: f32, w: f32, h: f32 },
    Text { x: f32, y: f32, text: String },
    NewPage,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::FillColor(c) => write!(f, "fill-color {} {} {}", c.r, c.g, c.b),
            Primitive::TextColor(c) => write!(f, "text-color {} {} {}", c.r, c.g, c.b),
            Primitive::LineColor(c) => write!(f, "line-color {} {} {}", c.r, c.g, c.b),
            Primitive::Font { family, size } => write!(f, "font {family} {size}"),
            Primitive::LineWidth(w) => write!(f, "line-width {w}"),
            Primitive::Rect { x, y, w, h, mode } => {
                write!(f, "rect {x:.2} {y:.2} {w:.2} {h:.2} {mode:?}")
            }
            Primitive::Line { x1, y1, x2, y2 } => {
                write!(f, "line {x1:.2} {y1:.2} -> {x2:.2} {y2:.2}")
            }
            Primitive::Image { path, x, y, w, h } => {
                write!(f, "image {} {x:.2} {y:.2} {w:.2} {h:.2}", path.display())
            }
            Primitive::Text { x, y, text } => write!(f, "text {x:.2} {y:.2} {text:?}"),
            Primitive::NewPage => f.write_str("new-page"),
        }
    }
}

enum Metrics {
    /// Every char advances `em` times the font size.
    FixedAdvance { em: f32 },
    Fonts(FontBook),
}

/// A surface that writes nothing and remembers every call, in order.
pub struct RecordingSurface {
    metrics: Metrics,
    families: BTreeSet<FontFamily>,
    check_images: bool,
    font: Option<(FontFamily, f32)>,
    cursor: (f32, f32),
    primitives: Vec<Primitive>,
}

impl RecordingSurface {
    /// Measures every char as half an em wide.
    pub fn new() -> Self {
        Self::with_fixed_advance(0.5)
    }

    pub fn with_fixed_advance(em: f32) -> Self {
        Self::from_metrics(Metrics::FixedAdvance { em })
    }

    /// Measures text with the widths of a loaded font book.
    pub fn with_fonts(fonts: FontBook) -> Self {
        Self::from_metrics(Metrics::Fonts(fonts))
    }

    fn from_metrics(metrics: Metrics) -> Self {
        Self {
            metrics,
            families: BTreeSet::from([FontFamily::Regular, FontFamily::Bold]),
            check_images: false,
            font: None,
            cursor: (0.0, 0.0),
            primitives: Vec::new(),
        }
    }

    /// Restrict the families `set_font` accepts.
    pub fn only_families(mut self, families: &[FontFamily]) -> Self {
        self.families = families.iter().copied().collect();
        self
    }

    /// Make `draw_image` fail, as a PDF would, when the file cannot be read
    /// as an image.
    pub fn checking_images(mut self) -> Self {
        self.check_images = true;
        self
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }

    pub fn page_count(&self) -> usize {
        1 + self
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::NewPage))
            .count()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.primitives.push(Primitive::FillColor(color));
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.primitives.push(Primitive::TextColor(color));
    }

    fn set_line_color(&mut self, color: Rgb) {
        self.primitives.push(Primitive::LineColor(color));
    }

    fn set_font(&mut self, family: FontFamily, size: f32) -> Result<(), Error> {
        if !self.families.contains(&family) {
            return Err(Error::UnknownFont(family));
        }
        self.font = Some((family, size));
        self.primitives.push(Primitive::Font { family, size });
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) {
        self.primitives.push(Primitive::LineWidth(width));
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, mode: PaintMode) {
        self.primitives.push(Primitive::Rect { x, y, w, h, mode });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.primitives.push(Primitive::Line { x1, y1, x2, y2 });
    }

    fn draw_image(&mut self, path: &Path, x: f32, y: f32, w: f32, h: f32) -> Result<(), Error> {
        if self.check_images {
            image::image_dimensions(path).map_err(|e| Error::image(path, e))?;
        }
        self.primitives.push(Primitive::Image {
            path: path.to_path_buf(),
            x,
            y,
            w,
            h,
        });
        Ok(())
    }

    fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    fn draw_text(&mut self, text: &str) -> Result<(), Error> {
        if self.font.is_none() {
            return Err(Error::NoFont);
        }
        let (x, y) = self.cursor;
        self.primitives.push(Primitive::Text {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> Result<f32, Error> {
        let (family, size) = self.font.ok_or(Error::NoFont)?;
        match &self.metrics {
            Metrics::FixedAdvance { em } => Ok(text.chars().count() as f32 * size * em),
            Metrics::Fonts(book) => book.text_width(family, size, text),
        }
    }

    fn new_page(&mut self) {
        self.primitives.push(Primitive::NewPage);
    }
}
