//! PDF-backed drawing surface.
//!
//! Drawing calls are recorded per page with the graphics state resolved at
//! call time. Fonts can only be subsetted once every character is known, so
//! nothing is written until [`PdfSurface::finish`].

mod images;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{EmbeddedFont, FontBook, embed_font};
use crate::model::{FontFamily, PageGeometry, Rgb};
use crate::surface::{PaintMode, Surface};

use images::ImageStore;

enum Op {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        mode: PaintMode,
        fill: Rgb,
        stroke: Rgb,
        line_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
    Text {
        x: f32,
        baseline: f32,
        family: FontFamily,
        size: f32,
        color: Rgb,
        text: String,
    },
    Image {
        index: usize,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

pub struct PdfSurface {
    page: PageGeometry,
    fonts: FontBook,
    images: ImageStore,
    pages: Vec<Vec<Op>>,
    used_chars: BTreeMap<FontFamily, BTreeSet<char>>,
    fill: Rgb,
    text_color: Rgb,
    line_color: Rgb,
    line_width: f32,
    font: Option<(FontFamily, f32)>,
    cursor: (f32, f32),
    title: Option<String>,
    author: Option<String>,
}

impl PdfSurface {
    /// A surface with one empty page.
    pub fn new(page: PageGeometry, fonts: FontBook) -> Self {
        Self {
            page,
            fonts,
            images: ImageStore::default(),
            pages: vec![Vec::new()],
            used_chars: BTreeMap::new(),
            fill: Rgb::BLACK,
            text_color: Rgb::BLACK,
            line_color: Rgb::BLACK,
            line_width: 0.5,
            font: None,
            cursor: (page.margins.left, page.margins.top),
            title: None,
            author: None,
        }
    }

    pub fn with_metadata(mut self, title: &str, author: &str) -> Self {
        self.title = Some(title.to_string());
        self.author = Some(author.to_string());
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn push(&mut self, op: Op) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    /// Serialize every page into PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        // Phase 1: embed the fonts that were actually drawn with
        let mut embedded: BTreeMap<FontFamily, EmbeddedFont> = BTreeMap::new();
        for (family, font) in self.fonts.iter() {
            let Some(used) = self.used_chars.get(&family) else {
                continue;
            };
            let pdf_name = format!("F{}", embedded.len() + 1);
            let entry = embed_font(&mut pdf, font, pdf_name, used, &mut alloc)?;
            embedded.insert(family, entry);
        }
        let t_fonts = t0.elapsed();

        // Phase 2: images
        let image_xobjects = self.images.embed(&mut pdf, &mut alloc);
        let t_images = t0.elapsed();

        // Phase 3: content streams
        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, ops) in self.pages.iter().enumerate() {
            let mut content = Content::new();
            for op in ops {
                self.write_op(&mut content, op, &embedded, &image_xobjects);
            }
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page.width, self.page.height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            if !embedded.is_empty() {
                let mut fonts = resources.fonts();
                for font in embedded.values() {
                    fonts.pair(Name(font.pdf_name.as_bytes()), font.font_ref);
                }
            }
            if !image_xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &image_xobjects {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        if self.title.is_some() || self.author.is_some() {
            let info_id = alloc();
            let mut info = pdf.document_info(info_id);
            if let Some(title) = &self.title {
                info.title(TextStr(title.as_str()));
            }
            if let Some(author) = &self.author {
                info.author(TextStr(author.as_str()));
            }
            info.creator(TextStr("resume-pdf"));
        }

        let bytes = pdf.finish();
        log::info!(
            "PDF phases: fonts={:.1}ms, images={:.1}ms, pages={:.1}ms ({} page(s), {} image(s), {} bytes)",
            t_fonts.as_secs_f64() * 1000.0,
            (t_images - t_fonts).as_secs_f64() * 1000.0,
            (t0.elapsed() - t_images).as_secs_f64() * 1000.0,
            n,
            self.images.len(),
            bytes.len(),
        );
        Ok(bytes)
    }

    /// Finish the document and write it to `path`.
    pub fn persist(self, path: &Path) -> Result<(), Error> {
        let bytes = self.finish()?;
        std::fs::write(path, &bytes).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())))
        })
    }

    fn write_op(
        &self,
        content: &mut Content,
        op: &Op,
        fonts: &BTreeMap<FontFamily, EmbeddedFont>,
        images: &[(String, Ref)],
    ) {
        let page_h = self.page.height;
        match op {
            Op::Rect {
                x,
                y,
                w,
                h,
                mode,
                fill,
                stroke,
                line_width,
            } => {
                let bottom = page_h - y - h;
                content.save_state();
                if matches!(mode, PaintMode::Fill | PaintMode::FillStroke) {
                    let [r, g, b] = fill.unit();
                    content.set_fill_rgb(r, g, b);
                    content.rect(*x, bottom, *w, *h);
                    content.fill_nonzero();
                }
                if matches!(mode, PaintMode::Stroke | PaintMode::FillStroke) {
                    let [r, g, b] = stroke.unit();
                    content.set_stroke_rgb(r, g, b);
                    content.set_line_width(*line_width);
                    content.rect(*x, bottom, *w, *h);
                    content.stroke();
                }
                content.restore_state();
            }
            Op::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                let [r, g, b] = color.unit();
                content.save_state();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(*width);
                content.move_to(*x1, page_h - y1);
                content.line_to(*x2, page_h - y2);
                content.stroke();
                content.restore_state();
            }
            Op::Text {
                x,
                baseline,
                family,
                size,
                color,
                text,
            } => {
                let Some(font) = fonts.get(family) else {
                    return;
                };
                let [r, g, b] = color.unit();
                content.save_state();
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(Name(font.pdf_name.as_bytes()), *size);
                content.next_line(*x, page_h - baseline);
                content.show(Str(&font.encode(text)));
                content.end_text();
                content.restore_state();
            }
            Op::Image { index, x, y, w, h } => {
                let Some((name, _)) = images.get(*index) else {
                    return;
                };
                content.save_state();
                content.transform([*w, 0.0, 0.0, *h, *x, page_h - y - h]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }
}

impl Surface for PdfSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_line_color(&mut self, color: Rgb) {
        self.line_color = color;
    }

    fn set_font(&mut self, family: FontFamily, size: f32) -> Result<(), Error> {
        if self.fonts.get(family).is_none() {
            return Err(Error::UnknownFont(family));
        }
        self.font = Some((family, size));
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, mode: PaintMode) {
        self.push(Op::Rect {
            x,
            y,
            w,
            h,
            mode,
            fill: self.fill,
            stroke: self.line_color,
            line_width: self.line_width,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(Op::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.line_color,
            width: self.line_width,
        });
    }

    fn draw_image(&mut self, path: &Path, x: f32, y: f32, w: f32, h: f32) -> Result<(), Error> {
        let index = self.images.load(path)?;
        self.push(Op::Image { index, x, y, w, h });
        Ok(())
    }

    fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    fn draw_text(&mut self, text: &str) -> Result<(), Error> {
        let (family, size) = self.font.ok_or(Error::NoFont)?;
        let font = self.fonts.get(family).ok_or(Error::UnknownFont(family))?;

        let missing: String = text.chars().filter(|&c| !font.covers(c)).collect();
        if !missing.is_empty() {
            log::warn!("{family} font cannot draw {missing:?} in {text:?}");
        }
        let baseline = self.cursor.1 + font.ascent(size);

        self.used_chars
            .entry(family)
            .or_default()
            .extend(text.chars());
        let (x, _) = self.cursor;
        self.push(Op::Text {
            x,
            baseline,
            family,
            size,
            color: self.text_color,
            text: text.to_string(),
        });
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> Result<f32, Error> {
        let (family, size) = self.font.ok_or(Error::NoFont)?;
        self.fonts.text_width(family, size, text)
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = (self.page.margins.left, self.page.margins.top);
    }
}
