#![allow(dead_code)]

use std::path::PathBuf;

use resume_pdf::model::{
    Alignment, Block, BulletList, Document, FontFamily, Insets, LabeledLine, Margins, PageGeometry, Rgb,
    Section, SectionTitle, Segment, Separator, Stage, Style,
};
use resume_pdf::surface::trace::Primitive;

/// 210 x 297 sheet with 13pt side margins, 10 top and 20 bottom.
pub fn sheet() -> PageGeometry {
    PageGeometry {
        width: 210.0,
        height: 297.0,
        margins: Margins {
            top: 10.0,
            bottom: 20.0,
            left: 13.0,
            right: 13.0,
        },
    }
}

pub fn regular(size: f32, line_height: f32) -> Style {
    Style::new(FontFamily::Regular, size, Rgb::BLACK, line_height)
}

pub fn bold(size: f32, line_height: f32) -> Style {
    Style::new(FontFamily::Bold, size, Rgb::BLACK, line_height)
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

pub fn title(text: &str) -> Block {
    Block::SectionTitle(SectionTitle {
        text: text.to_string(),
        style: bold(14.0, 10.0),
        separator: Separator {
            thin_width: 0.5,
            thick_width: 1.5,
            thick_fraction: 0.25,
            offset: 5.0,
            color: Rgb::BLACK,
        },
        insets: sheet().insets(),
        title_gap: 10.0,
        content_gap: 10.0,
    })
}

/// Glyph-less list, `n` items `spacing` apart.
pub fn plain_list(n: usize, spacing: f32) -> Block {
    Block::BulletList(BulletList {
        items: (1..=n).map(|i| format!("item {i}")).collect(),
        indent: 20.0,
        glyph: None,
        bullet_style: regular(10.0, spacing),
        item_style: regular(10.0, spacing),
        text_gap: 0.0,
        item_spacing: spacing,
        group_spacing: 0.0,
    })
}

pub fn single_line(text: &str, alignment: Alignment, insets: Insets) -> Block {
    Block::LabeledLine(LabeledLine {
        segments: vec![Segment::new(text, regular(12.0, 15.0), alignment)],
        insets,
    })
}

pub fn doc(stages: Vec<(Section, Vec<Block>)>) -> Document {
    Document {
        title: "Test".to_string(),
        author: "Tester".to_string(),
        stages: stages
            .into_iter()
            .map(|(section, blocks)| Stage { section, blocks })
            .collect(),
    }
}

/// Text primitives as (x, y, text).
pub fn texts(primitives: &[Primitive]) -> Vec<(f32, f32, String)> {
    primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Text { x, y, text } => Some((*x, *y, text.clone())),
            _ => None,
        })
        .collect()
}

pub fn lines(primitives: &[Primitive]) -> Vec<(f32, f32, f32, f32)> {
    primitives
        .iter()
        .filter_map(|p| match *p {
            Primitive::Line { x1, y1, x2, y2 } => Some((x1, y1, x2, y2)),
            _ => None,
        })
        .collect()
}

pub fn position_of_text(primitives: &[Primitive], needle: &str) -> usize {
    primitives
        .iter()
        .position(|p| matches!(p, Primitive::Text { text, .. } if text == needle))
        .unwrap_or_else(|| panic!("{needle:?} was never drawn"))
}

/// Unique scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("resume-pdf-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
