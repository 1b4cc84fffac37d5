mod common;

use std::path::PathBuf;

use common::{approx, bold, lines, regular, sheet, texts, title};
use resume_pdf::layout::{Cursor, block_height, render_block};
use resume_pdf::model::{
    Banner, Block, BulletList, Insets, Portrait, PortraitLine, Project, ProjectLook, Rgb,
};
use resume_pdf::surface::PaintMode;
use resume_pdf::surface::trace::{Primitive, RecordingSurface};

const MUTED: Rgb = Rgb::new(100, 100, 100);

fn render(block: &Block) -> (Vec<Primitive>, Cursor) {
    let page = sheet();
    let mut surface = RecordingSurface::new();
    let mut cursor = Cursor::new(page.margins.left, page.margins.top);
    render_block(&mut surface, &mut cursor, &page, block).unwrap();
    (surface.into_primitives(), cursor)
}

fn duty_list(items: &[&str]) -> BulletList {
    BulletList {
        items: items.iter().map(|s| s.to_string()).collect(),
        indent: 50.0,
        glyph: Some("•".to_string()),
        bullet_style: regular(11.0, 13.0),
        item_style: regular(11.0, 13.0),
        text_gap: 12.0,
        item_spacing: 13.0,
        group_spacing: 10.0,
    }
}

#[test]
fn banner_fills_two_bands_across_the_page() {
    let banner = Block::Banner(Banner {
        title: "Curriculum Vitae".to_string(),
        band_width: 20.0,
        band_height: 20.0,
        band_color: Rgb::new(0, 112, 192),
        background_color: Rgb::BLACK,
        text_style: bold(18.0, 20.0).with_color(Rgb::WHITE),
        text_padding: 5.0,
        text_offset: 2.0,
        clearance: 30.0,
    });
    let (prims, cursor) = render(&banner);

    let rects: Vec<_> = prims
        .iter()
        .filter_map(|p| match *p {
            Primitive::Rect { x, y, w, h, mode } => Some((x, y, w, h, mode)),
            _ => None,
        })
        .collect();
    assert_eq!(
        rects,
        vec![
            (0.0, 10.0, 20.0, 20.0, PaintMode::Fill),
            (20.0, 10.0, 190.0, 20.0, PaintMode::Fill),
        ]
    );
    assert!(prims.contains(&Primitive::FillColor(Rgb::new(0, 112, 192))));
    assert!(prims.contains(&Primitive::TextColor(Rgb::WHITE)));

    assert_eq!(texts(&prims), vec![(25.0, 12.0, "Curriculum Vitae".to_string())]);
    assert_eq!(cursor.current_y(), 10.0 + 32.0);
    assert_eq!(block_height(&banner), 32.0);
}

#[test]
fn portrait_column_sits_right_of_the_photo() {
    let advances = [22.0, 16.0, 20.0, 25.0];
    let portrait = Block::Portrait(Portrait {
        photo: PathBuf::from("photo.jpg"),
        photo_x: 10.0,
        photo_width: 66.0,
        photo_height: 88.0,
        column_gap: 10.0,
        lines: advances
            .iter()
            .enumerate()
            .map(|(i, &advance)| PortraitLine {
                text: format!("line {i}"),
                style: regular(10.0, advance),
                advance,
            })
            .collect(),
        trailing_gap: 10.0,
    });
    let (prims, cursor) = render(&portrait);

    assert_eq!(
        prims[0],
        Primitive::Image {
            path: PathBuf::from("photo.jpg"),
            x: 10.0,
            y: 10.0,
            w: 66.0,
            h: 88.0,
        }
    );
    let ys: Vec<f32> = texts(&prims).iter().map(|t| t.1).collect();
    assert_eq!(ys, vec![10.0, 32.0, 48.0, 68.0]);
    assert!(texts(&prims).iter().all(|t| t.0 == 86.0));

    // The photo is taller than the column, so it sets the advance.
    assert_eq!(cursor.current_y(), 10.0 + 88.0 + 10.0);
}

#[test]
fn bullets_step_down_by_item_spacing() {
    let list = Block::BulletList(duty_list(&["one", "two", "three", "four"]));
    let (prims, cursor) = render(&list);
    let drawn = texts(&prims);

    assert_eq!(drawn.len(), 8);
    for (i, pair) in drawn.chunks(2).enumerate() {
        let y = 10.0 + i as f32 * 13.0;
        assert_eq!(pair[0], (50.0, y, "•".to_string()));
        assert_eq!(pair[1].0, 62.0);
        assert_eq!(pair[1].1, y);
    }
    assert_eq!(cursor.current_y(), 10.0 + 4.0 * 13.0 + 10.0);
}

#[test]
fn plain_list_selects_its_font_once() {
    let (prims, _) = render(&common::plain_list(5, 12.0));
    let fonts = prims
        .iter()
        .filter(|p| matches!(p, Primitive::Font { .. }))
        .count();
    assert_eq!(fonts, 1);
    assert!(texts(&prims).iter().all(|t| t.0 == 20.0));
}

#[test]
fn empty_list_only_adds_group_spacing() {
    let (prims, cursor) = render(&Block::BulletList(duty_list(&[])));
    assert!(texts(&prims).is_empty());
    assert_eq!(cursor.current_y(), 10.0 + 10.0);
}

#[test]
fn section_title_draws_thin_then_thick_rule() {
    let (prims, cursor) = render(&title("Skills"));

    assert_eq!(texts(&prims), vec![(13.0, 10.0, "Skills".to_string())]);
    let rules = lines(&prims);
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0], (13.0, 25.0, 197.0, 25.0));
    assert_eq!(rules[1], (13.0, 25.0, 13.0 + 184.0 / 4.0, 25.0));

    let widths: Vec<f32> = prims
        .iter()
        .filter_map(|p| match *p {
            Primitive::LineWidth(w) => Some(w),
            _ => None,
        })
        .collect();
    assert_eq!(widths, vec![0.5, 1.5, 0.5]);
    assert_eq!(cursor.current_y(), 30.0);
}

#[test]
fn project_body_follows_heading_and_mutes_duties() {
    let mut duties = duty_list(&["measure", "ship"]);
    duties.item_style = regular(10.0, 10.0).with_color(MUTED);
    duties.item_spacing = 10.0;
    duties.group_spacing = 8.0;
    let project = Block::Project(Project {
        title: "Tracing".to_string(),
        period: "2024".to_string(),
        description: "in-house".to_string(),
        keywords: "Go".to_string(),
        look: ProjectLook {
            heading: bold(12.0, 14.0),
            body: regular(10.0, 12.0),
            insets: Insets {
                left: 18.0,
                right: 15.0,
            },
            body_indent: 33.0,
            description_label: "Description: ",
            keywords_label: "Keywords: ",
        },
        duties,
    });
    let (prims, cursor) = render(&project);
    let drawn = texts(&prims);

    assert_eq!(drawn[0], (18.0, 10.0, "Tracing".to_string()));
    // "2024" is 4 chars at 12pt.
    assert!(approx(drawn[1].0, 210.0 - 15.0 - 24.0));
    assert_eq!(drawn[1].1, 10.0);
    assert_eq!(drawn[2], (33.0, 24.0, "Description: in-house".to_string()));
    assert_eq!(drawn[3], (33.0, 36.0, "Keywords: Go".to_string()));
    assert_eq!(drawn[4].1, 48.0);

    let keyword_at = common::position_of_text(&prims, "Keywords: Go");
    let duty_at = common::position_of_text(&prims, "measure");
    assert_eq!(prims[keyword_at - 1], Primitive::TextColor(Rgb::BLACK));
    assert_eq!(prims[duty_at - 1], Primitive::TextColor(MUTED));

    assert_eq!(cursor.current_y(), 10.0 + 14.0 + 12.0 + 12.0 + 2.0 * 10.0 + 8.0);
    assert_eq!(block_height(&project), 14.0 + 24.0 + 28.0);
}
