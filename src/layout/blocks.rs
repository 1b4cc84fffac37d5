use crate::error::Error;
use crate::model::{
    Alignment, Banner, Block, BulletList, Experience, Insets, LabeledLine, PageGeometry, Portrait,
    Project, SectionTitle, Segment, Style,
};
use crate::surface::{PaintMode, Surface};

use super::flow::Cursor;

/// X of a text fragment `measured_width` wide placed by `alignment`.
/// Fragments wider than the space they get overlap their neighbours.
pub fn compute_x(alignment: Alignment, measured_width: f32, page_width: f32, insets: Insets) -> f32 {
    match alignment {
        Alignment::Left => insets.left,
        Alignment::Center => (page_width - measured_width) / 2.0,
        Alignment::Right => page_width - insets.right - measured_width,
    }
}

/// End of the thick separator rule; always a prefix of the thin rule.
pub fn thick_rule_end(start_x: f32, end_x: f32, fraction: f32) -> f32 {
    start_x + fraction.clamp(0.0, 1.0) * (end_x - start_x)
}

/// Vertical space `block` takes, used to decide page breaks before drawing it.
pub fn block_height(block: &Block) -> f32 {
    match block {
        Block::Banner(b) => (b.text_offset + b.clearance).max(b.band_height),
        Block::Portrait(p) => portrait_advance(p),
        Block::LabeledLine(line) => line_advance(line),
        Block::BulletList(list) => list_height(list),
        Block::SectionTitle(t) => t.title_gap + t.content_gap,
        Block::Experience(e) => line_advance(&experience_line(e)) + list_height(&e.duties),
        Block::Project(p) => {
            project_lines(p).iter().map(line_advance).sum::<f32>() + list_height(&p.duties)
        }
    }
}

pub fn render_block<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut Cursor,
    page: &PageGeometry,
    block: &Block,
) -> Result<(), Error> {
    match block {
        Block::Banner(b) => render_banner(surface, cursor, page, b),
        Block::Portrait(p) => render_portrait(surface, cursor, page, p),
        Block::LabeledLine(line) => render_labeled_line(surface, cursor, page, line),
        Block::BulletList(list) => render_bullet_list(surface, cursor, page, list),
        Block::SectionTitle(t) => render_section_title(surface, cursor, page, t),
        Block::Experience(e) => {
            render_labeled_line(surface, cursor, page, &experience_line(e))?;
            render_bullet_list(surface, cursor, page, &e.duties)
        }
        Block::Project(p) => {
            for line in &project_lines(p) {
                render_labeled_line(surface, cursor, page, line)?;
            }
            render_bullet_list(surface, cursor, page, &p.duties)
        }
    }
}

fn line_advance(line: &LabeledLine) -> f32 {
    line.segments
        .iter()
        .map(|s| s.style.line_height)
        .fold(0.0f32, f32::max)
}

fn list_height(list: &BulletList) -> f32 {
    list.items.len() as f32 * list.item_spacing + list.group_spacing
}

fn portrait_advance(p: &Portrait) -> f32 {
    let column: f32 = p.lines.iter().map(|l| l.advance).sum();
    p.photo_height.max(column) + p.trailing_gap
}

fn experience_line(e: &Experience) -> LabeledLine {
    LabeledLine {
        segments: vec![
            Segment::new(e.period.as_str(), e.look.period, Alignment::Left),
            Segment::new(e.company.as_str(), e.look.company, Alignment::Center),
            Segment::new(e.role.as_str(), e.look.role, Alignment::Right),
        ],
        insets: e.look.insets,
    }
}

/// Heading, description and keyword lines, in drawing order.
fn project_lines(p: &Project) -> [LabeledLine; 3] {
    let look = &p.look;
    let body_insets = Insets {
        left: look.body_indent,
        right: look.insets.right,
    };
    let body_line = |label: &str, text: &str| LabeledLine {
        segments: vec![Segment::new(format!("{label}{text}"), look.body, Alignment::Left)],
        insets: body_insets,
    };
    [
        LabeledLine {
            segments: vec![
                Segment::new(p.title.as_str(), look.heading, Alignment::Left),
                Segment::new(p.period.as_str(), look.heading, Alignment::Right),
            ],
            insets: look.insets,
        },
        body_line(look.description_label, &p.description),
        body_line(look.keywords_label, &p.keywords),
    ]
}

fn apply_style<S: Surface + ?Sized>(surface: &mut S, style: &Style) -> Result<(), Error> {
    surface.set_font(style.family, style.size)?;
    surface.set_text_color(style.color);
    Ok(())
}

fn text_at<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut Cursor,
    x: f32,
    y: f32,
    text: &str,
) -> Result<(), Error> {
    cursor.set_position(x, y);
    surface.set_cursor(x, y);
    surface.draw_text(text)
}

/// Return the cursor to the left margin, `advance` below the line at `line_y`.
fn end_line(cursor: &mut Cursor, page: &PageGeometry, line_y: f32, advance: f32) {
    cursor.set_position(page.margins.left, line_y);
    cursor.move_down(advance);
}

fn render_banner<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut Cursor,
    page: &PageGeometry,
    banner: &Banner,
) -> Result<(), Error> {
    let top = cursor.current_y();

    surface.set_fill_color(banner.band_color);
    surface.draw_rect(0.0, top, banner.band_width, banner.band_height, PaintMode::Fill);
    surface.set_fill_color(banner.background_color);
    surface.draw_rect(
        banner.band_width,
        top,
        page.width - banner.band_width,
        banner.band_height,
        PaintMode::Fill,
    );

    // Centered by a fixed offset rather than font metrics.
    apply_style(surface, &banner.text_style)?;
    text_at(
        surface,
        cursor,
        banner.band_width + banner.text_padding,
        top + banner.text_offset,
        &banner.title,
    )?;

    end_line(cursor, page, top, banner.text_offset + banner.clearance);
    Ok(())
}

fn render_portrait<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut Cursor,
    page: &PageGeometry,
    portrait: &Portrait,
) -> Result<(), Error> {
    let top = cursor.current_y();
    surface.draw_image(
        &portrait.photo,
        portrait.photo_x,
        top,
        portrait.photo_width,
        portrait.photo_height,
    )?;

    let column_x = portrait.photo_x + portrait.photo_width + portrait.column_gap;
    let mut y = top;
    for line in &portrait.lines {
        apply_style(surface, &line.style)?;
        text_at(surface, cursor, column_x, y, &line.text)?;
        y += line.advance;
    }

    end_line(cursor, page, top, portrait_advance(portrait));
    Ok(())
}

fn render_labeled_line<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut Cursor,
    page: &PageGeometry,
    line: &LabeledLine,
) -> Result<(), Error> {
    // Drawing text never moves Y, so every segment shares this one.
    let y = cursor.current_y();
    for segment in &line.segments {
        // The font must be active before measuring.
        apply_style(surface, &segment.style)?;
        let width = match segment.alignment {
            Alignment::Left => 0.0,
            Alignment::Center | Alignment::Right => surface.measure_text_width(&segment.text)?,
        };
        let x = compute_x(segment.alignment, width, page.width, line.insets);
        text_at(surface, cursor, x, y, &segment.text)?;
    }
    end_line(cursor, page, y, line_advance(line));
    Ok(())
}

fn render_bullet_list<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut Cursor,
    page: &PageGeometry,
    list: &BulletList,
) -> Result<(), Error> {
    if list.glyph.is_none() {
        apply_style(surface, &list.item_style)?;
    }
    for item in &list.items {
        let y = cursor.current_y();
        match &list.glyph {
            Some(glyph) => {
                apply_style(surface, &list.bullet_style)?;
                text_at(surface, cursor, list.indent, y, glyph)?;
                apply_style(surface, &list.item_style)?;
                text_at(surface, cursor, list.indent + list.text_gap, y, item)?;
            }
            None => text_at(surface, cursor, list.indent, y, item)?,
        }
        end_line(cursor, page, y, list.item_spacing);
    }
    cursor.move_down(list.group_spacing);
    Ok(())
}

fn render_section_title<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut Cursor,
    page: &PageGeometry,
    title: &SectionTitle,
) -> Result<(), Error> {
    let y = cursor.current_y();
    apply_style(surface, &title.style)?;
    text_at(surface, cursor, title.insets.left, y, &title.text)?;
    end_line(cursor, page, y, title.title_gap);

    let sep = &title.separator;
    let rule_y = cursor.current_y() + sep.offset;
    let start_x = title.insets.left;
    let end_x = page.width - title.insets.right;

    surface.set_line_color(sep.color);
    surface.set_line_width(sep.thin_width);
    surface.draw_line(start_x, rule_y, end_x, rule_y);
    surface.set_line_width(sep.thick_width);
    surface.draw_line(
        start_x,
        rule_y,
        thick_rule_end(start_x, end_x, sep.thick_fraction),
        rule_y,
    );
    surface.set_line_width(sep.thin_width);

    cursor.move_down(title.content_gap);
    Ok(())
}
