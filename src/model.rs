use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFamily {
    Regular,
    Bold,
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFamily::Regular => f.write_str("regular"),
            FontFamily::Bold => f.write_str("bold"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 0.0..=1.0 for PDF color operators.
    pub fn unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub family: FontFamily,
    pub size: f32,
    pub color: Rgb,
    /// Cursor advance after a line set in this style, in points.
    pub line_height: f32,
}

impl Style {
    pub const fn new(family: FontFamily, size: f32, color: Rgb, line_height: f32) -> Self {
        Self {
            family,
            size,
            color,
            line_height,
        }
    }

    pub const fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Horizontal insets measured from the left and right page edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl PageGeometry {
    /// A4 in points.
    pub const fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margins: Margins {
                top: 10.0,
                bottom: 20.0,
                left: 13.0,
                right: 13.0,
            },
        }
    }

    pub fn insets(&self) -> Insets {
        Insets {
            left: self.margins.left,
            right: self.margins.right,
        }
    }

    /// Lowest Y content may reach on a page.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margins.bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
    pub alignment: Alignment,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            style,
            alignment,
        }
    }
}

/// Text fragments sharing one baseline, each placed by its own alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledLine {
    pub segments: Vec<Segment>,
    pub insets: Insets,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BulletList {
    pub items: Vec<String>,
    pub indent: f32,
    /// `None` renders the items as plain stacked lines.
    pub glyph: Option<String>,
    pub bullet_style: Style,
    pub item_style: Style,
    pub text_gap: f32,
    pub item_spacing: f32,
    pub group_spacing: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separator {
    pub thin_width: f32,
    pub thick_width: f32,
    /// Share of the thin rule covered by the thick one, starting at its left end.
    pub thick_fraction: f32,
    /// Distance below the cursor at which both rules are drawn.
    pub offset: f32,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionTitle {
    pub text: String,
    pub style: Style,
    pub separator: Separator,
    pub insets: Insets,
    pub title_gap: f32,
    pub content_gap: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub title: String,
    pub band_width: f32,
    pub band_height: f32,
    pub band_color: Rgb,
    pub background_color: Rgb,
    pub text_style: Style,
    pub text_padding: f32,
    /// Fixed vertical offset of the title inside the band.
    pub text_offset: f32,
    pub clearance: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PortraitLine {
    pub text: String,
    pub style: Style,
    pub advance: f32,
}

/// Photo on the left with a column of personal details next to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Portrait {
    pub photo: PathBuf,
    pub photo_x: f32,
    pub photo_width: f32,
    pub photo_height: f32,
    pub column_gap: f32,
    pub lines: Vec<PortraitLine>,
    pub trailing_gap: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExperienceLook {
    pub period: Style,
    pub company: Style,
    pub role: Style,
    pub insets: Insets,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Experience {
    pub period: String,
    pub company: String,
    pub role: String,
    pub look: ExperienceLook,
    pub duties: BulletList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectLook {
    pub heading: Style,
    pub body: Style,
    pub insets: Insets,
    pub body_indent: f32,
    pub description_label: &'static str,
    pub keywords_label: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub title: String,
    pub period: String,
    pub description: String,
    pub keywords: String,
    pub look: ProjectLook,
    pub duties: BulletList,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Banner(Banner),
    Portrait(Portrait),
    LabeledLine(LabeledLine),
    BulletList(BulletList),
    SectionTitle(SectionTitle),
    Experience(Experience),
    Project(Project),
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Banner(_) => "banner",
            Block::Portrait(_) => "portrait",
            Block::LabeledLine(_) => "labeled-line",
            Block::BulletList(_) => "bullet-list",
            Block::SectionTitle(_) => "section-title",
            Block::Experience(_) => "experience",
            Block::Project(_) => "project",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Header,
    BasicInfo,
    WorkExperience,
    Projects,
    Skills,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::BasicInfo => "basic-info",
            Section::WorkExperience => "work-experience",
            Section::Projects => "projects",
            Section::Skills => "skills",
        };
        f.write_str(name)
    }
}

pub struct Stage {
    pub section: Section,
    pub blocks: Vec<Block>,
}

pub struct Document {
    pub title: String,
    pub author: String,
    pub stages: Vec<Stage>,
}

impl Document {
    /// Every block paired with the section it belongs to, in drawing order.
    pub fn blocks(&self) -> impl Iterator<Item = (Section, &Block)> {
        self.stages
            .iter()
            .flat_map(|stage| stage.blocks.iter().map(move |b| (stage.section, b)))
    }
}
