use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::Error;
use crate::model::FontFamily;

/// Where the regular and bold faces come from.
#[derive(Clone, Debug, PartialEq)]
pub enum FontConfig {
    /// The PDF standard Helvetica pair. Latin-1 text only; nothing is embedded.
    Builtin,
    TrueType { regular: PathBuf, bold: PathBuf },
}

impl FontConfig {
    pub fn from_dir(dir: &Path) -> Self {
        FontConfig::TrueType {
            regular: dir.join("NotoSansSC-Regular.ttf"),
            bold: dir.join("NotoSansSC-Bold.ttf"),
        }
    }
}

pub(crate) enum FontData {
    Builtin {
        base_font: &'static str,
    },
    TrueType {
        path: PathBuf,
        ps_name: String,
        data: Mmap,
    },
}

pub(crate) struct LoadedFont {
    pub(crate) data: FontData,
    /// WinAnsi widths for chars 32..=255, used by the built-in faces.
    widths_1000: Vec<f32>,
    /// Advance of every char the TrueType cmap covers.
    char_widths_1000: HashMap<char, f32>,
    ascender_ratio: f32,
}

impl LoadedFont {
    fn builtin(family: FontFamily) -> Self {
        let base_font = match family {
            FontFamily::Regular => "Helvetica",
            FontFamily::Bold => "Helvetica-Bold",
        };
        Self {
            data: FontData::Builtin { base_font },
            widths_1000: helvetica_widths(),
            char_widths_1000: HashMap::new(),
            ascender_ratio: 0.718,
        }
    }

    fn load_truetype(path: &Path) -> Result<Self, Error> {
        let t0 = std::time::Instant::now();
        let file = File::open(path).map_err(|e| Error::font_load(path, e))?;
        let data = unsafe { Mmap::map(&file) }.map_err(|e| Error::font_load(path, e))?;
        let face = Face::parse(&data, 0).map_err(|e| Error::font_load(path, e))?;

        let units = face.units_per_em() as f32;
        let mut char_widths_1000 = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    if let Some(ch) = char::from_u32(cp)
                        && let Some(gid) = subtable.glyph_index(cp)
                    {
                        let w = face
                            .glyph_hor_advance(gid)
                            .map(|adv| adv as f32 / units * 1000.0)
                            .unwrap_or(0.0);
                        char_widths_1000.entry(ch).or_insert(w);
                    }
                });
            }
        }
        if char_widths_1000.is_empty() {
            return Err(Error::font_load(path, "font has no Unicode cmap"));
        }

        let ps_name = postscript_name(&face).unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().replace(' ', ""))
                .unwrap_or_else(|| "Embedded".to_string())
        });
        let ascender_ratio = face.ascender() as f32 / units;

        log::debug!(
            "load_font: {} ({} chars) → {:.1}ms",
            path.display(),
            char_widths_1000.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );

        Ok(Self {
            data: FontData::TrueType {
                path: path.to_path_buf(),
                ps_name,
                data,
            },
            widths_1000: Vec::new(),
            char_widths_1000,
            ascender_ratio,
        })
    }

    pub(crate) fn is_builtin(&self) -> bool {
        matches!(self.data, FontData::Builtin { .. })
    }

    pub(crate) fn covers(&self, ch: char) -> bool {
        if self.is_builtin() {
            char_to_winansi(ch) >= 32
        } else {
            self.char_widths_1000.contains_key(&ch)
        }
    }

    fn char_width_1000(&self, ch: char) -> f32 {
        if self.is_builtin() {
            let byte = char_to_winansi(ch);
            if byte >= 32 {
                self.widths_1000[(byte - 32) as usize]
            } else {
                0.0
            }
        } else {
            self.char_widths_1000.get(&ch).copied().unwrap_or(0.0)
        }
    }

    pub(crate) fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * size / 1000.0)
            .sum()
    }

    /// Distance from the top of a text cell to its baseline.
    pub(crate) fn ascent(&self, size: f32) -> f32 {
        size * self.ascender_ratio
    }
}

fn postscript_name(face: &Face) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME && name.is_unicode())
        .and_then(|name| name.to_string())
        .map(|s| s.replace(' ', ""))
}

/// The faces loaded for one run, held read-only until the PDF is finished.
pub struct FontBook {
    fonts: BTreeMap<FontFamily, LoadedFont>,
}

impl FontBook {
    pub fn builtin() -> Self {
        let fonts = [FontFamily::Regular, FontFamily::Bold]
            .into_iter()
            .map(|family| (family, LoadedFont::builtin(family)))
            .collect();
        Self { fonts }
    }

    pub fn load(config: &FontConfig) -> Result<Self, Error> {
        match config {
            FontConfig::Builtin => Ok(Self::builtin()),
            FontConfig::TrueType { regular, bold } => {
                let mut fonts = BTreeMap::new();
                fonts.insert(FontFamily::Regular, LoadedFont::load_truetype(regular)?);
                fonts.insert(FontFamily::Bold, LoadedFont::load_truetype(bold)?);
                Ok(Self { fonts })
            }
        }
    }

    pub(crate) fn get(&self, family: FontFamily) -> Option<&LoadedFont> {
        self.fonts.get(&family)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (FontFamily, &LoadedFont)> {
        self.fonts.iter().map(|(family, font)| (*family, font))
    }

    /// Width of `text` in `family` at `size`.
    pub fn text_width(&self, family: FontFamily, size: f32, text: &str) -> Result<f32, Error> {
        self.get(family)
            .map(|font| font.text_width(text, size))
            .ok_or(Error::UnknownFont(family))
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes, dropping unmappable chars.
fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b >= 32)
        .collect()
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi chars 32..=255.
fn helvetica_widths() -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            149 => 350.0,                         // bullet
            _ => 556.0,
        })
        .collect()
}

/// A font written into the PDF, ready to encode text for content streams.
pub(crate) struct EmbeddedFont {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    char_to_gid: Option<HashMap<char, u16>>,
}

impl EmbeddedFont {
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

/// Write `font` into `pdf`, subsetting TrueType data down to `used_chars`.
pub(crate) fn embed_font(
    pdf: &mut Pdf,
    font: &LoadedFont,
    pdf_name: String,
    used_chars: &BTreeSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<EmbeddedFont, Error> {
    let font_ref = alloc();
    match &font.data {
        FontData::Builtin { base_font } => {
            pdf.type1_font(font_ref)
                .base_font(Name(base_font.as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            Ok(EmbeddedFont {
                pdf_name,
                font_ref,
                char_to_gid: None,
            })
        }
        FontData::TrueType {
            path,
            ps_name,
            data,
        } => {
            let char_to_gid =
                embed_truetype(pdf, font_ref, ps_name, data, used_chars, alloc)
                    .map_err(|reason| Error::font_load(path, reason))?;
            Ok(EmbeddedFont {
                pdf_name,
                font_ref,
                char_to_gid: Some(char_to_gid),
            })
        }
    }
}

fn identity_system_info() -> pdf_writer::types::SystemInfo<'static> {
    pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    }
}

/// Embed a TrueType/OpenType font as a CIDFont (Type0 composite) with Identity-H encoding.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    ps_name: &str,
    font_data: &[u8],
    used_chars: &BTreeSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<HashMap<char, u16>, String> {
    let face = Face::parse(font_data, 0).map_err(|e| e.to_string())?;

    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = HashMap::new();
    let mut gid_widths: Vec<(u16, f32)> = Vec::new();
    for &ch in used_chars {
        if let Some(gid) = face.glyph_index(ch) {
            let new_gid = remapper.remap(gid.0);
            char_to_gid.insert(ch, new_gid);
            let w = face
                .glyph_hor_advance(gid)
                .map(|adv| adv as f32 / units * 1000.0)
                .unwrap_or(0.0);
            gid_widths.push((new_gid, w));
        } else {
            log::warn!("{ps_name} has no glyph for {ch:?}");
        }
    }
    gid_widths.sort_by_key(|&(gid, _)| gid);
    gid_widths.dedup_by_key(|&mut (gid, _)| gid);

    let subset_data = subsetter::subset(font_data, 0, &remapper).unwrap_or_else(|e| {
        log::warn!("Font subsetting failed for {ps_name}: {e}; embedding full font");
        font_data.to_vec()
    });

    let data_ref = alloc();
    let descriptor_ref = alloc();
    let cid_font_ref = alloc();
    let tounicode_ref = alloc();

    let data_len = i32::try_from(subset_data.len()).map_err(|e| e.to_string())?;
    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(identity_system_info());
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let cmap_name = format!("{ps_name}-UTF16");
    let mut cmap = pdf_writer::types::UnicodeCmap::new(Name(cmap_name.as_bytes()), identity_system_info());
    for (&ch, &new_gid) in &char_to_gid {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    Ok(char_to_gid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winansi_keeps_bullet_and_drops_cjk() {
        assert_eq!(to_winansi_bytes("• a"), vec![0x95, b' ', b'a']);
        assert_eq!(to_winansi_bytes("简历"), Vec::<u8>::new());
    }

    #[test]
    fn gids_are_big_endian_pairs() {
        let map = HashMap::from([('a', 0x0102u16)]);
        assert_eq!(encode_as_gids("ab", &map), vec![0x01, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn builtin_width_scales_with_size() {
        let book = FontBook::builtin();
        let at_10 = book.text_width(FontFamily::Regular, 10.0, "Acme").unwrap();
        let at_20 = book.text_width(FontFamily::Regular, 20.0, "Acme").unwrap();
        assert!(at_10 > 0.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-4);
    }

    #[test]
    fn missing_truetype_file_names_the_path() {
        let config = FontConfig::TrueType {
            regular: PathBuf::from("no/such/Regular.ttf"),
            bold: PathBuf::from("no/such/Bold.ttf"),
        };
        let err = FontBook::load(&config).err().expect("missing font must fail");
        assert!(err.is_setup());
        assert!(err.to_string().contains("no/such/Regular.ttf"));
    }
}
