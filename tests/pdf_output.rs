mod common;

use std::path::{Path, PathBuf};

use common::{scratch_dir, sheet};
use resume_pdf::layout::PaginationPolicy;
use resume_pdf::model::{FontFamily, PageGeometry};
use resume_pdf::surface::Surface;
use resume_pdf::surface::trace::Primitive;
use resume_pdf::{
    Error, FontBook, FontConfig, PdfSurface, RenderOptions, render_resume, trace_resume,
    write_resume_pdf,
};

fn write_photo(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img = image::RgbImage::from_fn(33, 44, |x, y| image::Rgb([(x * 7) as u8, (y * 5) as u8, 128]));
    img.save(&path).expect("write test photo");
    path
}

fn builtin_options(photo: PathBuf) -> RenderOptions {
    RenderOptions {
        fonts: FontConfig::Builtin,
        photo,
        pagination: PaginationPolicy::RemainingSpace,
        geometry: PageGeometry::a4(),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn renders_two_pages_with_builtin_fonts() {
    let dir = scratch_dir("builtin");
    let photo = write_photo(&dir, "photo.png");

    let bytes = render_resume(&builtin_options(photo)).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert!(contains(&bytes, b"/Helvetica"));
    assert!(contains(&bytes, b"/Helvetica-Bold"));
    assert!(contains(&bytes, b"/Count 2"));
    assert!(contains(&bytes, b"/FlateDecode"));
}

#[test]
fn jpeg_photo_is_passed_through() {
    let dir = scratch_dir("jpeg");
    let photo = write_photo(&dir, "photo.jpg");

    let bytes = render_resume(&builtin_options(photo)).unwrap();
    assert!(contains(&bytes, b"/DCTDecode"));
}

#[test]
fn rendering_twice_gives_the_same_bytes() {
    let dir = scratch_dir("repeat");
    let options = builtin_options(write_photo(&dir, "photo.png"));
    assert_eq!(render_resume(&options).unwrap(), render_resume(&options).unwrap());
}

#[test]
fn missing_photo_is_a_setup_error() {
    let options = builtin_options(PathBuf::from("does/not/exist.jpg"));
    let err = render_resume(&options).unwrap_err();
    match &err {
        Error::Image { path, .. } => assert_eq!(path, Path::new("does/not/exist.jpg")),
        other => panic!("expected image error, got {other}"),
    }
    assert!(err.is_setup());
}

#[test]
fn missing_font_names_the_file() {
    let mut options = builtin_options(PathBuf::from("photo.jpg"));
    options.fonts = FontConfig::from_dir(Path::new("no-such-fonts"));
    let err = render_resume(&options).unwrap_err();
    match &err {
        Error::FontLoad { path, .. } => {
            assert_eq!(path, &Path::new("no-such-fonts").join("NotoSansSC-Regular.ttf"))
        }
        other => panic!("expected font error, got {other}"),
    }
    assert!(err.to_string().contains("NotoSansSC-Regular.ttf"));
}

#[test]
fn write_failure_leaves_no_file() {
    let dir = scratch_dir("unwritable");
    let photo = write_photo(&dir, "photo.png");
    let output = dir.join("missing-dir").join("out.pdf");

    let err = write_resume_pdf(&output, &builtin_options(photo)).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("out.pdf"));
    assert!(!output.exists());
}

#[test]
fn writes_the_pdf_to_disk() {
    let dir = scratch_dir("write");
    let photo = write_photo(&dir, "photo.png");
    let output = dir.join("final_resume.pdf");

    write_resume_pdf(&output, &builtin_options(photo)).unwrap();
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn surface_counts_pages_and_persists() {
    let mut surface = PdfSurface::new(sheet(), FontBook::builtin());
    surface.set_font(FontFamily::Regular, 12.0).unwrap();
    surface.draw_text("first").unwrap();
    surface.new_page();
    assert_eq!(surface.cursor(), (13.0, 10.0));
    surface.draw_text("second").unwrap();
    assert_eq!(surface.page_count(), 2);

    let dir = scratch_dir("persist");
    let bad = dir.join("nope").join("x.pdf");
    assert!(matches!(surface.persist(&bad), Err(Error::Io(_))));
}

#[test]
fn trace_uses_real_font_widths() {
    let dir = scratch_dir("trace");
    let options = builtin_options(write_photo(&dir, "photo.jpg"));
    let prims = trace_resume(&options).unwrap();

    let role = "Systems Integration Engineer";
    let width = FontBook::builtin()
        .text_width(FontFamily::Regular, 12.0, role)
        .unwrap();
    let x = prims
        .iter()
        .find_map(|p| match p {
            Primitive::Text { x, text, .. } if text == role => Some(*x),
            _ => None,
        })
        .unwrap();
    assert!((x - (595.28 - 15.0 - width)).abs() < 1e-3);
    assert_eq!(prims.iter().filter(|p| **p == Primitive::NewPage).count(), 1);
}

#[test]
fn trace_fails_on_a_missing_photo() {
    let options = builtin_options(PathBuf::from("does/not/exist.jpg"));
    let err = trace_resume(&options).unwrap_err();
    match &err {
        Error::Image { path, .. } => assert_eq!(path, Path::new("does/not/exist.jpg")),
        other => panic!("expected image error, got {other}"),
    }
    assert!(err.is_setup());
}

#[test]
fn trace_fails_on_a_photo_that_is_not_an_image() {
    let dir = scratch_dir("not-an-image");
    let photo = dir.join("photo.jpg");
    std::fs::write(&photo, b"not a jpeg").unwrap();
    let err = trace_resume(&builtin_options(photo)).unwrap_err();
    assert!(matches!(err, Error::Image { .. }));
}
