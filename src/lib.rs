pub mod content;
mod error;
mod fonts;
pub mod layout;
pub mod model;
mod pdf;
pub mod surface;

pub use error::Error;
pub use fonts::{FontBook, FontConfig};
pub use pdf::PdfSurface;

use std::path::{Path, PathBuf};
use std::time::Instant;

use layout::{Assembler, PaginationPolicy};
use model::PageGeometry;
use surface::trace::{Primitive, RecordingSurface};

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub fonts: FontConfig,
    pub photo: PathBuf,
    pub pagination: PaginationPolicy,
    pub geometry: PageGeometry,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fonts: FontConfig::from_dir(Path::new("fonts/static")),
            photo: PathBuf::from("photo.jpg"),
            pagination: PaginationPolicy::RemainingSpace,
            geometry: PageGeometry::a4(),
        }
    }
}

/// Load fonts and lay the résumé out on a PDF surface, ready to finish.
fn assemble_pdf(options: &RenderOptions) -> Result<PdfSurface, Error> {
    let t0 = Instant::now();

    let fonts = FontBook::load(&options.fonts)?;
    let t_fonts = t0.elapsed();

    let doc = content::resume(&options.photo, &options.geometry);
    let mut surface =
        PdfSurface::new(options.geometry, fonts).with_metadata(&doc.title, &doc.author);
    let report = Assembler::new(options.geometry, options.pagination).assemble(&mut surface, &doc)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: fonts={:.1}ms, layout={:.1}ms, total={:.1}ms ({} page(s))",
        t_fonts.as_secs_f64() * 1000.0,
        (t_total - t_fonts).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        report.pages,
    );

    Ok(surface)
}

/// Lay out the résumé and return the PDF bytes.
pub fn render_resume(options: &RenderOptions) -> Result<Vec<u8>, Error> {
    assemble_pdf(options)?.finish()
}

/// Render the résumé and write it to `output`. Nothing is written on error.
pub fn write_resume_pdf(output: &Path, options: &RenderOptions) -> Result<(), Error> {
    assemble_pdf(options)?.persist(output)?;
    log::info!("PDF written: {}", output.display());
    Ok(())
}

/// The drawing calls the résumé layout makes, measured with the configured fonts.
pub fn trace_resume(options: &RenderOptions) -> Result<Vec<Primitive>, Error> {
    let fonts = FontBook::load(&options.fonts)?;
    let doc = content::resume(&options.photo, &options.geometry);
    let mut surface = RecordingSurface::with_fonts(fonts).checking_images();
    Assembler::new(options.geometry, options.pagination).assemble(&mut surface, &doc)?;
    Ok(surface.into_primitives())
}
