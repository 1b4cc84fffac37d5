use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pdf_writer::{Filter, Pdf, Ref};

use crate::error::Error;

enum Pixels {
    /// JPEG bytes passed through with DCTDecode.
    Jpeg { data: Vec<u8>, gray: bool },
    Raster { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

struct LoadedImage {
    pixels: Pixels,
    width: u32,
    height: u32,
}

/// Images decoded once per path and embedded once, however often they are drawn.
#[derive(Default)]
pub(super) struct ImageStore {
    images: Vec<LoadedImage>,
    by_path: HashMap<PathBuf, usize>,
}

impl ImageStore {
    /// Index of the image at `path`, decoding it on first use.
    pub(super) fn load(&mut self, path: &Path) -> Result<usize, Error> {
        if let Some(&idx) = self.by_path.get(path) {
            return Ok(idx);
        }
        let t0 = std::time::Instant::now();
        let image = decode(path)?;
        log::debug!(
            "load_image: {} {}x{} → {:.1}ms",
            path.display(),
            image.width,
            image.height,
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        let idx = self.images.len();
        self.images.push(image);
        self.by_path.insert(path.to_path_buf(), idx);
        Ok(idx)
    }

    pub(super) fn len(&self) -> usize {
        self.images.len()
    }

    /// Write every image as an XObject; returns (resource name, ref) by index.
    pub(super) fn embed(&self, pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> Vec<(String, Ref)> {
        let mut xobjects = Vec::with_capacity(self.images.len());
        for (idx, img) in self.images.iter().enumerate() {
            let xobj_ref = alloc();
            let (w, h) = (img.width as i32, img.height as i32);
            match &img.pixels {
                Pixels::Jpeg { data, gray } => {
                    let mut xobj = pdf.image_xobject(xobj_ref, data);
                    xobj.filter(Filter::DctDecode);
                    xobj.width(w);
                    xobj.height(h);
                    if *gray {
                        xobj.color_space().device_gray();
                    } else {
                        xobj.color_space().device_rgb();
                    }
                    xobj.bits_per_component(8);
                }
                Pixels::Raster { rgb, alpha } => {
                    let smask_ref = alpha.as_ref().map(|alpha| {
                        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                        let mask_ref = alloc();
                        let mut mask = pdf.image_xobject(mask_ref, &compressed);
                        mask.filter(Filter::FlateDecode);
                        mask.width(w);
                        mask.height(h);
                        mask.color_space().device_gray();
                        mask.bits_per_component(8);
                        mask_ref
                    });

                    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(rgb, 6);
                    let mut xobj = pdf.image_xobject(xobj_ref, &compressed);
                    xobj.filter(Filter::FlateDecode);
                    xobj.width(w);
                    xobj.height(h);
                    xobj.color_space().device_rgb();
                    xobj.bits_per_component(8);
                    if let Some(mask_ref) = smask_ref {
                        xobj.s_mask(mask_ref);
                    }
                }
            }
            xobjects.push((format!("Im{}", idx + 1), xobj_ref));
        }
        xobjects
    }
}

fn decode(path: &Path) -> Result<LoadedImage, Error> {
    let bytes = std::fs::read(path).map_err(|e| Error::image(path, e))?;
    let format = image::guess_format(&bytes).map_err(|e| Error::image(path, e))?;
    let decoded =
        image::load_from_memory_with_format(&bytes, format).map_err(|e| Error::image(path, e))?;
    let (width, height) = (decoded.width(), decoded.height());

    let pixels = if format == image::ImageFormat::Jpeg {
        Pixels::Jpeg {
            gray: decoded.color().channel_count() < 3,
            data: bytes,
        }
    } else {
        let rgba = decoded.to_rgba8();
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
        let rgb: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());
        Pixels::Raster { rgb, alpha }
    };

    Ok(LoadedImage {
        pixels,
        width,
        height,
    })
}
