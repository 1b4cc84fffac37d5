use std::fmt;
use std::path::PathBuf;

use crate::model::FontFamily;

#[derive(Debug)]
pub enum Error {
    /// A font file could not be read or parsed.
    FontLoad { path: PathBuf, reason: String },
    /// `set_font` named a family the surface never loaded.
    UnknownFont(FontFamily),
    /// An image could not be read or decoded.
    Image { path: PathBuf, reason: String },
    /// Text was measured or drawn before any font was selected.
    NoFont,
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn font_load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Error::FontLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Error::Image {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Setup errors come from missing or broken assets, not from layout.
    pub fn is_setup(&self) -> bool {
        matches!(self, Error::FontLoad { .. } | Error::Image { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FontLoad { path, reason } => {
                write!(f, "failed to load font {}: {}", path.display(), reason)
            }
            Error::UnknownFont(family) => write!(f, "font family {family} was not loaded"),
            Error::Image { path, reason } => {
                write!(f, "failed to load image {}: {}", path.display(), reason)
            }
            Error::NoFont => write!(f, "no font selected before drawing or measuring text"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
