use std::fmt::Display;
use std::io;

use log::debug;
use pdf_core::DocumentError;
use thiserror::Error;

/// Failures of the deferred path protocol.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("no page is open")]
    NoActiveContext,
    #[error("no shape has been described")]
    NoPendingShape,
    #[error("{op} cannot be applied to a {shape}")]
    UnsupportedShape {
        op: &'static str,
        shape: &'static str,
    },
    #[error("lineto called without a current point")]
    NoCurrentPoint,
    #[error(transparent)]
    Surface(#[from] DocumentError),
}

/// Failures of the procedural facade.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("no page is open")]
    NoActiveContext,
    #[error("unknown font {0:?}")]
    UnknownFont(String),
    #[error("unknown encoding {0:?}")]
    UnknownEncoding(String),
    #[error("no font has been set on the current page")]
    NoFont,
    #[error("document has already been closed")]
    DocumentClosed,
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Boolean view of a result, for callers ported from the
/// `true`/`false` return convention.
pub trait SoftFail {
    /// `true` on success. Failures are logged at debug level and
    /// otherwise dropped.
    fn succeeded(self) -> bool;
}

impl<T, E: Display> SoftFail for Result<T, E> {
    fn succeeded(self) -> bool {
        match self {
            Ok(_) => true,
            Err(e) => {
                debug!("soft failure: {}", e);
                false
            }
        }
    }
}
