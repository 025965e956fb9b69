//! PDFlib-style procedural API on top of `pdf-core`.
//!
//! Every legacy call returns a `Result`; use [`SoftFail::succeeded`]
//! where the old boolean convention is wanted.

pub mod error;
pub mod options;
pub mod path;
pub mod pdf;
pub mod surface;

pub use error::{PathError, PdfError, SoftFail};
pub use options::{PathOptions, PdfOptions};
pub use path::{PathState, PendingShape, Point};
pub use pdf::Pdf;
pub use surface::DrawingSurface;
