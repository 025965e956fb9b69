pub mod document;
pub mod fonts;
pub mod graphics;
pub mod objects;
pub mod outline;
pub mod reader;
pub mod writer;

pub use document::{DocumentError, FontSelection, PdfDocument};
pub use fonts::{BuiltinFont, FontMetrics, TextEncoding};
pub use graphics::{Gray, ShapeMode};
pub use outline::OutlineEntry;
pub use reader::{PdfReadError, PdfReader};
