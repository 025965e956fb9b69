use crate::document::format_coord;

/// Grayscale color for PDF graphics operations.
///
/// 0.0 is black, 1.0 is white. Out-of-range levels are clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gray(f64);

impl Gray {
    pub const BLACK: Gray = Gray(0.0);
    pub const WHITE: Gray = Gray(1.0);

    pub fn new(level: f64) -> Self {
        if level.is_nan() {
            return Gray::BLACK;
        }
        Gray(level.clamp(0.0, 1.0))
    }

    pub fn level(&self) -> f64 {
        self.0
    }

    /// The `g` operator setting this as the nonstroking color.
    pub(crate) fn fill_op(&self) -> String {
        format!("{} g\n", format_coord(self.0))
    }
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMode {
    /// Fill the interior with the fill color (`f`).
    Fill,
    /// Stroke the outline with the stroke color (`S`).
    Stroke,
}

impl ShapeMode {
    pub(crate) fn operator(&self) -> &'static str {
        match self {
            ShapeMode::Fill => "f",
            ShapeMode::Stroke => "S",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_is_clamped() {
        assert_eq!(Gray::new(1.7).level(), 1.0);
        assert_eq!(Gray::new(-0.2).level(), 0.0);
        assert_eq!(Gray::new(f64::NAN), Gray::BLACK);
    }

    #[test]
    fn fill_operator_text() {
        assert_eq!(Gray::new(0.5).fill_op(), "0.5 g\n");
        assert_eq!(Gray::WHITE.fill_op(), "1 g\n");
    }
}
