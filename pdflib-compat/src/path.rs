//! Deferred path construction.
//!
//! The legacy API describes geometry first (`rect`, `moveto` +
//! `lineto`) and paints it later (`fill`, `stroke`, `clip`). The
//! drawing surface is immediate-mode, so the description is held
//! here until a terminal operation turns it into a single call.

use log::debug;
use pdf_core::ShapeMode;

use crate::error::PathError;
use crate::options::PathOptions;
use crate::surface::DrawingSurface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// The one shape waiting for a terminal operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingShape {
    /// Origin plus extent, as passed to `rect`.
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Segment { from: Point, to: Point },
}

impl PendingShape {
    fn kind(&self) -> &'static str {
        match self {
            PendingShape::Rectangle { .. } => "rectangle",
            PendingShape::Segment { .. } => "segment",
        }
    }
}

/// Pending shape and current point of one page.
///
/// Describing a shape replaces the previous one. Terminal
/// operations leave it in place unless
/// [`PathOptions::clear_after_paint`] is set.
#[derive(Debug, Clone, Default)]
pub struct PathState {
    pending: Option<PendingShape>,
    current_point: Option<Point>,
    options: PathOptions,
}

impl PathState {
    pub fn new(options: PathOptions) -> Self {
        PathState {
            options,
            ..Default::default()
        }
    }

    pub fn pending_shape(&self) -> Option<PendingShape> {
        self.pending
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    pub fn options(&self) -> PathOptions {
        self.options
    }

    /// Forget the pending shape and the current point.
    pub fn reset(&mut self) {
        self.pending = None;
        self.current_point = None;
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.pending = Some(PendingShape::Rectangle {
            x,
            y,
            width,
            height,
        });
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.current_point = Some(Point::new(x, y));
    }

    /// Describe a segment from the current point. The current point
    /// itself does not move.
    pub fn line_to(&mut self, x: f64, y: f64) -> Result<(), PathError> {
        let from = self.current_point.ok_or(PathError::NoCurrentPoint)?;
        self.pending = Some(PendingShape::Segment {
            from,
            to: Point::new(x, y),
        });
        Ok(())
    }

    /// Fill the pending rectangle.
    pub fn fill<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: Option<&mut S>,
    ) -> Result<(), PathError> {
        let surface = surface.ok_or(PathError::NoActiveContext)?;
        match self.pending_or_err()? {
            PendingShape::Rectangle {
                x,
                y,
                width,
                height,
            } => surface.draw_rectangle(x, y, x + width, y + height, ShapeMode::Fill)?,
            shape => return Err(unsupported("fill", shape)),
        }
        self.painted();
        Ok(())
    }

    /// Stroke the pending rectangle or segment.
    pub fn stroke<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: Option<&mut S>,
    ) -> Result<(), PathError> {
        let surface = surface.ok_or(PathError::NoActiveContext)?;
        match self.pending_or_err()? {
            PendingShape::Rectangle {
                x,
                y,
                width,
                height,
            } => surface.draw_rectangle(x, y, x + width, y + height, ShapeMode::Stroke)?,
            PendingShape::Segment { from, to } => {
                surface.draw_line(from.x, from.y, to.x, to.y)?
            }
        }
        self.painted();
        Ok(())
    }

    /// Clip to the pending rectangle.
    pub fn clip<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: Option<&mut S>,
    ) -> Result<(), PathError> {
        let surface = surface.ok_or(PathError::NoActiveContext)?;
        match self.pending_or_err()? {
            PendingShape::Rectangle {
                x,
                y,
                width,
                height,
            } => surface.clip_rectangle(x, y, x + width, y + height)?,
            shape => return Err(unsupported("clip", shape)),
        }
        self.painted();
        Ok(())
    }

    fn pending_or_err(&self) -> Result<PendingShape, PathError> {
        self.pending.ok_or(PathError::NoPendingShape)
    }

    fn painted(&mut self) {
        if self.options.clear_after_paint {
            debug!("clearing painted shape");
            self.pending = None;
        }
    }
}

fn unsupported(op: &'static str, shape: PendingShape) -> PathError {
    PathError::UnsupportedShape {
        op,
        shape: shape.kind(),
    }
}
