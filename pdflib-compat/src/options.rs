/// Behavior switches for [`PathState`](crate::PathState).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Forget the pending shape once `fill`, `stroke` or `clip` has
    /// painted it. Off by default: legacy callers repeat a terminal
    /// operation to redraw the same shape.
    pub clear_after_paint: bool,
}

impl PathOptions {
    pub fn clear_after_paint(mut self, enabled: bool) -> Self {
        self.clear_after_paint = enabled;
        self
    }
}

/// Settings for a [`Pdf`](crate::Pdf) facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PdfOptions {
    /// FlateDecode page content streams.
    pub compress: bool,
    /// Applied to the path state of every new page.
    pub path: PathOptions,
}

impl PdfOptions {
    pub fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    pub fn path(mut self, path: PathOptions) -> Self {
        self.path = path;
        self
    }
}
