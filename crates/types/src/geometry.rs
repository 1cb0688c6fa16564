use serde::{Deserialize, Serialize};

/// A rectangle in points, origin at the top-left with y growing downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Same size, shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// A rectangle of `size` centered horizontally and resting on the bottom edge of `self`.
    pub fn place_bottom_centered(&self, size: Size) -> Rect {
        Rect::new(
            self.x + (self.width - size.width) / 2.0,
            self.bottom() - size.height,
            size.width,
            size.height,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Largest size with the aspect ratio `aspect` (width / height) that fits in `self`.
    pub fn fit_aspect(self, aspect: f32) -> Size {
        if aspect <= 0.0 || !aspect.is_finite() || self.height <= 0.0 {
            return Size::zero();
        }
        if self.width / self.height > aspect {
            Size::new(self.height * aspect, self.height)
        } else {
            Size::new(self.width, self.width / aspect)
        }
    }
}

/// Intrinsic raster dimensions of a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height, or `None` for a degenerate size.
    pub fn aspect(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}
