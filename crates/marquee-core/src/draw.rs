//! Draw commands and transforms.
//!
//! All rendering reduces to these primitives.

use crate::widget::TextStyle;
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// 2D affine transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Create a scale transform.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            matrix: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Chain transforms: first apply self, then apply other.
    ///
    /// For point p: `a.then(b).apply(p)` == `b.apply(a.apply(p))`
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        // result = other * self
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0] * point.x + m[2] * point.y + m[4],
            m[1] * point.x + m[3] * point.y + m[5],
        )
    }

    /// Transform an axis-aligned rectangle by its two corners.
    #[must_use]
    pub fn apply_rect(&self, rect: &Rect) -> Rect {
        let a = self.apply(rect.origin());
        let b = self.apply(Point::new(rect.right(), rect.bottom()));
        Rect::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    /// Inverse transform, `None` when the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let [a, b, c, d, e, f] = self.matrix;
        let det = a * d - b * c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        Some(Self {
            matrix: [
                d / det,
                -b / det,
                -c / det,
                a / det,
                (c * f - d * e) / det,
                (b * e - a * f) / det,
            ],
        })
    }

    /// Translation component.
    #[must_use]
    pub const fn translation(&self) -> Point {
        Point::new(self.matrix[4], self.matrix[5])
    }

    /// Replace the translation component, keeping scale.
    pub fn set_translation(&mut self, translation: Point) {
        self.matrix[4] = translation.x;
        self.matrix[5] = translation.y;
    }

    /// Horizontal scale factor.
    #[must_use]
    pub const fn scale_x(&self) -> f32 {
        self.matrix[0]
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Replace the current transform
    SetTransform {
        /// New transform
        transform: Transform2D,
    },

    /// Fill a rectangle
    Rect {
        /// Rectangle bounds in local coordinates
        bounds: Rect,
        /// Fill color
        color: Color,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Draw a line
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },

    /// Push a screen-space clip rectangle
    PushClip {
        /// Effective clip bounds (intersected with the parent clip)
        bounds: Rect,
    },

    /// Pop the clip rectangle
    PopClip,
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect { bounds, color }
    }

    /// Text content if this is a text command.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_transform_then_order() {
        let t = Transform2D::translate(10.0, 0.0).then(&Transform2D::scale(2.0, 2.0));
        // translate first, then scale
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));
    }

    #[test]
    fn test_transform_translation_roundtrip() {
        let mut t = Transform2D::scale(3.0, 3.0);
        t.set_translation(Point::new(-5.0, 7.0));
        assert_eq!(t.translation(), Point::new(-5.0, 7.0));
        assert_eq!(t.scale_x(), 3.0);
    }

    #[test]
    fn test_transform_inverse_singular() {
        assert!(Transform2D::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_apply_rect_with_negative_scale() {
        let r = Transform2D::scale(-1.0, 1.0).apply_rect(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(r, Rect::new(-10.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_draw_command_serde() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
        assert_eq!(cmd.text(), None);
    }

    proptest! {
        #[test]
        fn prop_inverse_undoes_transform(
            sx in 0.1f32..10.0,
            tx in -1000.0f32..1000.0,
            ty in -1000.0f32..1000.0,
            px in -1000.0f32..1000.0,
            py in -1000.0f32..1000.0,
        ) {
            let t = Transform2D::translate(tx, ty).then(&Transform2D::scale(sx, sx));
            let inv = t.inverse().unwrap();
            let p = Point::new(px, py);
            let back = inv.apply(t.apply(p));
            prop_assert!(back.approx_eq(&p, 0.05));
        }
    }
}
