use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Viewport zoom bounds. Gesture updates that would leave this range clamp.
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 5.0;

/// Row-major 2x3 affine transform.
///
/// Composition is right-multiplied, so a sequence of `translate`/`scale`/
/// `rotate_deg` calls applies to mapped points in reverse call order
/// (last call acts on the point first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    m: [[f32; 3]; 2],
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    };

    fn concat(&mut self, other: [[f32; 3]; 2]) {
        let a = self.m;
        let b = other;
        self.m = [
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
                a[0][0] * b[0][2] + a[0][1] * b[1][2] + a[0][2],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
                a[1][0] * b[0][2] + a[1][1] * b[1][2] + a[1][2],
            ],
        ];
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat([[1.0, 0.0, tx], [0.0, 1.0, ty]]);
    }

    pub fn scale(&mut self, s: f32) {
        self.concat([[s, 0.0, 0.0], [0.0, s, 0.0]]);
    }

    pub fn rotate_deg(&mut self, degrees: f32) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.concat([[cos, -sin, 0.0], [sin, cos, 0.0]]);
    }

    pub fn transform_point(&self, p: Pos2) -> Pos2 {
        Pos2::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2],
        )
    }
}

/// Compose the matrix for one pinch/rotate gesture increment around its
/// centroid: centroid compensation, then scale, then rotation, then pan.
/// The order keeps the gesture pivot visually anchored at the centroid.
pub fn gesture_matrix(centroid: Pos2, pan: Vec2, zoom: f32, rotation_deg: f32) -> Affine {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();

    let mut matrix = Affine::IDENTITY;
    matrix.translate(
        centroid.x * (1.0 - zoom) + (1.0 - cos) + centroid.y * sin,
        centroid.y * (1.0 - zoom) + (1.0 - cos) - centroid.x * sin,
    );
    matrix.scale(zoom);
    matrix.rotate_deg(rotation_deg);
    matrix.translate(pan.x, pan.y);
    matrix
}

/// Whole-canvas view transform. Cosmetic: it never touches stroke geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub zoom: f32,
    pub rotation_deg: f32,
    pub pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        rotation_deg: 0.0,
        pan: Vec2::ZERO,
    };

    /// Fold one gesture increment into the view. Zoom clamps to [1, 5].
    pub fn apply_gesture(&mut self, pan: Vec2, zoom: f32, rotation_deg: f32) {
        self.zoom = (self.zoom * zoom).clamp(MIN_ZOOM, MAX_ZOOM);
        self.rotation_deg += rotation_deg;
        self.pan += pan;
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Linear interpolation, used to tween the view back to identity.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            zoom: self.zoom + (other.zoom - self.zoom) * t,
            rotation_deg: self.rotation_deg + (other.rotation_deg - self.rotation_deg) * t,
            pan: self.pan + (other.pan - self.pan) * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn identity_maps_points_unchanged() {
        let p = pos2(12.5, -3.0);
        assert_eq!(Affine::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn pure_pan_translates() {
        let m = gesture_matrix(pos2(0.0, 0.0), Vec2::new(10.0, -5.0), 1.0, 0.0);
        let p = m.transform_point(pos2(1.0, 2.0));
        assert!((p.x - 11.0).abs() < 1e-4);
        assert!((p.y - -3.0).abs() < 1e-4);
    }

    #[test]
    fn pure_zoom_anchors_centroid() {
        let centroid = pos2(250.0, 250.0);
        let m = gesture_matrix(centroid, Vec2::ZERO, 2.0, 0.0);
        let p = m.transform_point(centroid);
        assert!((p.x - centroid.x).abs() < 1e-3);
        assert!((p.y - centroid.y).abs() < 1e-3);
    }

    #[test]
    fn view_zoom_clamps_to_range() {
        let mut view = ViewTransform::IDENTITY;
        for _ in 0..20 {
            view.apply_gesture(Vec2::ZERO, 1.5, 0.0);
        }
        assert_eq!(view.zoom, MAX_ZOOM);
        for _ in 0..40 {
            view.apply_gesture(Vec2::ZERO, 0.5, 0.0);
        }
        assert_eq!(view.zoom, MIN_ZOOM);
    }
}
