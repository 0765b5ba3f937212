use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::transform::Affine;

/// Render properties attached to a stroke. Frozen together with the points
/// when the stroke is committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathProperties {
    pub color: Color32,
    pub brush_size: f32,
    pub erase_mode: bool,
}

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Pos2>,
    properties: PathProperties,
}

// Mutable stroke for editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    properties: PathProperties,
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    // Create a new immutable stroke
    pub fn new(points: Vec<Pos2>, properties: PathProperties) -> Self {
        Self { points, properties }
    }

    // Create a new reference-counted Stroke
    pub fn new_ref(points: Vec<Pos2>, properties: PathProperties) -> StrokeRef {
        Arc::new(Self::new(points, properties))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn properties(&self) -> PathProperties {
        self.properties
    }
}

impl MutableStroke {
    /// Start a stroke at `point`. The point list contains exactly that point.
    pub fn begin(point: Pos2, properties: PathProperties) -> Self {
        Self {
            points: vec![point],
            properties,
        }
    }

    // Add a point to the mutable stroke
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Map every point through an affine transform (pinch/rotate gestures).
    pub fn apply_transform(&mut self, matrix: &Affine) {
        for point in &mut self.points {
            *point = matrix.transform_point(*point);
        }
    }

    // Convert to an immutable Stroke
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.points.clone(), self.properties)
    }

    // Convert to a reference-counted StrokeRef
    pub fn to_stroke_ref(&self) -> StrokeRef {
        Arc::new(self.to_stroke())
    }

    // Get a reference to the points for preview
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn properties(&self) -> PathProperties {
        self.properties
    }
}
