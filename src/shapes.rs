use egui::{pos2, Pos2, Rect};
use serde::{Deserialize, Serialize};

/// Preset shapes insertable without freehand input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

/// Circles and squares are inscribed in this rect.
pub fn shape_rect() -> Rect {
    Rect::from_min_max(pos2(100.0, 100.0), pos2(400.0, 400.0))
}

const CIRCLE_SEGMENTS: usize = 64;

impl Shape {
    /// The canonical closed path for this shape, ready to commit as a stroke.
    pub fn path(self) -> Vec<Pos2> {
        match self {
            Shape::Circle => {
                let rect = shape_rect();
                let center = rect.center();
                let radius = rect.width() / 2.0;
                (0..=CIRCLE_SEGMENTS)
                    .map(|i| {
                        let angle = std::f32::consts::TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                        pos2(
                            center.x + radius * angle.cos(),
                            center.y + radius * angle.sin(),
                        )
                    })
                    .collect()
            }
            Shape::Square => {
                let rect = shape_rect();
                vec![
                    rect.left_top(),
                    rect.right_top(),
                    rect.right_bottom(),
                    rect.left_bottom(),
                    rect.left_top(),
                ]
            }
            Shape::Triangle => vec![
                pos2(100.0, 100.0),
                pos2(200.0, 250.0),
                pos2(0.0, 250.0),
                pos2(100.0, 100.0),
            ],
        }
    }
}
