#![warn(clippy::all, rust_2018_idioms)]

pub mod action;
pub mod config;
pub mod engine;
pub mod export;
pub mod frame;
pub mod shapes;
pub mod state;
pub mod stroke;
pub mod timeline;
pub mod transform;

pub use action::{CanvasAction, CanvasEvent};
pub use config::{DrawMode, EditorConfig};
pub use engine::reducer::reduce;
pub use engine::CanvasEngine;
pub use export::{ExportError, GifExporter};
pub use frame::Frame;
pub use shapes::Shape;
pub use state::CanvasState;
pub use stroke::{MutableStroke, PathProperties, Stroke, StrokeRef};
pub use timeline::{FrameTarget, Timeline};
pub use transform::{Affine, ViewTransform};
