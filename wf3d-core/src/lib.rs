/// WF3D Core Library - software wireframe rendering
///
/// Vector and matrix math, a floating-point intensity canvas with
/// anti-aliased lines, and the projection, depth-sort and rasterization
/// pipeline. Mesh sources, Bezier animation and per-edge lighting feed the
/// pipeline from the outside.

pub mod animation;
pub mod canvas;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod projection;
pub mod renderer;
pub mod stl;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use animation::{AnimatedObject, BezierAnimation, Clock, Easing, ManualClock, SystemClock};
pub use canvas::Canvas;
pub use error::{Error, Result, StlError};
pub use geometry::{Edge, Mesh};
pub use lighting::{apply_lighting, Light};
pub use projection::{clip_to_circular_viewport, project_vertex, Camera};
pub use renderer::{render_wireframe, render_wireframe_with, RenderOptions, RenderStats};
pub use transform::{Mat4, RotationState, Transform};
pub use vector::{Spherical, Vec3};
