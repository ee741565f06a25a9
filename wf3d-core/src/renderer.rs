/// Wireframe pipeline: projection, painter's-algorithm depth sort, rasterization
use log::{debug, trace};

use crate::canvas::{Canvas, FULL_INTENSITY};
use crate::error::Result;
use crate::geometry::Mesh;
use crate::projection::{clip_to_circular_viewport, project_vertex};
use crate::transform::Mat4;
use crate::vector::Vec3;

/// Tunables for a render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub line_thickness: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_thickness: 1.0,
        }
    }
}

/// An edge in screen space. `p0`/`p1` carry `(x, y, ndc_z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEdge {
    pub p0: Vec3,
    pub p1: Vec3,
    /// Mean of the two endpoint depths
    pub depth: f32,
    pub intensity: f32,
    /// Position of the edge in the source mesh
    pub index: usize,
}

/// Counters from one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub edges: usize,
    pub drawn: usize,
    pub culled: usize,
}

/// Sort back to front: largest depth first.
///
/// The sort is stable, so equal depths keep their source order.
pub fn sort_back_to_front(edges: &mut [ProjectedEdge]) {
    edges.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Project every edge of `mesh` into the canvas' screen space
pub fn project_edges(
    canvas: &Canvas,
    mesh: &Mesh,
    world: &Mat4,
    view: &Mat4,
    proj: &Mat4,
) -> Result<Vec<ProjectedEdge>> {
    let (width, height) = (canvas.width(), canvas.height());
    let mut projected = Vec::new();
    projected.try_reserve_exact(mesh.len())?;

    for (index, edge) in mesh.edges.iter().enumerate() {
        let p0 = project_vertex(&edge.v0, world, view, proj, width, height);
        let p1 = project_vertex(&edge.v1, world, view, proj, width, height);
        projected.push(ProjectedEdge {
            p0,
            p1,
            depth: (p0.z + p1.z) / 2.0,
            intensity: edge.intensity.unwrap_or(FULL_INTENSITY),
            index,
        });
    }

    Ok(projected)
}

/// Render `mesh` with default options. See [`render_wireframe_with`].
pub fn render_wireframe(
    canvas: &mut Canvas,
    mesh: &Mesh,
    world: &Mat4,
    view: &Mat4,
    proj: &Mat4,
) -> Result<RenderStats> {
    render_wireframe_with(canvas, mesh, world, view, proj, &RenderOptions::default())
}

/// Draw `mesh` into `canvas`, farthest edges first.
///
/// An edge is drawn only when both projected endpoints fall inside the
/// circular viewport; edges crossing the boundary are dropped whole. The
/// canvas is never cleared here.
pub fn render_wireframe_with(
    canvas: &mut Canvas,
    mesh: &Mesh,
    world: &Mat4,
    view: &Mat4,
    proj: &Mat4,
    options: &RenderOptions,
) -> Result<RenderStats> {
    let mut edges = project_edges(canvas, mesh, world, view, proj)?;
    sort_back_to_front(&mut edges);

    let mut stats = RenderStats {
        edges: edges.len(),
        ..RenderStats::default()
    };

    for edge in &edges {
        let (p0, p1) = (edge.p0, edge.p1);
        if clip_to_circular_viewport(canvas, p0.x, p0.y)
            && clip_to_circular_viewport(canvas, p1.x, p1.y)
        {
            canvas.draw_line_with_intensity(
                p0.x,
                p0.y,
                p1.x,
                p1.y,
                options.line_thickness,
                edge.intensity,
            );
            stats.drawn += 1;
        } else {
            trace!("edge {} outside circular viewport", edge.index);
            stats.culled += 1;
        }
    }

    debug!(
        "rendered {} edges ({} drawn, {} culled)",
        stats.edges, stats.drawn, stats.culled
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    fn edge_at_depth(depth: f32, index: usize) -> ProjectedEdge {
        ProjectedEdge {
            p0: Vec3::new(0.0, 0.0, depth),
            p1: Vec3::new(1.0, 0.0, depth),
            depth,
            intensity: 1.0,
            index,
        }
    }

    #[test]
    fn test_sort_back_to_front() {
        let mut edges = vec![edge_at_depth(1.0, 0), edge_at_depth(3.0, 1), edge_at_depth(2.0, 2)];
        sort_back_to_front(&mut edges);
        let depths: Vec<f32> = edges.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_sort_ties_keep_source_order() {
        let mut edges = vec![
            edge_at_depth(0.5, 0),
            edge_at_depth(0.9, 1),
            edge_at_depth(0.5, 2),
            edge_at_depth(0.5, 3),
        ];
        sort_back_to_front(&mut edges);
        let order: Vec<usize> = edges.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_empty_mesh_leaves_canvas_untouched() {
        let mut canvas = Canvas::new(32, 32).unwrap();
        let id = Transform::identity();
        let stats = render_wireframe(&mut canvas, &Mesh::new(), &id, &id, &id).unwrap();
        assert_eq!(stats, RenderStats::default());
        assert!(canvas.pixels().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_edge_with_one_endpoint_outside_is_dropped() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let id = Transform::identity();
        let mut mesh = Mesh::new();
        // NDC (0.9, 0.9) maps to (95, 5), outside the inscribed circle
        mesh.add_edge(crate::geometry::Edge::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.9, 0.9, 0.0),
        ));
        mesh.add_edge(crate::geometry::Edge::new(
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
        ));

        let stats = render_wireframe(&mut canvas, &mesh, &id, &id, &id).unwrap();
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.culled, 1);
        assert_eq!(canvas.get(60, 40), Some(0.0));
        assert_eq!(canvas.get(50, 50), Some(1.0));
    }

    #[test]
    fn test_edge_intensity_replaces_full_brightness() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let id = Transform::identity();
        let mut edge = crate::geometry::Edge::new(Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0));
        edge.intensity = Some(0.25);
        let mesh = Mesh { edges: vec![edge] };

        render_wireframe(&mut canvas, &mesh, &id, &id, &id).unwrap();
        assert_eq!(canvas.get(50, 50), Some(0.25));
        assert_eq!(canvas.max_intensity(), 0.25);
    }

    #[test]
    fn test_render_accumulates_across_calls() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let id = Transform::identity();
        let mesh = Mesh {
            edges: vec![crate::geometry::Edge::new(
                Vec3::new(-0.5, 0.0, 0.0),
                Vec3::new(0.5, 0.0, 0.0),
            )],
        };

        render_wireframe(&mut canvas, &mesh, &id, &id, &id).unwrap();
        render_wireframe(&mut canvas, &mesh, &id, &id, &id).unwrap();
        assert_eq!(canvas.get(50, 50), Some(2.0));
    }

    #[test]
    fn test_non_finite_edges_are_skipped() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        let id = Transform::identity();
        let mesh = Mesh {
            edges: vec![crate::geometry::Edge::new(
                Vec3::new(f32::NAN, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
            )],
        };
        let stats = render_wireframe(&mut canvas, &mesh, &id, &id, &id).unwrap();
        assert_eq!(stats.culled, 1);
        assert_eq!(canvas.max_intensity(), 0.0);
    }
}
