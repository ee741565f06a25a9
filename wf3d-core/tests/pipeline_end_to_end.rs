//! End-to-end checks of the wireframe pipeline.
//!
//! Expected screen positions are computed by hand from the frustum formula
//! rather than through the library's own matrices.

use approx::assert_relative_eq;
use wf3d_core::animation::Clock;
use wf3d_core::renderer::{project_edges, sort_back_to_front};
use wf3d_core::{
    apply_lighting, clip_to_circular_viewport, render_wireframe, render_wireframe_with,
    BezierAnimation, Camera, Canvas, Light, ManualClock, Mesh, RenderOptions, Transform, Vec3,
};

const WIDTH: usize = 200;
const HEIGHT: usize = 200;
const NEAR: f32 = 1.0;
const FAR: f32 = 10.0;
const CAMERA_DISTANCE: f32 = 5.0;

/// Screen position for a view of `translate(0, 0, -d)` and `frustum(-1, 1, -1, 1, n, f)`
fn expected_screen(v: &Vec3) -> (f32, f32, f32) {
    let z_view = v.z - CAMERA_DISTANCE;
    let w = -z_view;
    // 2n / (r - l) with r - l = 2
    let ndc_x = NEAR * v.x / w;
    let ndc_y = NEAR * v.y / w;
    let ndc_z = (-(FAR + NEAR) / (FAR - NEAR) * z_view - 2.0 * FAR * NEAR / (FAR - NEAR)) / w;
    (
        (ndc_x + 1.0) * 0.5 * WIDTH as f32,
        (1.0 - ndc_y) * 0.5 * HEIGHT as f32,
        ndc_z,
    )
}

fn matrices() -> (wf3d_core::Mat4, wf3d_core::Mat4, wf3d_core::Mat4) {
    (
        Transform::identity(),
        Transform::translation(0.0, 0.0, -CAMERA_DISTANCE),
        Transform::frustum_asymmetric(-1.0, 1.0, -1.0, 1.0, NEAR, FAR),
    )
}

#[test]
fn unit_cube_projects_to_hand_computed_coordinates() {
    let mut canvas = Canvas::new(WIDTH, HEIGHT).unwrap();
    let cube = Mesh::cube(1.0);
    let (world, view, proj) = matrices();

    let projected = project_edges(&canvas, &cube, &world, &view, &proj).unwrap();
    assert_eq!(projected.len(), 12);

    for (edge, screen) in cube.edges.iter().zip(&projected) {
        for (vertex, point) in [(&edge.v0, &screen.p0), (&edge.v1, &screen.p1)] {
            let (x, y, z) = expected_screen(vertex);
            assert_relative_eq!(point.x, x, epsilon = 1e-3);
            assert_relative_eq!(point.y, y, epsilon = 1e-3);
            assert_relative_eq!(point.z, z, epsilon = 1e-5);
        }
        assert!(clip_to_circular_viewport(&canvas, screen.p0.x, screen.p0.y));
        assert!(clip_to_circular_viewport(&canvas, screen.p1.x, screen.p1.y));
    }

    let stats = render_wireframe(&mut canvas, &cube, &world, &view, &proj).unwrap();
    assert_eq!(stats.edges, 12);
    assert_eq!(stats.drawn, 12);
    assert_eq!(stats.culled, 0);

    // Every segment starts with a splat on its first endpoint
    for screen in &projected {
        let (x, y) = (screen.p0.x.floor() as usize, screen.p0.y.floor() as usize);
        assert!(canvas.get(x, y).unwrap() > 0.0, "no ink at ({x}, {y})");
    }
    // The wireframe never crosses the optical axis
    assert_eq!(canvas.get(WIDTH / 2, HEIGHT / 2), Some(0.0));
}

#[test]
fn unit_cube_back_face_is_drawn_first() {
    let canvas = Canvas::new(WIDTH, HEIGHT).unwrap();
    let cube = Mesh::cube(1.0);
    let (world, view, proj) = matrices();

    let mut projected = project_edges(&canvas, &cube, &world, &view, &proj).unwrap();
    sort_back_to_front(&mut projected);

    // Back face (z = -0.5) edges are the first four, in source order
    let order: Vec<usize> = projected.iter().map(|e| e.index).collect();
    assert_eq!(&order[..4], &[0, 1, 2, 3]);
    assert_eq!(&order[4..8], &[8, 9, 10, 11]);
    assert_eq!(&order[8..], &[4, 5, 6, 7]);
    assert!(projected.windows(2).all(|w| w[0].depth >= w[1].depth));
}

#[test]
fn empty_mesh_leaves_fresh_canvas_blank() {
    let mut canvas = Canvas::new(WIDTH, HEIGHT).unwrap();
    let (world, view, proj) = matrices();
    render_wireframe(&mut canvas, &Mesh::new(), &world, &view, &proj).unwrap();
    assert!(canvas.pixels().iter().all(|&p| p == 0.0));
}

#[test]
fn camera_helper_centers_optical_axis() {
    let camera = Camera::new(WIDTH, HEIGHT);
    let screen = wf3d_core::project_vertex(
        &Vec3::zeros(),
        &Transform::identity(),
        &camera.view_matrix(),
        &camera.projection_matrix(),
        WIDTH,
        HEIGHT,
    );
    assert_eq!((screen.x, screen.y), (WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0));
}

#[test]
fn thick_lines_cover_more_pixels() {
    let cube = Mesh::cube(1.0);
    let (world, view, proj) = matrices();

    let mut thin = Canvas::new(WIDTH, HEIGHT).unwrap();
    render_wireframe(&mut thin, &cube, &world, &view, &proj).unwrap();

    let mut thick = Canvas::new(WIDTH, HEIGHT).unwrap();
    let options = RenderOptions { line_thickness: 3.0 };
    render_wireframe_with(&mut thick, &cube, &world, &view, &proj, &options).unwrap();

    let lit = |c: &Canvas| c.pixels().iter().filter(|&&p| p > 0.0).count();
    assert!(lit(&thick) > lit(&thin));
}

#[test]
fn lighting_dims_the_frame() {
    let (world, view, proj) = matrices();

    let mut full = Canvas::new(WIDTH, HEIGHT).unwrap();
    render_wireframe(&mut full, &Mesh::cube(1.0), &world, &view, &proj).unwrap();

    let mut lit_cube = Mesh::cube(1.0);
    apply_lighting(&mut lit_cube, &[Light::new(Vec3::x(), 0.5)]);
    let mut dimmed = Canvas::new(WIDTH, HEIGHT).unwrap();
    render_wireframe(&mut dimmed, &lit_cube, &world, &view, &proj).unwrap();

    let total = |c: &Canvas| c.pixels().iter().sum::<f32>();
    assert!(total(&dimmed) < total(&full));
    assert!(total(&dimmed) > 0.0);
}

#[test]
fn animated_frames_need_explicit_clear() {
    let (_, view, proj) = matrices();
    let cube = Mesh::cube(1.0);
    let path = BezierAnimation::new(
        [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ],
        1.0,
        0.0,
        false,
    )
    .unwrap();
    let mut clock = ManualClock::new(0.0);
    let mut canvas = Canvas::new(WIDTH, HEIGHT).unwrap();

    let p = path.position(clock.now());
    let world = Transform::translation(p.x, p.y, p.z);
    render_wireframe(&mut canvas, &cube, &world, &view, &proj).unwrap();
    let first_frame = canvas.clone();

    clock.advance(1.0);
    let p = path.position(clock.now());
    let world = Transform::translation(p.x, p.y, p.z);

    // Without begin_frame the first frame bleeds into the second
    let mut accumulated = canvas.clone();
    render_wireframe(&mut accumulated, &cube, &world, &view, &proj).unwrap();

    canvas.begin_frame();
    render_wireframe(&mut canvas, &cube, &world, &view, &proj).unwrap();

    assert_ne!(canvas, first_frame);
    let sum = |c: &Canvas| c.pixels().iter().sum::<f32>();
    assert_relative_eq!(sum(&accumulated), sum(&canvas) + sum(&first_frame), max_relative = 1e-3);
}
