/// Image sinks and the offline demo harness for the WF3D renderer
use anyhow::{bail, Context, Result};
use log::info;
use std::fs;
use std::io::stdout;
use std::path::PathBuf;
use wf3d_core::{
    animation::Clock, apply_lighting, render_wireframe_with, stl, AnimatedObject,
    BezierAnimation, Camera, Canvas, Easing, Light, ManualClock, Mesh, RenderOptions,
    RenderStats, RotationState, Vec3,
};

pub mod ascii;
pub mod ppm;

pub use ascii::AsciiRenderer;

/// Where the demo gets its geometry
#[derive(Debug, Clone, PartialEq)]
pub enum MeshSource {
    Cube,
    SoccerBall,
    Stl(PathBuf),
}

impl MeshSource {
    fn parse(value: &str) -> Self {
        match value {
            "cube" => MeshSource::Cube,
            "ball" | "soccer" => MeshSource::SoccerBall,
            path => MeshSource::Stl(PathBuf::from(path)),
        }
    }

    pub fn load(&self) -> Result<Mesh> {
        match self {
            MeshSource::Cube => Ok(Mesh::cube(2.0)),
            MeshSource::SoccerBall => Ok(Mesh::soccer_ball(1.5)),
            MeshSource::Stl(path) => {
                let data = fs::read(path)
                    .with_context(|| format!("failed to read STL file {}", path.display()))?;
                stl::parse_stl(&data)
                    .with_context(|| format!("failed to parse STL file {}", path.display()))
            }
        }
    }
}

/// Settings for a demo run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub mesh: MeshSource,
    pub frames: usize,
    pub width: usize,
    pub height: usize,
    pub line_thickness: f32,
    /// Directory for `frame_NNN.ppm` files; no files are written when unset
    pub out_dir: Option<PathBuf>,
    /// Print the last frame as text
    pub ascii: bool,
    pub light: bool,
    /// Move the mesh along a looping Bezier path
    pub animate: bool,
    /// Rotation added per frame, in radians
    pub rotation_step: f32,
    pub frame_time: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mesh: MeshSource::SoccerBall,
            frames: 100,
            width: 800,
            height: 600,
            line_thickness: 1.5,
            out_dir: None,
            ascii: false,
            light: false,
            animate: false,
            rotation_step: 0.02,
            frame_time: 1.0 / 30.0,
        }
    }
}

impl DemoConfig {
    /// Build a config from command-line arguments (program name excluded)
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .with_context(|| format!("missing value for {}", flag))
            };
            match arg.as_str() {
                "--mesh" => config.mesh = MeshSource::parse(&value("--mesh")?),
                "--frames" => config.frames = value("--frames")?.parse().context("--frames")?,
                "--width" => config.width = value("--width")?.parse().context("--width")?,
                "--height" => config.height = value("--height")?.parse().context("--height")?,
                "--thickness" => {
                    config.line_thickness = value("--thickness")?.parse().context("--thickness")?
                }
                "--out" => config.out_dir = Some(PathBuf::from(value("--out")?)),
                "--ascii" => config.ascii = true,
                "--light" => config.light = true,
                "--animate" => config.animate = true,
                other => bail!("unknown argument: {}", other),
            }
        }

        if config.frames == 0 {
            bail!("--frames must be at least 1");
        }
        Ok(config)
    }
}

/// Renders a rotating mesh frame by frame into a canvas
pub struct DemoApp {
    config: DemoConfig,
    mesh: Mesh,
    camera: Camera,
    canvas: Canvas,
    object: AnimatedObject,
    clock: ManualClock,
}

impl DemoApp {
    pub fn new(config: DemoConfig) -> Result<Self> {
        let mut mesh = config.mesh.load()?;
        info!("loaded mesh with {} edges", mesh.len());

        if config.light {
            let lights = [
                Light::new(Vec3::new(1.0, 1.0, 0.5), 0.8),
                Light::new(Vec3::new(-0.5, 0.2, 1.0), 0.4),
            ];
            apply_lighting(&mut mesh, &lights);
        }

        let canvas = Canvas::new(config.width, config.height)?;
        let mut object = AnimatedObject::new();
        object.rotation = RotationState::new(0.3, 0.3, 0.0);
        if config.animate {
            let path = BezierAnimation::new(
                [
                    Vec3::new(-1.0, 0.0, 0.0),
                    Vec3::new(-0.5, 1.0, -1.0),
                    Vec3::new(0.5, -1.0, -1.0),
                    Vec3::new(1.0, 0.0, 0.0),
                ],
                config.frames as f32 * config.frame_time,
                0.0,
                true,
            )?
            .with_easing(Easing::EaseInOut);
            object.set_position_animation(path);
        }

        Ok(Self {
            camera: Camera::new(config.width, config.height),
            config,
            mesh,
            canvas,
            object,
            clock: ManualClock::default(),
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Advance the clock by one frame and spin the mesh
    pub fn update(&mut self) {
        let step = self.config.rotation_step;
        self.clock.advance(self.config.frame_time);
        self.object.rotation.rotate(step, step * 0.7, step * 0.3);
        let now = self.clock.now();
        self.object.update(now - self.object.current_time);
    }

    /// Clear the canvas and draw the current frame
    pub fn render_frame(&mut self) -> Result<RenderStats> {
        self.canvas.begin_frame();
        let options = RenderOptions {
            line_thickness: self.config.line_thickness,
        };
        let stats = render_wireframe_with(
            &mut self.canvas,
            &self.mesh,
            &self.object.world_matrix(),
            &self.camera.view_matrix(),
            &self.camera.projection_matrix(),
            &options,
        )?;
        Ok(stats)
    }

    pub fn run(&mut self) -> Result<()> {
        if let Some(dir) = &self.config.out_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        for frame in 0..self.config.frames {
            let stats = self.render_frame()?;
            if let Some(dir) = &self.config.out_dir {
                let path = dir.join(format!("frame_{:03}.ppm", frame));
                ppm::save_ppm(&self.canvas, &path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            info!(
                "frame {}: {} of {} edges drawn",
                frame, stats.drawn, stats.edges
            );
            self.update();
        }

        if self.config.ascii {
            let renderer = AsciiRenderer::new(80, 40);
            renderer.draw(&self.canvas, &mut stdout())?;
        }
        Ok(())
    }
}
