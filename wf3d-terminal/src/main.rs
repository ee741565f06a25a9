/// WF3D Terminal Demo - Rotating Soccer Ball
///
/// Renders a rotating wireframe offline and writes each frame as a PPM image.
/// Usage:
///   wf3d-terminal [--mesh cube|ball|FILE.stl] [--frames N] [--width W] [--height H]
///                 [--thickness T] [--out DIR] [--ascii] [--light] [--animate]
///
/// Set RUST_LOG=debug for per-frame pipeline statistics.
use anyhow::Result;
use wf3d_terminal::{DemoApp, DemoConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DemoConfig::from_args(std::env::args().skip(1))?;
    log::info!(
        "rendering {} frames at {}x{}",
        config.frames,
        config.width,
        config.height
    );

    let mut app = DemoApp::new(config)?;
    app.run()?;

    log::info!("done");
    Ok(())
}
