/// Example: Load an STL file and print a single wireframe frame as text
///
/// Usage: cargo run --example load_stl -- path/to/file.stl
use anyhow::Result;
use std::env;
use wf3d_terminal::{DemoApp, DemoConfig, MeshSource};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mesh = match env::args().nth(1) {
        Some(path) => MeshSource::Stl(path.into()),
        None => {
            eprintln!("No STL file provided, using default cube...");
            MeshSource::Cube
        }
    };

    let config = DemoConfig {
        mesh,
        frames: 1,
        width: 320,
        height: 320,
        ascii: true,
        ..DemoConfig::default()
    };

    let mut app = DemoApp::new(config)?;
    app.run()
}
