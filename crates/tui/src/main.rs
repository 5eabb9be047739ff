mod host;
mod map;
mod renderer;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use trackmap_core::TrackMapOptions;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let mut json = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    let Some(frames_path) = paths.first() else {
        eprintln!("Usage: trackmap <frames.json> [options.json] [--json]");
        std::process::exit(1);
    };

    let data = std::fs::read(frames_path)
        .with_context(|| format!("reading {}", frames_path.display()))?;
    let options = match paths.get(1) {
        Some(path) => {
            let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            TrackMapOptions::from_json(&raw)?
        }
        None => TrackMapOptions::default(),
    };

    let view = trackmap_core::run_json(&data, &options);

    if json {
        let mut out = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &view)?;
        writeln!(out)?;
        return Ok(());
    }

    renderer::render_tui(&view, &options)
}
