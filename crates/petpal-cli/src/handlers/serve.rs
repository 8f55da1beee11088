//! Serve command handler - runs the web server.

use std::path::{Path, PathBuf};

use petpal_axum::{ServerConfig, start_server};
use petpal_core::Settings;

use crate::error::CliError;

/// Default locations of a built web UI, preferred in this order.
const STATIC_DIR_CANDIDATES: [&str; 3] = ["./web/dist", "./dist", "./web"];

/// Arguments for the serve command.
#[derive(Debug, Default)]
pub struct ServeArgs {
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
    pub api_only: bool,
}

/// Start the web server and block until it stops.
pub async fn execute(settings: Settings, args: ServeArgs) -> Result<(), CliError> {
    let mut config = ServerConfig::from_settings(settings);
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(dir) = resolve_static_dir(args.static_dir, args.api_only, |p| {
        p.join("index.html").exists()
    }) {
        config = config.with_static_dir(dir);
    }

    let port = config.port;
    println!();
    if let Some(ref dir) = config.static_dir {
        println!("  petpal web server starting...");
        println!();
        println!("  Serving UI from: {}", dir.display());
        println!("  Local:   http://localhost:{port}");
    } else {
        println!("  petpal web server starting (API only)...");
        println!();
        println!("  API:     http://localhost:{port}/api");
        println!();
        println!("  Tip: Use --static-dir to serve a frontend build");
    }
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    start_server(config)
        .await
        .map_err(|e| CliError::Server(format!("{e:#}")))
}

/// Resolve static directory: api-only flag > explicit flag > default location.
fn resolve_static_dir<F>(explicit: Option<PathBuf>, api_only: bool, has_index: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if api_only {
        return None;
    }
    explicit.or_else(|| {
        STATIC_DIR_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| has_index(p))
            .map(Path::to_path_buf)
    })
}
