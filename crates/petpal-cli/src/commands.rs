//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (JSON API, SSE events and optional web UI)
    Serve {
        /// Port to listen on (defaults to PETPAL_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory with a built web UI to serve with SPA fallback
        #[arg(long)]
        static_dir: Option<PathBuf>,
        /// Serve only the API, even if a web UI build is found
        #[arg(long)]
        api_only: bool,
    },

    /// List pet profiles
    Pets,

    /// List the facility categories offered for a species
    Categories {
        /// Species: dog, cat or other
        #[arg(short, long)]
        species: String,
    },

    /// Ask the AI assistant about symptoms
    Ask {
        /// Pet id (defaults to the active pet)
        #[arg(long)]
        pet: Option<String>,
        /// Symptoms to describe
        #[arg(required = true, num_args = 1..)]
        symptoms: Vec<String>,
    },

    /// Find pet facilities near a position
    Places {
        /// Pet id (defaults to the active pet)
        #[arg(long)]
        pet: Option<String>,
        /// Category, e.g. hospital, park, hotel
        #[arg(short, long)]
        category: Option<String>,
        /// Latitude of the search center
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude of the search center
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },
}
