// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skafos")]
#[command(about = "Container image acquisition for Docker and Podman")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine socket path (overrides detection and config)
    #[arg(long, global = true)]
    pub socket: Option<String>,

    /// Engine runtime: docker or podman (overrides detection and config)
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull an image from its registry
    Pull {
        /// Image reference, e.g. nginx:1.25
        image: String,
    },

    /// Build an image from a local build context
    Build {
        /// Build context directory
        path: PathBuf,

        /// Tag for the resulting image
        #[arg(short, long)]
        tag: String,
    },

    /// Remove a local image
    Remove {
        /// Image reference
        image: String,

        /// Remove even if in use
        #[arg(long)]
        force: bool,
    },

    /// Show engine information
    Info,
}
