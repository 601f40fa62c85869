// ABOUTME: Entry point for the skafos CLI application.
// ABOUTME: Parses arguments, resolves the engine, and dispatches commands.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use skafos::config::Config;
use skafos::engine::{BollardEngine, detect_engine};
use skafos::error::{Error, Result};
use skafos::image::{self, AcquireOptions, ImageDescriptor};
use skafos::types::ImageRef;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir()?;
    let mut config = Config::discover(&cwd)?;

    // Flags override config
    if let Some(runtime) = cli.runtime {
        config.engine.runtime = Some(runtime.parse().map_err(Error::InvalidConfig)?);
    }
    if let Some(socket) = cli.socket {
        config.engine.socket = Some(socket);
    }

    let info = detect_engine(&config.engine)?;
    tracing::debug!("using {} at {}", info.runtime_type, info.socket_path);
    let engine = BollardEngine::connect(&info)?;

    let options = AcquireOptions {
        timeout: config.timeout,
    };

    match cli.command {
        Commands::Pull { image } => {
            let reference = ImageRef::parse(&image)?;
            if engine.image_exists(&reference).await? {
                println!("{reference} is already present locally");
            } else {
                println!("Pulling {reference} via {}...", info.runtime_type);
                image::pull(&engine, &ImageDescriptor::new(&image), &options).await?;
                println!("Pulled {reference}");
            }
        }
        Commands::Build { path, tag } => {
            println!("Building {tag} from {}...", path.display());
            let descriptor = ImageDescriptor::new(&tag).with_source(path);
            image::build(&engine, &descriptor, &options).await?;
            println!("Built {tag}");
        }
        Commands::Remove { image, force } => {
            let reference = ImageRef::parse(&image)?;
            engine.remove_image(&reference, force).await?;
            println!("Removed {reference}");
        }
        Commands::Info => {
            engine.ping().await?;
            let metadata = engine.info().await?;
            println!("Runtime: {} {}", metadata.name, metadata.version);
            println!("API version: {}", metadata.api_version);
            println!("OS/Arch: {}/{}", metadata.os, metadata.arch);
            println!("Socket: {}", info.socket_path);
        }
    }

    Ok(())
}
