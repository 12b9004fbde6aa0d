pub mod types;
pub mod config;
pub mod data;
pub mod regions;
pub mod projection;
pub mod processing;
pub mod hover;
pub mod render;
pub mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the coffee-region world map to a static SVG
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Serve the interactive map with hover and point-query endpoints
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate { config } => {
            println!("Generating map with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            // 1. Load Data
            let (features, producers) = data::load_datasets(
                &app_config.input.world_geometry,
                &app_config.input.producers,
            )?;

            // 2. Join + Classify
            let countries = processing::build_countries(
                &features,
                &producers,
                app_config.map.surface_size(),
            );
            let producing = countries.iter().filter(|c| c.is_coffee_region).count();
            println!("Joined {} countries ({} coffee producers)", countries.len(), producing);

            // 3. Render SVG
            render::write_svg(&app_config, &countries)?;

            println!("Generation complete!");
        }
        Commands::Serve { config } => {
            println!("Serving map with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let (features, producers) = data::load_datasets(
                &app_config.input.world_geometry,
                &app_config.input.producers,
            )?;

            server::start_server(app_config, features, producers).await?;
        }
    }

    Ok(())
}
