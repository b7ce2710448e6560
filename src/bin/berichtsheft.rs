use berichtsheft::week_sync::{backend::JsonFileBackend, models::Args, run_tool::run};

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    /* Pick the storage directory */
    let args = Args::parse();
    let backend = match args.data_dir {
        Some(data_dir) => JsonFileBackend::new(data_dir),
        None => match JsonFileBackend::in_default_dir() {
            Ok(backend) => backend,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
    };
    info!("Using data directory {}", backend.data_dir().display());

    /* Run the command */
    if let Err(e) = run(backend, args.command, &mut std::io::stdout()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
