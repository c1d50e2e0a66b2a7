mod cli;
mod config;
mod db;
mod importer;
mod job_controller;
mod jobs;
mod services;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::job_controller::state::JobsState;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = Config::from_env().inspect_err(|e| {
        error!("Failed to load configuration: {}", e);
    })?;
    info!("Starting in {:?} environment", config.environment);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => actix_web::rt::System::new().block_on(serve(config))?,
        Command::Migrate => cli::migrate(&config)?,
        Command::Rollback { steps } => cli::rollback(&config, steps)?,
        Command::Import { max_files } => {
            cli::import(&config, max_files)?;
        }
    }
    Ok(())
}

async fn serve(config: Config) -> std::io::Result<()> {
    // Bring the schema up to date before anything can touch it.
    db::open_and_migrate(&config.database.path).map_err(|e| {
        error!("Failed to migrate {:?}: {}", config.database.path, e);
        std::io::Error::other(e)
    })?;

    // Initialize job controller state
    let (jobs_state, rx) = JobsState::new();

    // Start job updater task
    let updater_state = jobs_state.clone();
    actix_web::rt::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    let host = config.server.host.clone();
    let port = config.server.port;
    info!("Server running at http://{}:{}", host, port);

    let config = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(config.clone())
            .service(services::imports::configure_routes())
            .configure(services::writings::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
