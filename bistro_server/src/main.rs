use std::process::ExitCode;

use bistro_server::{cli::handle_command_line_args, config::ServerConfig, server::run_server};
use dotenvy::dotenv;
use log::*;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return ExitCode::SUCCESS;
    }
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("🪛️ The server cannot start. {e}");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    info!("🚀️ Starting server on {}:{}", config.host, config.port);
    match run_server(config).await {
        Ok(_) => {
            println!("Bye!");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
