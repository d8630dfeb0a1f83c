use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod session;
mod utils;

#[cfg(test)]
mod testing;

use api::backend::BackendClient;
use config::Config;
use session::Session;

fn prompt(session: &Session) {
    print!("fxdesk[{}]> ", session.view.name());
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr, stdout carries the tables
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fxdesk=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("💱 Starting fxdesk...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let client = match BackendClient::new(&config.api_url, config.timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create backend client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Backend: {}", client.base_url());

    let mut session = Session::new(client, config.page_size);
    print!("{}", commands::start(&mut session).await);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session);

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        match line {
            Ok(Some(line)) => {
                let reply = commands::handle_line(&mut session, &line).await;
                print!("{}", reply);
                if reply.quit {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    info!("Bye");
}
