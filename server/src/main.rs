mod api;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use common::game::Game;

/// JSON API server for the Tower of Hanoi game.
#[derive(Parser, Debug)]
#[command(name = "server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8081")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let game = Arc::new(Mutex::new(Game::new()));
    let app = api::router(game);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    log::info!("listening on {addr}");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("server exited with an error")?;

    Ok(())
}
