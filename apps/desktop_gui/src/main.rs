use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use game_core::HttpFactService;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::FakeFactApp;

#[derive(Parser, Debug)]
#[command(about = "Spot-the-fake-fact desktop client")]
struct Args {
    /// Base URL of the fact generation server.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let service = HttpFactService::new(&args.server_url)
        .with_context(|| format!("invalid server url: {}", args.server_url))?;
    tracing::info!(endpoint = %service.endpoint(), "using fact service");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(service));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Fake Fact")
            .with_inner_size([760.0, 560.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    let server_url = args.server_url;
    eframe::run_native(
        "Fake Fact",
        options,
        Box::new(move |_cc| Ok(Box::new(FakeFactApp::new(cmd_tx, ui_rx, &server_url)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui exited with error: {err}"))
}
