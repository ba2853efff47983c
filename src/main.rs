mod app;
mod scan;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Scan results JSON produced by the network scanner
    #[arg(long)]
    scan_file: PathBuf,

    #[arg(long, default_value_t = 1440.0)]
    width: f32,

    #[arg(long, default_value_t = 920.0)]
    height: f32,

    /// Start with the topology view in fullscreen
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_fullscreen(args.fullscreen),
        ..Default::default()
    };

    eframe::run_native(
        "topología de red",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::TopologyApp::new(
                cc,
                args.scan_file.clone(),
                args.fullscreen,
            )))
        }),
    )
}
