mod app;
mod args;
mod canvas;
mod ines;
mod input;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use crate::{app::App, args::Args};

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal canvas owns stdout, so logs always go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = App::new(args);
    app.run()
}
