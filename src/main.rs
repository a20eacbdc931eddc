#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

use std::process;

use args::Args;
use clap::Parser;
use error::Error;
use indicatif::{ProgressBar, ProgressStyle};
use run::Archiver;
use terminal::{create_new_pb, get_formatted_left_output, OutputColor};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use transport::ReqwestTransport;

mod archive;
mod args;
mod channel;
mod config;
mod conversations;
mod directory;
mod error;
mod run;
mod terminal;
mod transport;

async fn start(args: Args, pb: &ProgressBar) -> Result<(), Error> {
    let start_time = std::time::Instant::now();

    let config = args.into_config()?;

    let archiver = Archiver::new(ReqwestTransport::new(), config).with_progress(pb.clone());
    let summary = archiver.run().await?;

    let total: usize = summary.channels.iter().map(|c| c.messages).sum();
    pb.println(format!(
        "{} {} messages from {} channels ({})",
        get_formatted_left_output("Exported", &OutputColor::Green),
        total,
        summary.channels.len(),
        summary.output_dir.display()
    ));

    if let Ok(style) = ProgressStyle::default_bar().template(&format!(
        "{{msg}} in {}s",
        (start_time.elapsed().as_secs_f32() * 10.0).round() / 10.0
    )) {
        pb.set_style(style);
    }
    pb.finish_with_message(get_formatted_left_output("Finished", &OutputColor::Green));

    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.json_logs);

    let pb = &create_new_pb(2, "Running");

    let result = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(start(args, pb)),
        Err(e) => Err(Error::Config(format!("failed to start runtime: {e}"))),
    };

    if let Err(e) = result {
        pb.abandon();

        eprintln!(
            "{} {}",
            get_formatted_left_output("Error", &OutputColor::Red),
            e
        );

        process::exit(1);
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
