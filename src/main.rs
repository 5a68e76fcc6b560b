mod cli;
mod clock;
use chrono::Local;
use clock::{print_face, run_clock};
use fuzzy_weather_face::transport::{FileTransport, FixedTransport, SilentTransport};
use fuzzy_weather_face::WeatherTransport;
use std::{fs::File, process::exit, sync::Mutex, time::Duration};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{cli::CliOptions, clock::RunClockOptions};

fn main() {
    let opt = CliOptions::from_args();
    if let Err(error) = run(opt) {
        eprintln!("\n  {:#}\n", error);
        exit(1)
    }
}

fn run(opt: CliOptions) -> anyhow::Result<()> {
    init_logging(&opt)?;
    let settings = opt.settings();
    let transport = weather_transport(&opt);
    info!(?settings, "configuration loaded");

    if opt.print {
        let now = Local::now().naive_local();
        let now = match opt.at {
            Some(time) => now.date().and_time(time),
            None => now,
        };
        return print_face(settings, &now, transport);
    }

    run_clock(RunClockOptions {
        settings,
        transport,
        tick_interval: Duration::from_millis(opt.tick),
    })
}

fn weather_transport(opt: &CliOptions) -> Box<dyn WeatherTransport> {
    match (&opt.weather_file, opt.temperature) {
        (Some(path), _) => Box::new(FileTransport::new(path.clone())),
        (None, Some(celsius)) => Box::new(FixedTransport::new(celsius)),
        (None, None) => Box::new(SilentTransport),
    }
}

fn init_logging(opt: &CliOptions) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match &opt.log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        // Printing once leaves the terminal free for stderr.
        None if opt.print => builder.with_writer(std::io::stderr).init(),
        // The interactive face owns the screen.
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}
