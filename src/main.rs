use clap::Parser;
use log::{debug, warn};

mod args;
mod countymap;

fn main() {
    let args = args::Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    debug!("args: {:?}", args);

    if let Err(e) = countymap::run(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        if let Some(source) = std::error::Error::source(&e) {
            eprintln!("caused by: {}", source);
        }
        std::process::exit(1);
    }
}
