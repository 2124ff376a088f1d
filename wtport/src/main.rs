// wtport/src/main.rs
//! wtport entry point.

use clap::Parser;
use log::LevelFilter;

use wtport::cli::Cli;
use wtport::commands;
use wtport::logger;
use wtport::ui::output_format::error_msg;
use wtport::ui::theme::{build_theme_map, ThemeStyle};

fn main() {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let theme_map = match build_theme_map(cli.theme.as_ref()) {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("Theme error: {:#}", e), &ThemeStyle::default_theme_map());
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::run(cli, &theme_map) {
        error_msg(format!("{:#}", e), &theme_map);
        std::process::exit(1);
    }
}
