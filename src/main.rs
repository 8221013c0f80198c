mod app;
mod cli;
mod color;
mod config;
mod report;
mod state;
mod ui;

use std::process::ExitCode;

use app::RustyChromaApp;
use clap::Parser;
use cli::Cli;
use config::ViewerConfig;
use eframe::egui;
use state::AppState;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = match ViewerConfig::with_cli_args(&cli) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Effective configuration: {config:?}");

    if cli.report {
        return run_report(&cli, &config);
    }

    match run_viewer(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Viewer exited with error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_report(cli: &Cli, config: &ViewerConfig) -> ExitCode {
    let Some(path) = &cli.file else {
        log::error!("--report needs an input file");
        return ExitCode::FAILURE;
    };
    let result = rusty_chroma::data::loader::load_file(path)
        .and_then(|data| report::write_report(&mut std::io::stdout().lock(), &data, config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_viewer(cli: &Cli, config: ViewerConfig) -> eframe::Result {
    let mut state = AppState::new(config);
    if let Some(path) = &cli.file {
        state.open(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Chroma – Transition Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyChromaApp::new(state)))),
    )
}
