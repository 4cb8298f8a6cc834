use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use jukebox_configurator::cli::{Cli, Hold};
use jukebox_configurator::{Config, Outcome, SetupError, logging, wizard};
use setup_form_dialoguer::{DialoguerBackend, Spinner};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_normalized();
    logging::init(cli.log_level);

    if let Err(err) = run(&cli) {
        if err.downcast_ref::<SetupError>().is_some_and(SetupError::is_cancelled) {
            info!("cancelled by user");
            eprintln!("Setup cancelled. Nothing was saved.");
        } else {
            error!(error = %err, "configurator failed");
            eprintln!("Error: {err:?}");
        }
        std::process::exit(1);
    }
}

fn spinner(cli: &Cli, title: &str) -> Spinner {
    let spinner = Spinner::new(title);
    if cli.plain { spinner.plain() } else { spinner }
}

fn run(cli: &Cli) -> Result<()> {
    let backend = if cli.plain {
        DialoguerBackend::plain()
    } else {
        DialoguerBackend::new()
    };

    let config = spinner(cli, "Loading...").run(|| Config::load(&cli.config))?;

    let outcome = wizard::run(&backend, config, |token| {
        spinner(cli, "Logging in...").run(|| wizard::discord_login(token))
    })?;

    match outcome {
        Outcome::Save(config) => {
            config
                .save(&cli.config)
                .with_context(|| format!("saving {}", cli.config.display()))?;
            println!("Config saved! You may now close this window.");
        }
        Outcome::Discarded => {
            println!("Configuration not saved. You may now close this window.");
        }
    }

    hold(cli.hold)
}

fn hold(mode: Hold) -> Result<()> {
    match mode {
        Hold::Interrupt => {
            let (tx, rx) = mpsc::channel();
            ctrlc::set_handler(move || {
                let _ = tx.send(());
            })
            .context("installing Ctrl+C handler")?;
            info!("waiting for Ctrl+C");
            let _ = rx.recv();
        }
        Hold::Delay => thread::sleep(Hold::DELAY),
        Hold::Exit => {}
    }
    Ok(())
}
