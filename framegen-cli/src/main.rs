//! Framegen command-line driver
//!
//! Runs an edit script against a fresh frame collection and prints the
//! requested tables to stdout. Logs go to stderr.
//!
//! ```text
//! framegen [SCRIPT]        run SCRIPT, or stdin when omitted
//! framegen --save-settings write the current settings file and exit
//! ```

mod render;
mod script;
mod session;
mod settings;

use std::io::Read;
use std::process::ExitCode;

use script::{parse_script, ScriptError};
use session::Session;
use settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "framegen=info,framegen_model=info,framegen_edit=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load();
    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--save-settings") {
        return match settings.save() {
            Ok(()) => {
                tracing::info!("Settings saved to {:?}", Settings::settings_path());
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(arg.as_deref(), &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(path: Option<&str>, settings: &Settings) -> Result<(), ScriptError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let commands = parse_script(&text)?;
    tracing::debug!("Parsed {} script commands", commands.len());

    let mut session = Session::new(settings);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    session.run(&commands, &mut out)?;

    tracing::info!(
        "Script finished with {} frames, {} undoable edits",
        session.frames().len(),
        session.frames().history().cursor()
    );
    Ok(())
}
