use std::{io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sotalog::{
    config::LogbookConfig,
    console::{ConsoleError, terminal::TerminalConsole},
    core::session::Session,
    persist::{backup::BackupFile, output::OutputFile},
    reference::ReferenceTables,
    runtime::{
        controller::{Controller, ControllerState},
        prompts::prompt_station,
    },
};

/// Log SOTA activations and chases from the terminal.
#[derive(Parser, Debug)]
#[command(name = "sotalog", version, about)]
struct Cli {
    /// Log file to append to; `.adi`/`.adif` selects ADIF, anything else SOTA CSV.
    output: PathBuf,

    /// Do not prompt for signal reports.
    #[arg(long)]
    no_reports: bool,

    /// Restore the unsaved session from the backup file next to OUTPUT.
    #[arg(long)]
    resume: bool,

    /// Skip checking for newer reference data; use the cached copies.
    #[arg(long)]
    offline: bool,

    /// Directory holding the cached summit list and name directory.
    #[arg(long, env = "SOTALOG_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Summit list download URL.
    #[arg(long, env = "SOTALOG_SUMMITS_URL")]
    summits_url: Option<String>,

    /// Operator-name directory download URL (CSV with Call and Name columns).
    #[arg(long, env = "SOTALOG_NAMES_URL")]
    names_url: Option<String>,
}

impl Cli {
    fn into_config(self) -> LogbookConfig {
        let mut config = LogbookConfig::for_output(self.output);
        if let Some(dir) = self.cache_dir {
            config = config.with_cache_dir(dir);
        }
        if let Some(url) = self.summits_url {
            config.summits.url = Some(url);
        }
        config.names.url = self.names_url;
        config.ask_reports = !self.no_reports;
        config.refresh = !self.offline;
        config.resume = self.resume;
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Cli::parse().into_config();
    match run(config).await {
        Ok(ControllerState::Saved) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: LogbookConfig) -> Result<ControllerState> {
    let backup = BackupFile::new(config.backup_path());
    if backup.exists() && !config.resume {
        println!(
            "Warning: an unsaved session backup exists at '{}'; rerun with --resume to restore it \
             (it will be overwritten by this session)",
            backup.path().display()
        );
    }

    let refs = ReferenceTables::prepare(&config, &mut io::stdout())
        .await
        .context("failed to load reference tables")?;
    tracing::info!(
        summits = refs.summits.len(),
        names = refs.names.len(),
        "reference tables ready"
    );

    let resumed = if config.resume {
        Some(resume_session(&backup, &refs)?)
    } else {
        None
    };

    let output = OutputFile::new(&config.output, config.format);
    let ask_reports = config.ask_reports;
    let backup_path = backup.path().to_path_buf();

    let state = tokio::task::spawn_blocking(move || -> Result<ControllerState> {
        let mut console = TerminalConsole::new().context("failed to open terminal")?;
        let session = match resumed {
            Some(session) => session,
            None => match prompt_station(&mut console, &refs, Utc::now().date_naive()) {
                Ok(station) => Session::new(station),
                Err(ConsoleError::Interrupted | ConsoleError::Eof) => {
                    return Ok(ControllerState::Aborted);
                }
                Err(err) => return Err(err).context("station setup failed"),
            },
        };

        let mut controller =
            Controller::new(console, session, refs, Box::new(backup), output, ask_reports);
        controller.run().context("logging session failed")
    })
    .await
    .context("session task panicked")??;

    if state == ControllerState::Aborted && backup_path.exists() {
        println!("Session not saved; backup kept at '{}'", backup_path.display());
    }
    Ok(state)
}

fn resume_session(backup: &BackupFile, refs: &ReferenceTables) -> Result<Session> {
    let Some(snapshot) = backup
        .load()
        .with_context(|| format!("failed to read backup '{}'", backup.path().display()))?
    else {
        bail!("no backup to resume at '{}'", backup.path().display());
    };

    let session = Session::from_snapshot(snapshot);
    let unknown = session.unknown_summits(&refs.summits);
    if !unknown.is_empty() {
        let codes: Vec<&str> = unknown.iter().map(|c| c.as_str()).collect();
        bail!("backup references unknown summits: {}", codes.join(", "));
    }

    println!(
        "Resumed session for {} with {} QSOs",
        session.station().callsign,
        session.log().len()
    );
    Ok(session)
}
