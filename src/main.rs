//! curbdesk - a terminal admin console for curbside pickup routes.

use std::io::{self, Stdout};
use std::panic;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use curbdesk::api::{AdminClient, BrowserNavigator};
use curbdesk::app::{App, Request};
use curbdesk::cache::ViewStateStore;
use curbdesk::config::{Config, TableSource};
use curbdesk::events::EventHandler;
use curbdesk::logging;
use curbdesk::tasks::{create_task_channel, TaskSpawner};
use curbdesk::ui::{init_theme, Theme};

/// Command line arguments. Flags override the configuration file.
#[derive(Debug, Parser)]
#[command(name = "curbdesk", version, about = "Terminal admin console for curbside pickup routes")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load the table from a JSON file instead of the server.
    #[arg(long, conflicts_with = "remote")]
    table: Option<PathBuf>,

    /// Server path that returns the table as JSON.
    #[arg(long)]
    remote: Option<String>,

    /// Admin server base URL.
    #[arg(long)]
    server: Option<String>,
}

impl Cli {
    /// Load the configuration and apply the flag overrides.
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .context("failed to load configuration")?;

        if let Some(server) = &self.server {
            config.server.base_url = server.clone();
        }
        if let Some(path) = &self.table {
            config.table.source = TableSource::File(path.display().to_string());
        }
        if let Some(path) = &self.remote {
            config.table.source = TableSource::Remote(path.clone());
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Restores the terminal when dropped.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
}

fn setup_terminal() -> Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));

    enable_raw_mode().context("failed to enable raw mode")?;
    let guard = TerminalGuard;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    Ok((terminal, guard))
}

fn dispatch(spawner: &TaskSpawner, client: &AdminClient, request: Request) {
    debug!(?request, "Dispatching request");
    match request {
        Request::LoadTable(source) => spawner.spawn_load_table(client, source),
        Request::SaveRoute { endpoint, form } => spawner.spawn_save_route(client, endpoint, form),
        Request::MarkComplete { endpoint, id } => {
            spawner.spawn_mark_complete(client, endpoint, id)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    if let Err(e) = logging::init(&config.settings) {
        eprintln!("curbdesk: logging disabled: {:#}", e);
    }

    init_theme(Theme::by_name(&config.settings.theme));
    let client = AdminClient::new(&config.server)?;
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);

    let (mut rx, spawner) = create_task_channel();
    let mut app = App::new(
        config,
        Box::new(BrowserNavigator),
        ViewStateStore::in_data_dir(),
    );

    let (mut terminal, _guard) = setup_terminal()?;
    info!("Terminal ready");

    let result: Result<()> = loop {
        for request in app.take_requests() {
            dispatch(&spawner, &client, request);
        }

        if let Err(e) = terminal.draw(|frame| app.view(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(event) => app.update(event),
            Err(e) => break Err(e.into()),
        }

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        if app.should_quit() {
            break Ok(());
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "Main loop failed");
    }
    logging::shutdown();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("curbdesk").chain(args.iter().copied())).unwrap()
    }

    fn missing_config(dir: &TempDir) -> String {
        dir.path().join("config.toml").display().to_string()
    }

    #[test]
    fn test_flags_override_defaults() {
        let dir = TempDir::new().unwrap();
        let config = cli(&[
            "--config",
            &missing_config(&dir),
            "--server",
            "https://admin.example.com",
            "--table",
            "stops.json",
        ])
        .load_config()
        .unwrap();

        assert_eq!(config.server.base_url, "https://admin.example.com");
        assert_eq!(
            config.table.source,
            TableSource::File("stops.json".to_string())
        );
    }

    #[test]
    fn test_remote_flag() {
        let dir = TempDir::new().unwrap();
        let config = cli(&["--config", &missing_config(&dir), "--remote", "/admin/stops.json"])
            .load_config()
            .unwrap();
        assert_eq!(
            config.table.source,
            TableSource::Remote("/admin/stops.json".to_string())
        );
    }

    #[test]
    fn test_table_and_remote_conflict() {
        assert!(Cli::try_parse_from(["curbdesk", "--table", "a.json", "--remote", "/a"]).is_err());
    }

    #[test]
    fn test_bad_server_flag_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = cli(&["--config", &missing_config(&dir), "--server", "ftp://nope"])
            .load_config();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_default_config_location_from_env() {
        let dir = TempDir::new().unwrap();
        std::env::set_var(curbdesk::config::CONFIG_DIR_ENV, dir.path());
        std::fs::write(
            dir.path().join("config.toml"),
            "[server]\nbase_url = \"http://10.0.0.2:8080\"\n",
        )
        .unwrap();

        let config = cli(&[]).load_config().unwrap();
        std::env::remove_var(curbdesk::config::CONFIG_DIR_ENV);

        assert_eq!(config.server.base_url, "http://10.0.0.2:8080");
    }
}
