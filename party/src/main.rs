//! Party roster manager TUI application.
//!
//! Splits coins and experience across the active members of a tabletop
//! party and keeps the roster in a JSON file.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a numbered text menu on stdin/stdout:
//!
//! ```bash
//! cargo run -p party -- --headless --file campaign/party.json
//! ```

mod app;
mod events;
mod forms;
mod headless;
mod notices;
mod ui;

use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use party_core::{PartyConfig, PartySession};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

/// Log file written next to the save file in TUI mode.
const LOG_FILE: &str = "party.log";

/// Environment variable naming the save file.
const SAVE_FILE_ENV: &str = "PARTY_FILE";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    file: Option<PathBuf>,
    headless: bool,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!();
            print_help();
            std::process::exit(2);
        }
    };

    if cli.help {
        print_help();
        return Ok(());
    }

    let config = party_config(&cli, std::env::var(SAVE_FILE_ENV).ok());

    if cli.headless {
        init_stderr_logging();
        let (mut session, outcome) = PartySession::open(&config);
        headless::run_headless(&mut session, &outcome)?;
        return Ok(());
    }

    init_file_logging(&config.save_path);
    let (session, outcome) = PartySession::open(&config);
    let mut app = App::new(session, &outcome);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Terminal loop failed");
        eprintln!("Error: {e}");
    }

    match app.save_on_exit() {
        Ok(true) => println!("Party saved to {}", app.session.store_description()),
        Ok(false) => {}
        Err(e) => {
            eprintln!("Save failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    info!("Roster TUI started");

    loop {
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(app, ev) == EventResult::Quit {
                return Ok(());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "--headless" => cli.headless = true,
            "-f" | "--file" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("{arg} requires a path"))?;
                cli.file = Some(PathBuf::from(path));
            }
            other => {
                if let Some(path) = other.strip_prefix("--file=") {
                    cli.file = Some(PathBuf::from(path));
                } else {
                    return Err(format!("unknown argument: {other}"));
                }
            }
        }
    }

    Ok(cli)
}

/// `--file` wins over the environment, which wins over the default.
fn party_config(cli: &CliArgs, env_file: Option<String>) -> PartyConfig {
    let config = PartyConfig::new();
    match (&cli.file, env_file.filter(|f| !f.trim().is_empty())) {
        (Some(path), _) => config.with_save_path(path),
        (None, Some(path)) => config.with_save_path(path),
        (None, None) => config,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .init();
}

/// The TUI owns the screen, so logs go to a file beside the roster.
fn init_file_logging(save_path: &Path) {
    let log_path = save_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE));

    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init(),
        Err(e) => eprintln!(
            "Warning: could not open log file {}: {e}",
            log_path.display()
        ),
    }
}

fn print_help() {
    println!("Party Roster - coin and experience splitting for tabletop parties");
    println!();
    println!("USAGE:");
    println!("  party [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help          Show this help message");
    println!("  --headless          Run with a numbered text menu (no TUI)");
    println!("  -f, --file <PATH>   Roster file (default: party.json)");
    println!();
    println!("ENVIRONMENT:");
    println!("  PARTY_FILE          Roster file when --file is not given");
    println!("  RUST_LOG            Log filter (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("  party                              # Interactive TUI mode");
    println!("  party --file campaign/party.json   # Use another roster");
    println!("  party --headless < commands.txt    # Scripted session");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_flags() {
        let cli = parse_args(&args(&["--headless", "--file", "x.json"])).unwrap();
        assert!(cli.headless);
        assert_eq!(cli.file, Some(PathBuf::from("x.json")));

        let cli = parse_args(&args(&["--file=y.json"])).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("y.json")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--file"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_config_precedence() {
        let default = party_config(&CliArgs::default(), None);
        assert_eq!(default.save_path, PathBuf::from("party.json"));

        let from_env = party_config(&CliArgs::default(), Some("env.json".to_string()));
        assert_eq!(from_env.save_path, PathBuf::from("env.json"));

        let cli = CliArgs {
            file: Some(PathBuf::from("cli.json")),
            ..Default::default()
        };
        let from_cli = party_config(&cli, Some("env.json".to_string()));
        assert_eq!(from_cli.save_path, PathBuf::from("cli.json"));

        let blank_env = party_config(&CliArgs::default(), Some("  ".to_string()));
        assert_eq!(blank_env.save_path, PathBuf::from("party.json"));
    }
}
