// Entrypoint for the CLI application.
// - Keeps `main` small: run the startup checks, then hand off to the
//   interactive session.
// - Returns `anyhow::Result` to simplify error handling.

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use gitup_cli::config::ConfigStore;
use gitup_cli::journal::Journal;
use gitup_cli::locate::PathLocator;
use gitup_cli::{api, ui};
use std::process::Command;

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    clear_terminal();
    println!("=== GitHub Auto Uploader ===");

    // Both checks abort before any prompt: nothing works without git and
    // a network path to github.com.
    if !git_installed() {
        eprintln!("Git is not installed. Please install Git first.");
        std::process::exit(1);
    }
    if let Err(err) = api::check_connectivity() {
        eprintln!("No internet connection. Please check and try again. ({})", err);
        std::process::exit(1);
    }

    let store = ConfigStore::default_location();
    let journal = Journal::default_location();
    let locator = PathLocator::with_default_roots();

    // Blocks until the upload attempt completes.
    ui::run_session(&store, &journal, &locator)?;
    Ok(())
}

fn git_installed() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn clear_terminal() {
    let _ = execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}
