// UI layer: the interactive session flow, built on `dialoguer` prompts.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::{self, GithubClient};
use crate::archive;
use crate::config::{Config, ConfigStore, LoadOutcome};
use crate::journal::Journal;
use crate::locate::PathLocator;
use crate::publish;
use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const TOKEN_HELP_URL: &str = "https://github.com/settings/tokens";

/// Top-level session. On the first run every input is collected and
/// persisted; on later runs the stored config is reconciled with the user
/// before provisioning the repository and running the publish sequence.
/// This call blocks until the upload attempt completes.
pub fn run_session(store: &ConfigStore, journal: &Journal, locator: &PathLocator) -> Result<()> {
    let mut config = match store.load() {
        LoadOutcome::Loaded(config) => reconcile_config(config, store)?,
        LoadOutcome::Corrupt => {
            println!("Existing config could not be parsed; starting over.");
            first_run_wizard(store, locator)?
        }
        LoadOutcome::Absent => first_run_wizard(store, locator)?,
    };

    // The stored path may still point at an archive from an earlier run.
    config.folder_path = extract_if_zip(&config.folder_path)?;

    let client = GithubClient::new(&config.token)?;
    provision_and_publish(&client, &config, journal)?;
    Ok(())
}

/// Collect every input from scratch and persist the full record.
fn first_run_wizard(store: &ConfigStore, locator: &PathLocator) -> Result<Config> {
    let mut token: String = Password::new()
        .with_prompt("Enter GitHub token (or 'h' for help)")
        .interact()?;
    if token.eq_ignore_ascii_case("h") {
        println!("Create a token at {}", TOKEN_HELP_URL);
        token = Password::new().with_prompt("Paste your GitHub token").interact()?;
    }

    let username: String = Input::new()
        .with_prompt("Enter GitHub username")
        .interact_text()?;
    let repo_name: String = Input::new()
        .with_prompt("Enter repository name")
        .interact_text()?;

    let mut fragment: String = Input::new()
        .with_prompt("Enter folder path to upload (or .zip file)")
        .interact_text()?;
    // Re-prompt until the fragment resolves to something that exists.
    let folder = loop {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
        spinner.set_message("Searching your filesystem...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let found = locator.locate(&fragment);
        spinner.finish_and_clear();

        match found {
            Some(path) if path.exists() => break path,
            _ => {
                println!("Path '{}' not found on your system!", fragment);
                fragment = Input::new()
                    .with_prompt("Enter folder path to upload")
                    .interact_text()?;
            }
        }
    };

    let folder_path = extract_if_zip(&folder.display().to_string())?;
    let is_public = Confirm::new()
        .with_prompt("Upload as public repo? (y = public, n = private)")
        .default(true)
        .interact()?;
    let commit_msg: String = Input::new()
        .with_prompt("Enter commit message")
        .default("Upload by bot".into())
        .interact_text()?;

    let config = Config {
        token,
        username,
        repo_name,
        folder_path,
        is_public,
        commit_msg,
    };
    store.save(&config)?;
    println!("Config saved to {}", store.path().display());
    Ok(config)
}

/// Repeat-run flow: offer per-field edits, a repository switch, or a
/// replace-vs-redirect choice when the stored folder already has files.
fn reconcile_config(mut config: Config, store: &ConfigStore) -> Result<Config> {
    if Confirm::new()
        .with_prompt("Do you want to update existing config?")
        .default(true)
        .interact()?
    {
        if prompt_update_fields(&mut config)? {
            store.save(&config)?;
            println!("Config updated.");
        }
    } else if Confirm::new()
        .with_prompt("Do you want to upload to another repo?")
        .default(true)
        .interact()?
    {
        prompt_new_target(&mut config)?;
        store.save(&config)?;
        println!("Repository info updated.");
    } else {
        // Re-validated here, never cached: the path may have gone away
        // since the config was written. If it is gone the check is
        // skipped and the pipeline runs (and fails) against it as-is.
        let folder = Path::new(&config.folder_path);
        if folder.is_dir() {
            let existing: Vec<String> = std::fs::read_dir(folder)?
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            if !existing.is_empty() {
                println!("Files already present in the folder: {:?}", existing);
                let choices = vec!["replace", "upload to another repo"];
                let selection = Select::new().items(&choices).default(0).interact()?;
                if selection == 1 {
                    prompt_new_target(&mut config)?;
                    store.save(&config)?;
                }
            }
        }
    }
    Ok(config)
}

/// Per-field yes/no edit pass. Returns whether anything changed.
fn prompt_update_fields(config: &mut Config) -> Result<bool> {
    let mut updated = false;
    if wants_update("token")? {
        config.token = Password::new().with_prompt("Enter new GitHub token").interact()?;
        updated = true;
    }
    if wants_update("username")? {
        config.username = Input::new()
            .with_prompt("Enter new value for username")
            .interact_text()?;
        updated = true;
    }
    if wants_update("repo_name")? {
        config.repo_name = Input::new()
            .with_prompt("Enter new value for repo_name")
            .interact_text()?;
        updated = true;
    }
    if wants_update("folder_path")? {
        config.folder_path = Input::new()
            .with_prompt("Enter new value for folder_path")
            .interact_text()?;
        updated = true;
    }
    if wants_update("is_public")? {
        config.is_public = Confirm::new()
            .with_prompt("Upload as public repo? (y = public, n = private)")
            .default(true)
            .interact()?;
        updated = true;
    }
    if wants_update("commit_msg")? {
        config.commit_msg = Input::new()
            .with_prompt("Enter new value for commit_msg")
            .interact_text()?;
        updated = true;
    }
    Ok(updated)
}

fn wants_update(field: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("Do you want to update {}?", field))
        .default(false)
        .interact()?)
}

/// Redirect the upload: new repository name and username, same folder and
/// credentials.
fn prompt_new_target(config: &mut Config) -> Result<()> {
    config.repo_name = Input::new()
        .with_prompt("Enter new repository name")
        .interact_text()?;
    config.username = Input::new()
        .with_prompt("Enter GitHub username")
        .interact_text()?;
    Ok(())
}

/// If the path is an existing zip archive, offer to extract it and use the
/// extracted directory downstream. On decline, or for any other path, the
/// input is returned unchanged.
fn extract_if_zip(path: &str) -> Result<String> {
    let p = Path::new(path);
    if !archive::looks_like_zip(p) {
        return Ok(path.to_string());
    }
    if Confirm::new()
        .with_prompt("Detected a zip file. Do you want to extract it?")
        .default(true)
        .interact()?
    {
        let dest = archive::extract(p)?;
        println!("Extracted to: {}", dest.display());
        return Ok(dest.display().to_string());
    }
    Ok(path.to_string())
}

/// Ensure the remote repository exists, then run the fixed git sequence
/// with a progress bar. Step failures are printed and journaled but never
/// stop the run; the session always reaches the success message.
fn provision_and_publish(client: &GithubClient, config: &Config, journal: &Journal) -> Result<()> {
    let (repo, created) = client.ensure_repo(
        &config.username,
        &config.repo_name,
        !config.is_public,
    )?;
    if created {
        println!("Repository '{}' created: {}", repo.name, repo.html_url);
    } else {
        println!("Repository '{}' already exists.", repo.name);
    }

    let remote = api::remote_url(&config.token, &config.username, &config.repo_name);
    let steps = publish::plan(Path::new(&config.folder_path), &remote, &config.commit_msg);

    let bar = ProgressBar::new(steps.len() as u64);
    bar.set_style(ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}").unwrap());
    bar.set_message("Uploading files to GitHub...");
    publish::run_pipeline(&steps, journal, |step, outcome| {
        if !outcome.success {
            bar.suspend(|| println!("Error running: {}\n{}", step.label, outcome.stderr));
        }
        bar.inc(1);
    });
    bar.finish_and_clear();

    println!("Files uploaded to GitHub successfully!");
    journal.append("Upload complete.")?;
    Ok(())
}
