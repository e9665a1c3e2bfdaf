use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vikey::{Config, InputMethod, InputSession, TextField};

/// Type Vietnamese with Telex, VNI or VIQR keystrokes.
#[derive(Parser, Debug)]
#[command(name = "vikey", version)]
struct Cli {
    /// telex, vni or viqr (overrides the config file)
    #[arg(short, long)]
    method: Option<InputMethod>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leave emails, URLs and identifiers alone
    #[arg(long)]
    skip_code: bool,

    /// Keystrokes to type; stdin is read line by line when absent
    text: Vec<String>,
}

// Same as an editor would see it: one input event per key.
fn type_line(session: &InputSession, line: &str) -> String {
    let mut field = TextField::default();
    for key in line.chars() {
        session.feed(&mut field, key);
    }
    field.value().to_string()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(method) = cli.method {
        config.input_method = method;
    }
    if cli.skip_code {
        config.skip_code_like = true;
    }
    tracing::info!(method = %config.input_method, enabled = config.enabled, "session ready");

    let session = InputSession::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.text.is_empty() {
        writeln!(out, "{}", type_line(&session, &cli.text.join(" ")))?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        writeln!(out, "{}", type_line(&session, &line))?;
        out.flush()?;
    }
    Ok(())
}
