use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging()?;

    let mut options = agentlens_tui::RunOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--server" => {
                options.server_url = Some(
                    args.next()
                        .context("--server requires a URL argument")?,
                );
            }
            "--help" | "-h" => {
                println!("Usage: agentlens [--server URL]");
                println!();
                println!("Config: ~/.config/agentlens/agentlens.toml or ./agentlens.toml");
                println!("Env:    AGENTLENS_SERVER  override server URL");
                println!("        AGENTLENS_LOG     write tracing output to this file");
                return Ok(());
            }
            other => {
                anyhow::bail!("unknown argument: {other}");
            }
        }
    }

    agentlens_tui::run(options)
}

/// Route tracing output to a file when `AGENTLENS_LOG` is set. stderr belongs
/// to the alternate screen, so without a target file logging stays off.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("AGENTLENS_LOG") else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}
