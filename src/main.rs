//! gdscene - writes `.tscn` scene headers from RON scene manifests

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gdscene::config::AppConfig;
use gdscene::export::{export_manifest, render_manifest};

#[derive(Parser, Debug)]
#[command(name = "gdscene", version, about = "Generate .tscn scene headers from RON manifests")]
struct Cli {
    /// Directory holding default.toml / user.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Print the generated scenes instead of writing files
    #[arg(long, default_value = "false")]
    stdout: bool,

    /// Scene manifests to export
    #[arg(required = true)]
    manifests: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::debug!("Loaded config: {:?}", config);

    let mut failures = 0;
    for manifest in &cli.manifests {
        let result = if cli.stdout {
            render_manifest(manifest).and_then(|text| {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes())?;
                Ok(())
            })
        } else {
            export_manifest(manifest, &config.output).map(|_| ())
        };

        if let Err(e) = result {
            log::error!("{}: {}", manifest.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        log::error!("{} of {} manifests failed", failures, cli.manifests.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
