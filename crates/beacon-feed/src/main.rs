//! beacon-feed entrypoint.
//!
//! Polls a telemetry snapshot file on the configured interval, merges it into
//! a scene and advances frames until Ctrl-C. Logs go to stderr; with `--emit`
//! the scene view is written to stdout as one JSON line per second.

mod feed;
mod source;

use anyhow::Context;
use beacon_track::{Config, Scene};

use feed::Feed;
use source::FileSource;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <path>] [--emit] <snapshot-path>\n\n--config loads a JSON config (missing fields use defaults).\n--emit prints the scene view as JSON lines on stdout."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<String>,
    emit: bool,
    snapshot: String,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut config = None;
    let mut emit = false;
    let mut snapshot = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if config.is_some() {
                    return Err(());
                }
                config = Some(args.next().ok_or(())?);
            }
            "--emit" => {
                if emit {
                    return Err(());
                }
                emit = true;
            }
            flag if flag.starts_with("--") => return Err(()),
            path => {
                if snapshot.is_some() {
                    return Err(());
                }
                snapshot = Some(path.to_string());
            }
        }
    }

    Ok(CliOptions {
        config,
        emit,
        snapshot: snapshot.ok_or(())?,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for --emit
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "beacon-feed".to_string());
    let Ok(options) = parse_options(args) else {
        print_usage(&program);
        std::process::exit(2);
    };

    let config = match &options.config {
        Some(path) => Config::from_path(path).with_context(|| format!("loading config {path}"))?,
        None => Config::default(),
    };
    let scene = Scene::new(config).context("building scene")?;

    tracing::info!(snapshot = %options.snapshot, "polling");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("listening for ctrl-c: {e}");
        }
    };
    let feed = Feed::new(scene, FileSource::new(options.snapshot))
        .with_emit(options.emit)
        .run(shutdown)
        .await;
    tracing::info!(known = feed.scene().table().known(), "final distance table:\n{}", feed.scene().table());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn snapshot_path_is_required() {
        assert_eq!(parse(&[]), Err(()));
        assert_eq!(parse(&["--emit"]), Err(()));
    }

    #[test]
    fn parses_all_flags() {
        assert_eq!(
            parse(&["--config", "cfg.json", "--emit", "data.json"]),
            Ok(CliOptions {
                config: Some("cfg.json".into()),
                emit: true,
                snapshot: "data.json".into(),
            })
        );
    }

    #[test]
    fn rejects_repeats_and_unknown_flags() {
        assert_eq!(parse(&["a.json", "b.json"]), Err(()));
        assert_eq!(parse(&["--emit", "--emit", "a.json"]), Err(()));
        assert_eq!(parse(&["--verbose", "a.json"]), Err(()));
        assert_eq!(parse(&["a.json", "--config"]), Err(()));
    }
}
