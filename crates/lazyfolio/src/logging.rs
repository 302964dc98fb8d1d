use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log files above this size are cut down before appending (2 MB)
const MAX_LOG_SIZE: u64 = 2 * 1024 * 1024;
/// Tail kept after a cut (512 KB)
const KEEP_SIZE: u64 = 512 * 1024;

/// Drop everything but the last `keep` bytes once the file grows past `max`.
///
/// The kept tail starts at a line boundary.
fn truncate_log(log_path: &Path, max: u64, keep: u64) -> std::io::Result<()> {
    let Ok(metadata) = fs::metadata(log_path) else {
        return Ok(());
    };
    if metadata.len() <= max {
        return Ok(());
    }

    let mut tail = Vec::new();
    {
        let mut file = File::open(log_path)?;
        file.seek(SeekFrom::Start(metadata.len().saturating_sub(keep)))?;
        file.read_to_end(&mut tail)?;
    }
    let skip = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- earlier entries truncated ---\n")?;
    file.write_all(&tail[skip..])?;
    Ok(())
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lazyfolio={level},lazyfolio_core=warn")))
}

/// Install the global tracing subscriber.
///
/// Without `log_file`, events go to stderr so they never mix with report
/// output on stdout. With a file, events are appended to it and the file is
/// truncated to its most recent entries when it grows too large. `RUST_LOG`
/// overrides `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            if let Err(e) = truncate_log(path, MAX_LOG_SIZE, KEEP_SIZE) {
                eprintln!("Warning: failed to truncate log file: {e}");
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .init();
            tracing::debug!(log_path = %path.display(), "logging to file");
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_recent_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lazyfolio.log");
        let body: String = (0..200).map(|i| format!("line {i:03}\n")).collect();
        fs::write(&path, &body).unwrap();

        truncate_log(&path, 100, 50).unwrap();

        let trimmed = fs::read_to_string(&path).unwrap();
        let mut lines = trimmed.lines();
        assert_eq!(lines.next(), Some("--- earlier entries truncated ---"));
        assert!(lines.clone().all(|l| l.starts_with("line ")));
        assert_eq!(lines.last(), Some("line 199"));
        assert!(trimmed.len() < body.len());
    }

    #[test]
    fn test_truncate_leaves_small_or_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.log");
        truncate_log(&path, 100, 50).unwrap();
        assert!(!path.exists());

        fs::write(&path, "short\n").unwrap();
        truncate_log(&path, 100, 50).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }
}
