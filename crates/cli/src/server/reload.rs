use anyhow::Context;
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use udns_application::use_cases::ReloadConfigUseCase;

const RELOAD_DEBOUNCE: Duration = Duration::from_millis(500);

/// Re-applies the config file whenever it changes on disk.
///
/// The parent directory is watched rather than the file so that editors
/// which replace the file on save keep triggering reloads. The returned
/// debouncer must be kept alive.
pub fn watch_config(
    path: PathBuf,
    reload: Arc<ReloadConfigUseCase>,
) -> anyhow::Result<Debouncer<RecommendedWatcher>> {
    let (tx, rx) = channel();

    let mut debouncer =
        new_debouncer(RELOAD_DEBOUNCE, tx).context("Failed to create config watcher")?;

    let watch_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", watch_dir.display()))?;

    let file_name = path.file_name().map(|name| name.to_os_string());
    let config_path = path.to_string_lossy().into_owned();

    std::thread::Builder::new()
        .name("udns-config-watch".to_string())
        .spawn(move || {
            for result in rx {
                match result {
                    Ok(events) => {
                        let touched = events
                            .iter()
                            .any(|event| event.path.file_name() == file_name.as_deref());
                        if !touched {
                            continue;
                        }

                        if let Err(e) = reload.execute(&config_path) {
                            warn!(error = %e, path = %config_path, "Config reload rejected, keeping previous configuration");
                        }
                    }
                    Err(error) => {
                        warn!(error = %error, "Config watch error");
                    }
                }
            }
        })
        .context("Failed to spawn config watcher thread")?;

    info!(path = %path.display(), "Watching configuration for changes");

    Ok(debouncer)
}
