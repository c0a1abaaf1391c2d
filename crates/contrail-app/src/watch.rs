//! Hot reload: polls the config file and forwards changed configs to the preview.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime};

use contrail_core::SceneConfig;
use contrail_ui::PreviewCommand;
use crossbeam_channel::Sender;
use tracing::{info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Runs until the preview drops its command receiver.
pub fn spawn_config_watcher(
    path: PathBuf,
    command_sender: Sender<PreviewCommand>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let mut last_seen = modified(&path);
        info!("Watching {} for config changes", path.display());
        loop {
            std::thread::sleep(POLL_INTERVAL);
            let current = modified(&path);
            if current == last_seen {
                continue;
            }
            last_seen = current;
            match SceneConfig::load(&path) {
                Ok(config) => {
                    if command_sender.send(PreviewCommand::Reload(config)).is_err() {
                        break;
                    }
                }
                Err(err) => warn!("config change ignored: {err}"),
            }
        }
        info!("Config watcher stopped");
    })
}
