use crate::catalog::CatalogState;
use crate::library::Library;

use log::{debug, error, info};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};

/// Events arriving within this window trigger a single reload.
const SETTLE_TIME: Duration = Duration::from_millis(500);

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Rebuilds the whole catalog whenever something under the trips folder changes.
pub async fn trips_watcher(library: Arc<Library>, state: Arc<Mutex<CatalogState>>) {
    let Some(directory) = library.watch_dir() else {
        debug!("Trips are not local, nothing to watch");
        return;
    };

    let (tx, mut rx) = tokio::sync::mpsc::channel(100);
    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            if let Err(e) = tx.blocking_send(res) {
                error!("Failed to send watch event to async channel: {:?}", e);
            }
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Error creating watcher: {:?}", e);
            return;
        }
    };

    if let Err(err) = watcher.watch(&directory, RecursiveMode::Recursive) {
        error!("Error watching directory {:#?} => {}", &directory, err);
        return;
    }
    info!("Watching {:?} for trip changes", directory);

    while let Some(res) = rx.recv().await {
        match res {
            Ok(event) if is_relevant(&event.kind) => {
                sleep(SETTLE_TIME).await;
                while rx.try_recv().is_ok() {}

                info!("Trips folder changed, reloading catalog");
                library.reload(&state).await;
            }
            Ok(_) => {}
            Err(error) => error!("Watcher error: {:?}", error),
        }
    }

    debug!("Trips watcher stopped.");
}
