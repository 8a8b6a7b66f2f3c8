use std::time::Duration;

use tokio::{task, time::interval};

use crate::{files, AppState};

const SWEEP_INTERVAL: Duration = Duration::from_secs(600);
const STAGED_FILE_MAX_AGE: Duration = Duration::from_secs(3600);

pub fn spawn(state: AppState) {
    tracing::debug!("janitor spawned");

    task::spawn(async move {
        let mut interval = interval(SWEEP_INTERVAL);

        loop {
            interval.tick().await;
            cleanup_staged_files(&state).await;
        }
    });
}

async fn cleanup_staged_files(state: &AppState) {
    match files::disk::service::sweep_staging(&state.storage_dir, STAGED_FILE_MAX_AGE).await {
        Ok(removed) => {
            if removed > 0 {
                tracing::debug!("removed {} stale staged file(s)", removed);
            }
        }
        Err(e) => {
            tracing::error!("cleanup_staged_files: {:?}", e);
        }
    }
}
