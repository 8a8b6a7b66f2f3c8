use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

#[macro_use]
extern crate lazy_static;

use tracing_subscriber::EnvFilter;

use crate::{
    app::{env::Envy, router::create_router, util::janitor},
    files::models::upload_policy::UploadPolicy,
};

mod app;
mod files;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub storage_dir: Arc<PathBuf>,
    pub upload_policy: Arc<UploadPolicy>,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("filedrop_api=debug,tower_http=info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // storage
    let storage_dir = envy.storage_dir();
    files::disk::service::prepare(&storage_dir)
        .await
        .expect("failed to prepare storage directory");

    tracing::info!(
        app_env = %envy.app_env,
        storage_dir = %storage_dir.display(),
        max_upload_size = envy.max_upload_size(),
        allowed_mime_types = ?envy.allowed_mime_types(),
        "storage ready"
    );

    let state = AppState {
        storage_dir: Arc::new(storage_dir),
        upload_policy: Arc::new(UploadPolicy::from_envy(&envy)),
        envy: Arc::new(envy),
    };

    janitor::spawn(state.clone());

    // app
    let port = state.envy.port();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(%e, "failed to listen for shutdown signal");
        return;
    }

    tracing::info!("shutting down");
}
