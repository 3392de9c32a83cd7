use crate::config::DocumentConfig;
use crate::extraction::ExtractorRegistry;
use crate::handlers;
use crate::services::{
    ChatEngine, DocumentStore, InMemoryDocumentStore, LocalStorage, Storage, StubChatEngine,
};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Headroom over the file size limit for multipart boundaries and part headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: DocumentConfig,
    pub store: Arc<dyn DocumentStore>,
    pub storage: Arc<dyn Storage>,
    pub extractors: Arc<ExtractorRegistry>,
    pub chat: Arc<dyn ChatEngine>,
}

impl AppState {
    /// In-memory store, local upload directory and the stub chat engine.
    pub async fn from_config(config: DocumentConfig) -> Result<Self, AppError> {
        let storage: Arc<dyn Storage> = Arc::new(
            LocalStorage::new(&config.storage.upload_dir)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to initialize upload directory at {}: {}",
                        config.storage.upload_dir,
                        e
                    );
                    e
                })?,
        );

        Ok(Self {
            config,
            store: Arc::new(InMemoryDocumentStore::new()),
            storage,
            extractors: Arc::new(ExtractorRegistry::new()),
            chat: Arc::new(StubChatEngine),
        })
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.limits.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/v1/documents", get(handlers::list_documents))
        .route("/api/v1/documents/", get(handlers::list_documents))
        .route(
            "/api/v1/documents/upload",
            post(handlers::upload_document).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/v1/documents/:id",
            get(handlers::get_document).delete(handlers::delete_document),
        )
        .route("/api/v1/chat", post(handlers::chat))
        .route("/api/v1/chat/", post(handlers::chat))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    pub async fn build(config: DocumentConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config).await?;
        Self::with_state(state).await
    }

    /// Binds the configured port (0 picks a free one) and wires the routes.
    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            upload_dir = %state.config.storage.upload_dir,
            max_upload_bytes = state.config.limits.max_upload_bytes,
            "Listening"
        );

        Ok(Self {
            port,
            listener,
            router: router(state.clone()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.state.config.storage.upload_dir)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
