//! Preview server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::Response,
    Router,
};
use tower_http::trace::TraceLayer;

use hubsite_meta::normalize_base_path;

use crate::mime::content_type;
use crate::resolve::{resolve_request_path, Resolution};

/// Configuration for the preview server.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Publish root to serve
    pub root: PathBuf,

    /// URL prefix everything is served under
    pub base_path: String,

    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Open browser on start
    pub open: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs"),
            base_path: "/hub".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            open: false,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Directory not found: {0}. Run 'hubsite build' first.")]
    MissingRoot(PathBuf),

    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server error: {0}")]
    ServeError(String),
}

/// Immutable state shared by all requests.
#[derive(Debug)]
struct ServeState {
    root: PathBuf,
    base_path: String,
}

/// Build the router serving `root` under `base_path`.
pub fn router(root: impl Into<PathBuf>, base_path: &str) -> Router {
    let state = Arc::new(ServeState {
        root: root.into(),
        base_path: normalize_base_path(base_path),
    });

    Router::new()
        .fallback(file_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Preview server.
pub struct PreviewServer {
    config: PreviewConfig,
}

impl PreviewServer {
    /// Create a new preview server.
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// URL of the hub page once the server is running.
    pub fn url(&self) -> String {
        format!(
            "http://{}:{}{}/",
            self.config.host,
            self.config.port,
            normalize_base_path(&self.config.base_path)
        )
    }

    /// Start serving; runs until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        if !self.config.root.is_dir() {
            return Err(ServerError::MissingRoot(self.config.root.clone()));
        }

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let app = router(&self.config.root, &self.config.base_path);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        let url = self.url();
        tracing::info!("Hub available at {}", url);

        if self.config.open {
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        Ok(())
    }
}

/// Fallback handler for every request.
async fn file_handler(State(state): State<Arc<ServeState>>, uri: Uri) -> Response {
    match serve(&state, &uri).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Unexpected error serving {}: {}", uri, e);
            plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Resolve and answer one request.
///
/// Any request whose path is `/` redirects to the base path, whatever its
/// query string.
async fn serve(state: &ServeState, uri: &Uri) -> Result<Response, axum::http::Error> {
    if uri.path() == "/" && !state.base_path.is_empty() {
        return Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, format!("{}/", state.base_path))
            .body(Body::empty());
    }

    let request = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let path = match resolve_request_path(request, &state.base_path, &state.root) {
        Resolution::File(path) => path,
        Resolution::OutsideBase => return Ok(not_found()),
        Resolution::Escapes => {
            tracing::warn!("Rejected path outside publish root: {}", request);
            return Ok(plain(StatusCode::BAD_REQUEST, "Invalid path"));
        }
    };

    let Some(file) = locate_file(path).await else {
        return Ok(not_found());
    };

    let data = match tokio::fs::read(&file).await {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Failed to read {}: {}", file.display(), e);
            return Ok(not_found());
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type(&file))
        .body(Body::from(data))
}

/// The file to send for `path`: the path itself, or its `index.html` when
/// it is a directory.
async fn locate_file(path: PathBuf) -> Option<PathBuf> {
    let metadata = tokio::fs::metadata(&path).await.ok()?;

    if !metadata.is_dir() {
        return Some(path);
    }

    let index = path.join("index.html");
    exists(&index).await.then_some(index)
}

async fn exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

fn not_found() -> Response {
    plain(StatusCode::NOT_FOUND, "Not found")
}

fn plain(status: StatusCode, message: &'static str) -> Response {
    let mut response = Response::new(Body::from(message));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
