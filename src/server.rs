//! HTTP request handler
//!
//! One inbound operation runs tasks (`POST /run?task=...`), one reads raw
//! file contents from the data directory (`GET /read?path=...`), plus the
//! usual liveness and documentation routes. Task execution is serialized
//! behind a mutex: the data directory has no file locking, so concurrent
//! mutation is excluded by construction.

use crate::error::AgentError;
use crate::routing::TaskMatcher;
use crate::tasks::TaskCatalog;
use crate::workspace::Workspace;
use serde::Serialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::{info, warn, Instrument};
use warp::http::StatusCode;
use warp::reply::Reply;
use warp::Filter;

/// HTTP agent server state
pub struct AgentServer {
    agent_id: String,
    matcher: TaskMatcher,
    catalog: TaskCatalog,
    workspace: Workspace,
    run_lock: Mutex<()>,
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    status: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    agent_id: String,
    timestamp: u64,
}

impl AgentServer {
    pub fn new(
        agent_id: String,
        matcher: TaskMatcher,
        catalog: TaskCatalog,
        workspace: Workspace,
    ) -> Self {
        Self {
            agent_id,
            matcher,
            catalog,
            workspace,
            run_lock: Mutex::new(()),
        }
    }

    /// Build the full route tree
    pub fn routes(
        self: &Arc<Self>,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let run_server = self.clone();
        let read_server = self.clone();
        let health_server = self.clone();
        let root_server = self.clone();

        // POST /run?task=... - classify and execute one task
        let run_route = warp::path("run")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::query::<HashMap<String, String>>())
            .and_then(move |params: HashMap<String, String>| {
                let server = run_server.clone();
                async move { Ok::<_, Infallible>(server.handle_run(params).await) }
            });

        // GET /read?path=... - raw file contents from the data directory
        let read_route = warp::path("read")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<HashMap<String, String>>())
            .and_then(move |params: HashMap<String, String>| {
                let server = read_server.clone();
                async move { Ok::<_, Infallible>(server.handle_read(params).await) }
            });

        // GET /health - liveness for operators
        let health_route = warp::path("health").and(warp::get()).and_then(move || {
            let server = health_server.clone();
            async move {
                let response = HealthResponse {
                    status: "ok",
                    agent_id: server.agent_id.clone(),
                    timestamp: current_timestamp(),
                };
                Ok::<_, Infallible>(warp::reply::json(&response))
            }
        });

        // GET / - API documentation
        let root_route = warp::path::end().and(warp::get()).and_then(move || {
            let _server = root_server.clone();
            async move {
                let mut endpoints = HashMap::new();
                endpoints.insert(
                    "POST /run?task=...".to_string(),
                    "Classify a task description and run the matching operation".to_string(),
                );
                endpoints.insert(
                    "GET /read?path=...".to_string(),
                    "Read raw file contents from the data directory".to_string(),
                );
                endpoints.insert("GET /health".to_string(), "Liveness status".to_string());

                Ok::<_, Infallible>(warp::reply::json(&endpoints))
            }
        });

        run_route.or(read_route).or(health_route).or(root_route)
    }

    async fn handle_run(&self, params: HashMap<String, String>) -> warp::reply::Response {
        let Some(task) = params.get("task").map(String::as_str).filter(|t| !t.is_empty())
        else {
            return error_reply(StatusCode::BAD_REQUEST, "Task description is required.");
        };

        let Some(route) = self.matcher.classify(task) else {
            let error = AgentError::unsupported(task);
            warn!(task, "no catalog rule matched task description");
            return error_reply(error.status_code(), &error.user_message());
        };

        // Serialize execution: operations share the data directory with no
        // locking of their own.
        let _guard = self.run_lock.lock().await;

        let execution = self
            .catalog
            .run(&route, &self.workspace)
            .instrument(crate::task_span!(operation = ?route.operation));

        match execution.await {
            Ok(message) => {
                info!(operation = ?route.operation, "task completed");
                success_reply(&message)
            }
            Err(error) => {
                warn!(operation = ?route.operation, error = %error, "task failed");
                error_reply(error.status_code(), &error.user_message())
            }
        }
    }

    async fn handle_read(&self, params: HashMap<String, String>) -> warp::reply::Response {
        let Some(path) = params.get("path").filter(|p| !p.is_empty()) else {
            return error_reply(StatusCode::BAD_REQUEST, "File path is required.");
        };

        // Containment violations are a client error, not an internal one
        let resolved = match self.workspace.resolve(path) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!(path, "rejected read outside the data directory");
                return error_reply(StatusCode::BAD_REQUEST, &error.user_message());
            }
        };

        if !resolved.is_file() {
            return error_reply(StatusCode::NOT_FOUND, "File not found.");
        }

        match std::fs::read_to_string(&resolved) {
            Ok(content) => warp::reply::with_status(content, StatusCode::OK).into_response(),
            Err(e) => {
                warn!(path, error = %e, "failed to read requested file");
                error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file.")
            }
        }
    }
}

fn success_reply(message: &str) -> warp::reply::Response {
    let body = SuccessResponse {
        status: "success",
        message: message.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), StatusCode::OK).into_response()
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::Response {
    let body = ErrorResponse {
        error: message.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
