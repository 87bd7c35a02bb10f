//! Process lifecycle control.
//!
//! Startup: bind the listening socket, then begin serving.
//! Shutdown: SIGTERM/SIGINT → stop accepting → drain in-flight requests
//! (bounded by the configured timeout) → close the socket.
//!
//! The listening socket is owned by [`ProcessLifecycle`] for the entire
//! run; signal delivery is translated into calls on this object rather
//! than ambient global handlers. Escaped panics bypass the drain entirely
//! and terminate the process with exit code 1.

use std::io;
use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle};
use actix_web::web::Data;
use actix_web::{App, HttpServer, web};
use tokio::sync::watch;
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::errors;
use crate::middleware;
use crate::openapi::{DOCS_MOUNT, DOCS_PATH, DOCS_SPEC_URL};
use crate::routes;

/// Observable server states. `Crashed` is terminal and reachable from any
/// other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Listening,
    ShuttingDown,
    Stopped,
    Crashed,
}

/// # Process Lifecycle Controller
///
/// Owns the bound server for its entire run. Constructed once at startup
/// via [`ProcessLifecycle::bind`]; [`ProcessLifecycle::run`] serves until a
/// termination signal or a socket error ends the process.
///
/// State transitions are published on a watch channel so tests and
/// embedders can observe `Starting → Listening → ShuttingDown → Stopped`
/// (or `Crashed`).
pub struct ProcessLifecycle {
    config: AppConfig,
    docs_mounted: bool,
    server: Server,
    state: Arc<watch::Sender<LifecycleState>>,
}

/// Cloneable handle for triggering shutdown from outside the run loop.
#[derive(Clone)]
pub struct LifecycleHandle {
    server: ServerHandle,
    state: Arc<watch::Sender<LifecycleState>>,
}

impl LifecycleHandle {
    /// Stop accepting new connections and drain in-flight requests, then
    /// close the socket. `reason` names the trigger in the log.
    pub async fn shutdown(&self, reason: &str) {
        tracing::info!("{reason} received. Shutting down gracefully");
        self.state.send_replace(LifecycleState::ShuttingDown);
        self.server.stop(true).await;
    }
}

impl ProcessLifecycle {
    /// Assemble the request pipeline and bind the listening socket.
    ///
    /// Pipeline order: body-decoding limits, security headers, access
    /// logging, documentation mount (only when a document was loaded),
    /// route dispatch, catch-all not-found responder. Framework signal
    /// handling is disabled; signals are observed by [`Self::run`].
    pub fn bind(config: AppConfig, document: Option<OpenApi>) -> io::Result<Self> {
        let docs_mounted = document.is_some();
        let app_config = config.clone();

        let server = HttpServer::new(move || {
            let app = App::new()
                .app_data(Data::new(app_config.clone()))
                .app_data(errors::json_config())
                .app_data(errors::form_config())
                .wrap(middleware::AccessLog)
                .wrap(middleware::security_headers())
                .configure(routes::configure)
                .default_service(web::route().to(routes::not_found));

            match &document {
                Some(doc) => {
                    app.service(SwaggerUi::new(DOCS_MOUNT).url(DOCS_SPEC_URL, doc.clone()))
                }
                None => app,
            }
        })
        .disable_signals()
        .shutdown_timeout(config.shutdown_timeout.as_secs())
        .bind(("0.0.0.0", config.port))?
        .run();

        let (state, _) = watch::channel(LifecycleState::Starting);

        Ok(Self {
            config,
            docs_mounted,
            server,
            state: Arc::new(state),
        })
    }

    /// Subscribe to state transitions.
    pub fn state(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    pub fn handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            server: self.server.handle(),
            state: Arc::clone(&self.state),
        }
    }

    /// Serve until shutdown. Emits the startup summary, watches for
    /// termination signals, and awaits the server: a clean close exits
    /// `Stopped`, a socket error exits `Crashed` with the error propagated
    /// to the caller.
    pub async fn run(self) -> io::Result<()> {
        let handle = self.handle();
        let Self {
            config,
            docs_mounted,
            server,
            state,
        } = self;

        state.send_replace(LifecycleState::Listening);
        tracing::info!(
            port = config.port,
            environment = %config.environment,
            "Server running"
        );
        tracing::info!("Health check: http://localhost:{}/api/health", config.port);
        if docs_mounted {
            tracing::info!(
                "API documentation: http://localhost:{}{}",
                config.port,
                DOCS_PATH
            );
        }

        // One-shot: a second signal while already draining is not observed.
        actix_web::rt::spawn(async move {
            let signal = termination_signal().await;
            handle.shutdown(signal).await;
        });

        match server.await {
            Ok(()) => {
                state.send_replace(LifecycleState::Stopped);
                tracing::info!("Shutdown complete");
                Ok(())
            }
            Err(err) => {
                state.send_replace(LifecycleState::Crashed);
                tracing::error!(error = %err, "Server socket closed with an error");
                Err(err)
            }
        }
    }
}

/// Install a process-wide panic hook: log the panic with full detail and
/// exit 1 immediately, skipping the drain. An escaped panic means the
/// process state is untrustworthy, so it is never treated as an
/// operational condition.
pub fn install_crash_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Unrecoverable panic, terminating");
        default_hook(info);
        std::process::exit(1);
    }));
}

async fn termination_signal() -> &'static str {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_config() -> AppConfig {
        AppConfig {
            port: 0,
            environment: "test".to_string(),
            openapi_path: PathBuf::from("openapi.json"),
            shutdown_timeout: Duration::from_secs(1),
        }
    }

    #[actix_web::test]
    async fn test_graceful_shutdown_reaches_stopped() {
        let lifecycle = ProcessLifecycle::bind(test_config(), None).unwrap();
        let mut state = lifecycle.state();
        let handle = lifecycle.handle();

        assert_eq!(*state.borrow(), LifecycleState::Starting);

        let server = actix_web::rt::spawn(lifecycle.run());

        // Wait for the Listening transition
        state.changed().await.unwrap();
        assert_eq!(*state.borrow_and_update(), LifecycleState::Listening);

        // Graceful trigger while idle: socket closes, run returns Ok
        handle.shutdown("test signal").await;
        let result = server.await.expect("server task should not panic");
        assert!(result.is_ok());
        assert_eq!(*state.borrow(), LifecycleState::Stopped);
    }

    #[actix_web::test]
    async fn test_bind_reports_occupied_port() {
        let listener = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
        let occupied = listener.local_addr().unwrap().port();

        let mut config = test_config();
        config.port = occupied;

        assert!(ProcessLifecycle::bind(config, None).is_err());
    }
}
