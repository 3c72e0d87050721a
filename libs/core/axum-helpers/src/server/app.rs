use super::shutdown::ShutdownCoordinator;
use axum::Router;
use std::future::IntoFuture;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

/// How the in-flight requests ended once shutdown began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every open connection finished before the deadline
    Clean,
    /// The drain deadline passed with connections still open
    TimedOut,
}

/// Request tracing layer shared by all services.
pub fn trace_layer<B>(router: Router<B>) -> Router<B>
where
    B: Clone + Send + Sync + 'static,
{
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

/// Serves `router` on `listener` until `coordinator` signals shutdown, then
/// drains.
///
/// Once shutdown begins the listener stops accepting and open connections
/// get up to `drain_timeout` to finish. The returned [`DrainOutcome`] says
/// whether they made it; I/O errors from the server are returned as-is.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::{ShutdownCoordinator, serve_until_shutdown};
///
/// let coordinator = ShutdownCoordinator::new();
/// coordinator.listen_for_signals();
///
/// let listener = tokio::net::TcpListener::bind(config.address()).await?;
/// let outcome = serve_until_shutdown(listener, router, &coordinator, Duration::from_secs(3)).await?;
/// ```
pub async fn serve_until_shutdown(
    listener: TcpListener,
    router: Router,
    coordinator: &ShutdownCoordinator,
    drain_timeout: Duration,
) -> io::Result<DrainOutcome> {
    info!("Server listening on {}", listener.local_addr()?);

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinator.cancelled())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e))?;
            return Ok(DrainOutcome::Clean);
        }
        _ = coordinator.cancelled() => {}
    }

    info!(?drain_timeout, "Stopped accepting connections, draining in-flight requests");

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(result) => {
            result.inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e))?;
            info!("All in-flight requests completed");
            Ok(DrainOutcome::Clean)
        }
        Err(_) => {
            warn!(
                "Drain exceeded timeout of {:?}, abandoning open connections",
                drain_timeout
            );
            Ok(DrainOutcome::TimedOut)
        }
    }
}
