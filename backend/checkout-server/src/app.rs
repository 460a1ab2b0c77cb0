use std::{future::Future, net, sync::Arc};

use axum::{
    extract::{MatchedPath, Request},
    http,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use common_utils::consts;
use domain_types::checkout::CheckoutOptions;
use shared_metrics as metrics;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::watch,
};
use tower_http::{request_id::MakeRequestUuid, trace as tower_trace};

use crate::{
    configs,
    error::{ApiErrorResponse, ConfigurationError},
    logger, server, utils,
};

/// Shutdown notification shared by every server of the process.
///
/// A single OS signal resolves every clone, so the checkout and metrics servers stop together.
#[derive(Debug, Clone)]
pub struct ShutdownSignal(watch::Receiver<bool>);

impl ShutdownSignal {
    /// Manually triggered signal; sending `true` on the returned sender shuts down every clone.
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self(rx))
    }

    /// Resolves once shutdown was requested, or the sender went away.
    pub async fn recv(mut self) {
        if self.0.wait_for(|requested| *requested).await.is_err() {
            logger::warn!("shutdown sender dropped, stopping");
        }
    }
}

/// Installs handlers for SIGINT, SIGTERM, SIGQUIT and SIGHUP and returns the signal that the
/// first of them to arrive triggers.
pub fn listen_for_signals() -> Result<ShutdownSignal, ConfigurationError> {
    let mut sig_int = signal(SignalKind::interrupt())?;
    let mut sig_term = signal(SignalKind::terminate())?;
    let mut sig_quit = signal(SignalKind::quit())?;
    let mut sig_hup = signal(SignalKind::hangup())?;

    let (tx, shutdown) = ShutdownSignal::channel();

    tokio::spawn(async move {
        let received = tokio::select! {
            _ = sig_int.recv() => "SIGINT",
            _ = sig_term.recv() => "SIGTERM",
            _ = sig_quit.recv() => "SIGQUIT",
            _ = sig_hup.recv() => "SIGHUP",
        };
        logger::info!(signal = received, "shutdown signal received");
        tx.send_replace(true);
    });

    Ok(shutdown)
}

pub async fn server_builder(
    config: configs::Config,
    shutdown: ShutdownSignal,
) -> Result<(), ConfigurationError> {
    let socket_addr = config.server.socket_addr()?;
    let service = Service::new(&config.gateways);

    logger::info!(
        %socket_addr,
        card_gateway = ?service.checkout_options.card_gateway(),
        "starting checkout service"
    );

    service.http_server(socket_addr, shutdown.recv()).await
}

pub struct Service {
    pub checkout_options: Arc<CheckoutOptions>,
}

impl Service {
    pub fn new(gateways: &configs::Gateways) -> Self {
        Self {
            checkout_options: Arc::new(CheckoutOptions::from_enabled(&gateways.enabled)),
        }
    }

    pub fn router(&self) -> axum::Router {
        let logging_layer = tower_trace::TraceLayer::new_for_http()
            .make_span_with(|request: &Request| utils::request_span(request))
            .on_request(tower_trace::DefaultOnRequest::new().level(tracing::Level::INFO))
            .on_response(
                tower_trace::DefaultOnResponse::new()
                    .level(tracing::Level::INFO)
                    .latency_unit(tower_http::LatencyUnit::Micros),
            )
            .on_failure(
                tower_trace::DefaultOnFailure::new()
                    .latency_unit(tower_http::LatencyUnit::Micros)
                    .level(tracing::Level::ERROR),
            );

        let request_id_layer = tower_http::request_id::SetRequestIdLayer::new(
            http::HeaderName::from_static(consts::X_REQUEST_ID),
            MakeRequestUuid,
        );

        let propagate_request_id_layer = tower_http::request_id::PropagateRequestIdLayer::new(
            http::HeaderName::from_static(consts::X_REQUEST_ID),
        );

        axum::Router::new()
            .route("/health", get(server::health_check::health))
            .route("/gateways", get(server::gateways::list))
            .route("/gateways/{gateway_id}", get(server::gateways::describe))
            .route(
                "/gateways/{gateway_id}/resolve",
                get(server::gateways::resolve),
            )
            .route("/checkout/options", get(server::checkout::options))
            .route_layer(middleware::from_fn(count_requests))
            .fallback(|uri: http::Uri| async move { ApiErrorResponse::not_found(uri.path()) })
            .with_state(Arc::clone(&self.checkout_options))
            .layer(logging_layer)
            .layer(propagate_request_id_layer)
            .layer(request_id_layer)
    }

    pub async fn http_server(
        self,
        socket: net::SocketAddr,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), ConfigurationError> {
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(socket).await?;

        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

async fn count_requests(request: Request, next: Next) -> Response {
    if let Some(path) = request.extensions().get::<MatchedPath>() {
        metrics::http_requests_total
            .with_label_values(&[path.as_str()])
            .inc();
    }
    next.run(request).await
}

pub async fn metrics_server_builder(
    config: configs::Config,
    shutdown: ShutdownSignal,
) -> Result<(), ConfigurationError> {
    let listener = config.metrics.tcp_listener().await?;
    metrics_server(listener, shutdown).await
}

pub async fn metrics_server(
    listener: tokio::net::TcpListener,
    shutdown: ShutdownSignal,
) -> Result<(), ConfigurationError> {
    let router = axum::Router::new().route(
        "/metrics",
        get(|| async {
            let output = metrics::metrics_handler().await;
            match output {
                Ok(metrics) => Ok(metrics),
                Err(error) => {
                    tracing::error!(?error, "Error fetching metrics");

                    Err((
                        http::StatusCode::INTERNAL_SERVER_ERROR,
                        "Error fetching metrics".to_string(),
                    ))
                }
            }
        }),
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown.recv().await;
            logger::info!("metrics server shutting down");
        })
        .await?;

    Ok(())
}
