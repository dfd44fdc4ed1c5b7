//! Booking gRPC Service
//!
//! Serves the book catalog over gRPC and over an HTTP/JSON gateway
//! transcoding the same `BookingService` methods.
//!
//! ## Features
//!
//! - Create, read, update and delete books
//! - In-memory or `PostgreSQL` storage
//! - HTTP/JSON gateway with `google.rpc.Status` errors
//! - gRPC reflection support
//! - Structured logging and tracing

use std::{future::Future, sync::Arc};

use booking_api::{
    proto::booking_service_server::{BookingService, BookingServiceServer},
    schema::descriptor::file_descriptor_set,
};
use booking_service::{
    config::AppConfig,
    create_book_repository, create_book_service,
    error::{AppError, AppResult},
    gateway,
    tracing::tracer::Tracer,
};
use tokio::{net::TcpListener, sync::watch};
use tonic::transport::Server;
use tracing::{error, info};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::get()?;

    Tracer::install(config)?;

    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or("unknown"),
    );

    start(config).await?;

    Ok(())
}

async fn start(config: &AppConfig) -> AppResult<()> {
    let book_repository = create_book_repository(&config.database).await?;
    let book_adapter = Arc::new(create_book_service(book_repository));

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutting down"),
            Err(err) => error!("failed to listen for shutdown signal: {err}"),
        }
        drop(shutdown_tx);
    });

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_file_descriptor_set(file_descriptor_set())
        .build_v1()?;
    // Some clients only work with v1alpha
    let reflection_service_v1alpha = tonic_reflection::server::Builder::configure()
        .register_file_descriptor_set(file_descriptor_set())
        .build_v1alpha()?;

    let grpc_server = Server::builder()
        .add_service(reflection_service)
        .add_service(reflection_service_v1alpha)
        .add_service(BookingServiceServer::from_arc(Arc::clone(&book_adapter)))
        .serve_with_shutdown(config.server.grpc_address, shutdown(shutdown_rx.clone()));
    info!("gRPC server started at {}", config.server.grpc_address);

    let http_listener = TcpListener::bind(config.server.http_address).await?;
    let booking_service: Arc<dyn BookingService> = book_adapter;
    let gateway_server = gateway::serve(http_listener, booking_service, shutdown(shutdown_rx));

    tokio::try_join!(
        async { grpc_server.await.map_err(AppError::from) },
        gateway_server,
    )?;

    Ok(())
}

/// Resolves once the shutdown sender is dropped.
fn shutdown(mut shutdown_rx: watch::Receiver<()>) -> impl Future<Output = ()> + Send + 'static {
    async move {
        // Only closing the channel is ever signalled.
        while shutdown_rx.changed().await.is_ok() {}
    }
}
