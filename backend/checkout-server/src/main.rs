use checkout_server::{self, app, configs, logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = configs::Config::new()?;

    let _guard = logger::setup(
        &config.log,
        checkout_server::service_name!(),
        [checkout_server::service_name!(), "tower_http"],
    )?;

    let shutdown = app::listen_for_signals()?;
    let metrics_server = app::metrics_server_builder(config.clone(), shutdown.clone());
    let server = app::server_builder(config, shutdown);

    tokio::try_join!(metrics_server, server)?;

    Ok(())
}
