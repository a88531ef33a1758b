fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()?;

    let channels = luxe_bridge::BridgeChannels::default();
    let backend = luxe_backend::run(channels.backend_rx, channels.backend_tx);
    luxe_console::run(channels.frontend_rx, channels.frontend_tx)?;

    // closing the bridge stops the backend loop
    if backend.join().is_err() {
        log::error!("Backend thread panicked");
    }
    Ok(())
}
