use std::path::PathBuf;

use mazeswarm::{app::App, config::Config};

fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config/default.json"));

    let results_dir = PathBuf::from("results");
    std::fs::create_dir_all(&results_dir)?;

    // Log to a file so log lines never tear through the maze animation.
    let file_appender = tracing_appender::rolling::never(&results_dir, "mazeswarm.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let config = Config::load(&config_path)?;
    tracing::info!(?config, "loaded configuration");

    App::new(config, results_dir).run()
}
