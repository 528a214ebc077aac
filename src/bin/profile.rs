use mazeswarm::{app::App, config::Config};

fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let n_executions = args.next().and_then(|arg| arg.parse::<usize>().ok());

    // Headless paired runs with fresh seeds each iteration
    let config = Config {
        n_executions: n_executions.unwrap_or(5),
        show_steps: false,
        ..Config::default()
    };

    App::new(config, std::env::temp_dir().join("mazeswarm-profile")).run()
}
