use tracing::{error, info};

use chatrelay::{Config, Coordinator, HttpDeliverer, RelayServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = chatrelay::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        chatrelay::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    let deliverer = match HttpDeliverer::new(&config.dispatch) {
        Ok(deliverer) => deliverer,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let (coordinator, _dispatcher) = Coordinator::start(config.dispatch.queue_capacity, deliverer);

    let server = match RelayServer::bind(&config.server, coordinator).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to listen on {}: {}", config.server.bind_addr(), e);
            std::process::exit(1);
        }
    };

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutting down");
    };

    if let Err(e) = server.run_until(shutdown).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
