use tracing::{error, info};

use hpp_guard::config::Config;
use hpp_guard::middleware::{HppGuard, MiddlewareChain};
use hpp_guard::server::EchoServer;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    hpp_guard::logging::init(&config.logging)?;

    info!(version = hpp_guard::VERSION, "Starting hpp_guard echo server...");
    config.log_summary();

    // Request handling is cheap and synchronous, one thread is plenty
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let chain = MiddlewareChain::new().add(HppGuard::new(config.hpp.to_guard_config()));
    let server = EchoServer::new(config.server, chain);

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                error!(error = %e, "Server error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }

    Ok(())
}
