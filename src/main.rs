use std::process::ExitCode;

use storefront::http::{self, AppState};
use storefront::{telemetry, Config, InMemoryModelStore};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    info!("Opening store...");
    let store = InMemoryModelStore::new();
    let state = AppState::new(store, &config);

    let addr = config.bind_addr();
    info!("Binding to {addr}");
    if let Err(e) = http::serve(state, &addr).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    info!("Server shut down");
    ExitCode::SUCCESS
}
