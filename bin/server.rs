// BMI Tracker - Web Server

use anyhow::{Context, Result};
use bmi_tracker::{router, AppState, Config, Presenter, RecordStore};

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    // Startup-fatal: a corrupt data file or a missing template stops here
    let store = RecordStore::load(&config.data_file)?;
    let presenter = Presenter::from_dir(&config.templates_dir)?;

    let state = AppState::new(store, presenter);
    let app = router(state, &config.static_dir());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    log::info!("Starting web server on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    bmi_tracker::init_logging();

    if let Err(e) = run().await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
