// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;

use bmi_tracker::Config;
#[cfg(feature = "tui")]
use bmi_tracker::RecordStore;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    bmi_tracker::init_logging();

    let config = Config::from_env()?;
    run_ui_mode(&config)
}

/// Read-only viewer: the web server is the only writer of the data file
#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    let store = RecordStore::load(&config.data_file)?;
    println!("✓ Loaded {} records\n", store.len());

    let mut app = ui::App::new(
        store.records().to_vec(),
        config.data_file.display().to_string(),
    );
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the web UI: cargo run --bin bmi-server --features server");
    std::process::exit(1);
}
