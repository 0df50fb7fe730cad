mod app;
mod logging;
mod page;

use nebula_config::Config;
use tracing::{info, warn};

use crate::app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Loaded before logging starts so the config can pick the filter.
    let (config, load_error) = match nebula_config::load_default() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let log_path = logging::init(config.log_level.as_deref());
    info!(
        version = env!("CARGO_PKG_VERSION"),
        log = ?log_path,
        "nebula starting"
    );
    if let Some(e) = load_error {
        warn!("failed to load config, using defaults: {e}");
    }

    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    info!("nebula stopped");
    result
}
