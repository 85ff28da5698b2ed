//! Hello window: bootstrap and a render loop that only clears the screen

use triangle_engine::foundation::logging;
use triangle_engine::prelude::*;

fn run() -> Result<LoopSummary, BootstrapError> {
    let config = BootstrapConfig::load_or_default(BootstrapConfig::DEFAULT_PATH)?;
    let app = App::initialize(config)?;
    Ok(app.run())
}

fn main() {
    logging::init();

    match run() {
        Ok(summary) => log::info!("Exited after {} frames", summary.frames),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(-1);
        }
    }
}
