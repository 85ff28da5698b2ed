//! Hello triangle: one indexed triangle with the built-in shaders

use triangle_engine::foundation::logging;
use triangle_engine::prelude::*;

fn run() -> Result<LoopSummary, BootstrapError> {
    let config = BootstrapConfig::load_or_default(BootstrapConfig::DEFAULT_PATH)?;
    let mut app = App::initialize(config)?;

    let sources = app.shader_sources_or(ShaderSources::default())?;
    app.load_scene(&sources, &Mesh::triangle())?;

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
