//! Hello rectangle: two triangles sharing vertices through the index
//! buffer, colored per vertex. Set `render.wireframe = true` in
//! `triangle.toml` to see the triangle edges.

use triangle_engine::foundation::logging;
use triangle_engine::prelude::*;

fn run() -> Result<LoopSummary, BootstrapError> {
    let config = BootstrapConfig::load_or_default(BootstrapConfig::DEFAULT_PATH)?;
    let mut app = App::initialize(config)?;

    let fallback = ShaderSources::new(DEFAULT_VERTEX_SHADER, VERTEX_COLOR_FRAGMENT_SHADER);
    let sources = app.shader_sources_or(fallback)?;
    app.load_scene(&sources, &Mesh::rectangle())?;

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
