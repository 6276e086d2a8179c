use std::path::PathBuf;

use anyhow::Result;
use retrotoy_etch::EtchApp;
use retrotoy_sdl2::{App, SdlContext, SdlInitInfo};

/// Startup settings resolved from the command line.
pub struct EtchConfig {
    pub width: usize,
    pub height: usize,
    pub save_path: PathBuf,
}

impl Default for EtchConfig {
    fn default() -> Self {
        Self {
            width: retrotoy_etch::DEFAULT_CANVAS_WIDTH,
            height: retrotoy_etch::DEFAULT_CANVAS_HEIGHT,
            save_path: PathBuf::from("etch_sketch_drawing.png"),
        }
    }
}

/// Build the sketch app and hand it to the SDL2 frontend.
///
/// Fails before any window is shown if the configuration is invalid.
pub fn run(config: EtchConfig) -> Result<()> {
    let app = EtchApp::new(config.width, config.height, config.save_path)?;
    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .build();
    SdlContext::run(init_info, app)
}
