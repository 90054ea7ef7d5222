pub mod brush;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod logging;
pub mod palette;
pub mod session;

pub use error::{AppError, AppResult};

use canvas::PixelBuffer;

/// Entrypoint used by host shells: installs logging and builds a canvas
/// session from on-disk configuration.
pub fn start() -> AppResult<session::CanvasSession<canvas::CanvasImage>> {
    logging::init();
    tracing::info!("starting daub");

    let config = config::load_app_config();
    let session = session::CanvasSession::from_config(&config)?;

    tracing::info!(bounds = ?session.buffer().bounds(), "canvas session ready");
    Ok(session)
}
