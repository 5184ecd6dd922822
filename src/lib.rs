pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod surface;
pub mod swatch;
pub use editor::{CommitOutcome, EditSession, ToolKind};
pub use error::{PaintError, PaintResult};
pub use input::{PointerBinding, PointerEvent, PointerOutcome};

/// A configured editor session together with the swatch catalog it offers.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub session: EditSession,
    pub catalog: Vec<swatch::SwatchCategory>,
}

/// Entrypoint used by higher-level integrations: installs logging and builds
/// a session from the user's `config.json`.
pub fn start() -> Workspace {
    logging::init();
    tracing::info!("starting paintwand");

    let config = config::load_editor_config();
    let workspace = Workspace {
        session: EditSession::with_options(config.tool_options()),
        catalog: config.catalog(),
    };

    tracing::info!(
        tool = ?workspace.session.active_tool(),
        categories = workspace.catalog.len(),
        "session ready"
    );
    workspace
}
