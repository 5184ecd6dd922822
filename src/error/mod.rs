use crate::config::ConfigError;
use crate::editor::EditError;
use crate::export::ExportError;
use crate::surface::SurfaceError;
use crate::swatch::SwatchError;
use thiserror::Error;

pub type PaintResult<T> = std::result::Result<T, PaintError>;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Swatch(#[from] SwatchError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditSession;
    use crate::swatch::Swatch;

    fn apply_named_swatch(session: &mut EditSession, swatch: &Swatch) -> PaintResult<usize> {
        session.set_active_swatch(swatch)?;
        Ok(session.on_wand_click(0.0, 0.0)?)
    }

    #[test]
    fn module_errors_convert_into_paint_error() {
        let mut session = EditSession::new();

        let swatch_error =
            apply_named_swatch(&mut session, &Swatch::new("Bad", "#XYZ")).unwrap_err();
        assert!(matches!(swatch_error, PaintError::Swatch(_)));

        let edit_error =
            apply_named_swatch(&mut session, &Swatch::new("Celadon", "#DEEEDD")).unwrap_err();
        assert!(matches!(edit_error, PaintError::Edit(_)));
    }
}
