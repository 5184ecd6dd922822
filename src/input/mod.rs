//! Pointer routing from an on-screen element into an edit session.

use crate::editor::{EditResult, EditSession, ToolKind};
use crate::geometry::ElementRect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { client_x: f32, client_y: f32 },
    Move { client_x: f32, client_y: f32 },
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Selected { pixels: usize },
    StrokeStarted,
    StrokeExtended,
    StrokeClosed,
    Ignored,
}

/// Pointer registration for one element geometry. The binding holds the
/// session exclusively; dropping it closes any open brush path, so a resize
/// or teardown never leaves a stroke dangling.
#[derive(Debug)]
pub struct PointerBinding<'a> {
    session: &'a mut EditSession,
    element: ElementRect,
}

impl<'a> PointerBinding<'a> {
    pub fn new(session: &'a mut EditSession, element: ElementRect) -> Self {
        tracing::trace!(?element, "pointer binding attached");
        Self { session, element }
    }

    pub fn session(&self) -> &EditSession {
        &*self.session
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> EditResult<PointerOutcome> {
        let size = self.session.size();
        let element = self.element;
        let to_surface = |x: f32, y: f32| element.to_surface(x, y, size);

        match (self.session.active_tool(), event) {
            (ToolKind::Wand, PointerEvent::Down { client_x, client_y }) => {
                let Some(point) = to_surface(client_x, client_y) else {
                    return Ok(PointerOutcome::Ignored);
                };
                let pixels = self.session.on_wand_click(point.x, point.y)?;
                Ok(PointerOutcome::Selected { pixels })
            }
            (ToolKind::Wand, _) => Ok(PointerOutcome::Ignored),
            (ToolKind::Brush, PointerEvent::Down { client_x, client_y }) => {
                let Some(point) = to_surface(client_x, client_y) else {
                    return Ok(PointerOutcome::Ignored);
                };
                self.session.on_brush_down(point);
                Ok(PointerOutcome::StrokeStarted)
            }
            (ToolKind::Brush, PointerEvent::Move { client_x, client_y }) => {
                let extended = to_surface(client_x, client_y)
                    .is_some_and(|point| self.session.on_brush_move(point));
                Ok(if extended {
                    PointerOutcome::StrokeExtended
                } else {
                    PointerOutcome::Ignored
                })
            }
            (ToolKind::Brush, PointerEvent::Up) => Ok(closed(self.session.on_brush_up())),
            (ToolKind::Brush, PointerEvent::Leave) => Ok(closed(self.session.on_brush_leave())),
        }
    }
}

fn closed(was_open: bool) -> PointerOutcome {
    if was_open {
        PointerOutcome::StrokeClosed
    } else {
        PointerOutcome::Ignored
    }
}

impl Drop for PointerBinding<'_> {
    fn drop(&mut self) {
        if self.session.on_brush_up() {
            tracing::debug!("pointer binding released with open stroke; path closed");
        }
    }
}
