use crate::error::LayoutError;
use crate::graphs::DiffGraphs;

/// External layout engine. Positions are its own business; it only reads the model.
///
/// An engine that computes off-thread must block (or otherwise complete) before returning, so the
/// caller observes completion on the interaction thread.
pub trait LayoutEngine {
    fn layout(&mut self, graphs: &DiffGraphs) -> Result<(), LayoutError>;
}

/// Leaves positions untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayout;

impl LayoutEngine for NoLayout {
    fn layout(&mut self, _graphs: &DiffGraphs) -> Result<(), LayoutError> {
        Ok(())
    }
}
