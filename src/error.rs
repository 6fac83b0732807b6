//! Layout errors.

use core::fmt;

use crate::tree::BoxId;

/// Structural misuse of a [`BoxTree`](crate::BoxTree).
///
/// Relations themselves never fail: a relation whose target cannot be found
/// reads 0 instead. These errors only cover handles and tree shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The handle does not belong to this tree.
    UnknownBox(BoxId),
    /// Attaching `child` under `parent` would make a box its own ancestor.
    Cycle { parent: BoxId, child: BoxId },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBox(id) => write!(f, "unknown box {}", id.index()),
            Self::Cycle { parent, child } => write!(
                f,
                "attaching box {} under box {} would create a cycle",
                child.index(),
                parent.index()
            ),
        }
    }
}

impl core::error::Error for LayoutError {}
