//! Coordinate conversion between box spaces.
//!
//! Every box defines a coordinate space for its children: the space whose
//! origin is the box's top-left corner. A box's own frame lives in its
//! parent's space; parentless boxes live in the root space. `None` below
//! always means the root space.
//!
//! ```text
//!   root space
//!   ┌──────────────────────────────┐
//!   │  a (20, 10)                  │
//!   │  ┌────────────────────┐      │
//!   │  │  b (5, 5)          │      │   b's frame in root space:
//!   │  │  ┌──────┐          │      │   (20 + 5, 10 + 5) = (25, 15)
//!   │  │  └──────┘          │      │
//!   │  └────────────────────┘      │
//!   └──────────────────────────────┘
//! ```
//!
//! Converting through the root gives the same result as converting through
//! any shared ancestor, so callers never need to find one.

use crate::error::LayoutError;
use crate::geometry::Rect;
use crate::relation::Anchor;
use crate::tree::{BoxId, BoxTree};

/// Origin of `space`'s child coordinate space, in root coordinates.
///
/// Unknown handles contribute nothing.
pub fn space_origin(tree: &BoxTree, space: Option<BoxId>) -> (f64, f64) {
    let Some(id) = space else {
        return (0.0, 0.0);
    };
    core::iter::once(id)
        .chain(tree.ancestors(id))
        .filter_map(|b| tree.frame(b).ok())
        .fold((0.0, 0.0), |(x, y), f| (x + f.x, y + f.y))
}

/// Re-express `rect`, given in `from`'s child space, in `to`'s child space.
pub fn rect_between(tree: &BoxTree, rect: Rect, from: Option<BoxId>, to: Option<BoxId>) -> Rect {
    if from == to {
        return rect;
    }
    let (fx, fy) = space_origin(tree, from);
    let (tx, ty) = space_origin(tree, to);
    rect.translate(fx - tx, fy - ty)
}

/// `target`'s current frame, re-expressed in `into`'s child space.
pub fn frame_into(tree: &BoxTree, target: BoxId, into: Option<BoxId>) -> Result<Rect, LayoutError> {
    let frame = tree.frame(target)?;
    let from = tree.parent(target)?;
    Ok(rect_between(tree, frame, from, into))
}

/// One positional scalar of `target`, converted into `into`'s child space.
///
/// `Width` and `Height` are not positions and read 0, as does an unknown
/// target.
pub fn anchor_position(tree: &BoxTree, target: BoxId, anchor: Anchor, into: Option<BoxId>) -> f64 {
    if anchor.is_size() {
        return 0.0;
    }
    match frame_into(tree, target, into) {
        Ok(rect) => rect.anchor(anchor),
        Err(_) => 0.0,
    }
}

impl BoxTree {
    /// Frame of `id` expressed in `reference`'s child space (`None` for the
    /// root space).
    pub fn frame_in(&self, id: BoxId, reference: Option<BoxId>) -> Result<Rect, LayoutError> {
        if let Some(r) = reference
            && !self.contains(r)
        {
            return Err(LayoutError::UnknownBox(r));
        }
        frame_into(self, id, reference)
    }
}
