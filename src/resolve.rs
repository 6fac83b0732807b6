//! Relation resolution: from a [`Relations`] set to a concrete frame.
//!
//! Resolution runs two passes over the relation list:
//!
//! 1. **Size.** Width and height are settled first, because centering and
//!    right/bottom alignment need the final size. Explicit width/height and
//!    equal-size relations are evaluated, then fit-content fills whatever is
//!    still open, then aspect ratios derive one dimension from the other.
//! 2. **Position.** Left, right, center-x, top, bottom and center-y are
//!    evaluated against their targets (converted into the configured box's
//!    parent space) and applied in declaration order. Applying a position
//!    never changes the size.
//!
//! When several relations write the same attribute, the highest
//! [`Priority`](crate::Priority) wins and ties go to the one declared last.
//! Relations whose target cannot be found read 0 and still apply.

use crate::convert;
use crate::error::LayoutError;
use crate::geometry::Rect;
use crate::relation::{Anchor, AnchorRef, Dimension, Relation, Relations, Rule, Source, Target};
use crate::tree::{BoxId, BoxTree, StateKey};

impl Relations {
    /// Resolve these relations for `id` without touching the tree.
    ///
    /// Starts from the box's current frame; any attribute no relation
    /// writes keeps its current value.
    pub fn resolve(&self, tree: &BoxTree, id: BoxId) -> Result<Rect, LayoutError> {
        let start = tree.frame(id)?;
        let resolver = Resolver {
            tree,
            id,
            parent: tree.parent(id)?,
        };
        let mut frame = resolver.size_pass(self, start);
        resolver.position_pass(self, &mut frame);
        if let Some(scale) = self.snap_scale() {
            frame = frame.snap(scale);
        }
        log::trace!("box {}: resolved {:?}", id.index(), frame);
        Ok(frame)
    }
}

impl BoxTree {
    /// Resolve `relations` for `id`, cache the result under `state`, make
    /// `state` active and apply the frame.
    ///
    /// Always recomputes; whatever was cached for `state` is replaced.
    pub fn configure(
        &mut self,
        id: BoxId,
        state: impl Into<StateKey>,
        relations: &Relations,
    ) -> Result<Rect, LayoutError> {
        let frame = relations.resolve(self, id)?;
        self.commit(id, state.into(), frame)?;
        Ok(frame)
    }
}

/// Which relations a size winner came from.
#[derive(Copy, Clone)]
enum SizeWinner<'a> {
    Direct(&'a Relation),
    Aspect(&'a Relation),
}

struct Resolver<'a> {
    tree: &'a BoxTree,
    id: BoxId,
    parent: Option<BoxId>,
}

impl Resolver<'_> {
    fn target_box(&self, target: Target) -> Option<BoxId> {
        let found = match target {
            Target::Box(b) if self.tree.contains(b) => Some(b),
            Target::Box(_) => None,
            Target::Parent => self.parent,
        };
        if found.is_none() {
            log::debug!(
                "box {}: relation target {:?} not found, reading 0",
                self.id.index(),
                target
            );
        }
        found
    }

    // ── size pass ───────────────────────────────────────────────────────

    fn size_pass(&self, relations: &Relations, start: Rect) -> Rect {
        let dims = [Dimension::Width, Dimension::Height];
        let winners = dims.map(|d| size_winner(relations, d));
        let mut sizes: [Option<f64>; 2] = [None, None];

        for d in dims {
            if let Some(SizeWinner::Direct(r)) = winners[d.index()] {
                sizes[d.index()] = Some(self.eval_size(r, d));
            }
        }

        let fit = relations
            .iter()
            .filter(|r| matches!(r.rule, Rule::FitContent))
            .max_by_key(|r| r.priority);
        if let Some(fit) = fit {
            let extent = self.content_extent();
            for d in dims {
                if winners[d.index()].is_none() {
                    sizes[d.index()] = Some(fit.adjust(extent[d.index()]));
                }
            }
        }

        for d in dims {
            if let Some(SizeWinner::Aspect(r)) = winners[d.index()] {
                let other = d.other();
                let basis = match (sizes[other.index()], winners[other.index()]) {
                    (Some(v), _) => v,
                    (None, None) => other.of(&start),
                    (None, Some(_)) => {
                        log::debug!(
                            "box {}: {:?} and {:?} derive from each other, using 0",
                            self.id.index(),
                            d,
                            other
                        );
                        0.0
                    }
                };
                sizes[d.index()] = Some(r.adjust(basis));
            }
        }

        let mut frame = start;
        for d in dims {
            if let Some(v) = sizes[d.index()] {
                frame.set_anchor(d.anchor(), v);
            }
        }
        frame
    }

    fn eval_size(&self, relation: &Relation, d: Dimension) -> f64 {
        let raw = match &relation.rule {
            Rule::Anchor { source, .. } => self.source_value(source, |a| self.size_of(a)),
            Rule::EqualSize { target } => self
                .target_box(*target)
                .and_then(|b| self.tree.frame(b).ok())
                .map_or(0.0, |f| d.of(&f)),
            Rule::AspectRatio { .. } | Rule::FitContent => 0.0,
        };
        relation.adjust(raw)
    }

    /// A target's width or height. Positional anchors read 0 here.
    fn size_of(&self, aref: &AnchorRef) -> f64 {
        if !aref.anchor.is_size() {
            return 0.0;
        }
        self.target_box(aref.target)
            .and_then(|b| self.tree.frame(b).ok())
            .map_or(0.0, |f| f.anchor(aref.anchor))
    }

    /// Far edges of the layout children, in this box's child space.
    fn content_extent(&self) -> [f64; 2] {
        let children = self.tree.children(self.id).unwrap_or(&[]);
        children
            .iter()
            .filter_map(|&c| self.tree.frame(c).ok())
            .fold([0.0_f64, 0.0_f64], |[w, h], f| {
                [w.max(f.max_x()), h.max(f.max_y())]
            })
    }

    // ── position pass ───────────────────────────────────────────────────

    fn position_pass(&self, relations: &Relations, frame: &mut Rect) {
        let mut winners: alloc::vec::Vec<(usize, Anchor, &Relation)> = Anchor::POSITIONS
            .iter()
            .filter_map(|&a| position_winner(relations, a).map(|(i, r)| (i, a, r)))
            .collect();
        winners.sort_by_key(|&(i, _, _)| i);

        for (_, anchor, relation) in winners {
            let Rule::Anchor { source, .. } = &relation.rule else {
                continue;
            };
            let value = relation.adjust(self.source_value(source, |a| self.position_of(a)));
            frame.set_anchor(anchor, value);
        }
    }

    /// A target's positional anchor in the parent space of the configured
    /// box. Size anchors read 0 here.
    fn position_of(&self, aref: &AnchorRef) -> f64 {
        match self.target_box(aref.target) {
            Some(b) => convert::anchor_position(self.tree, b, aref.anchor, self.parent),
            None => 0.0,
        }
    }

    // ── sources ─────────────────────────────────────────────────────────

    fn source_value(&self, source: &Source, read: impl Fn(&AnchorRef) -> f64) -> f64 {
        match source {
            Source::Value(v) => *v,
            Source::Anchor(a) => read(a),
            Source::Min(list) => list.iter().map(&read).reduce(f64::min).unwrap_or(0.0),
            Source::Max(list) => list.iter().map(&read).reduce(f64::max).unwrap_or(0.0),
        }
    }
}

/// Winning relation for one dimension.
fn size_winner(relations: &Relations, d: Dimension) -> Option<SizeWinner<'_>> {
    relations
        .iter()
        .filter_map(|r| match r.rule {
            Rule::Anchor { anchor, .. } if anchor == d.anchor() => Some(SizeWinner::Direct(r)),
            Rule::EqualSize { .. } => Some(SizeWinner::Direct(r)),
            Rule::AspectRatio { derived } if derived == d => Some(SizeWinner::Aspect(r)),
            _ => None,
        })
        .max_by_key(|w| match w {
            SizeWinner::Direct(r) | SizeWinner::Aspect(r) => r.priority,
        })
}

/// Winning relation for one positional anchor, with its declaration index.
fn position_winner(relations: &Relations, anchor: Anchor) -> Option<(usize, &Relation)> {
    relations
        .iter()
        .enumerate()
        .filter(|(_, r)| matches!(r.rule, Rule::Anchor { anchor: a, .. } if a == anchor))
        .max_by_key(|(_, r)| r.priority)
}
