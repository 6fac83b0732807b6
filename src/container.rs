//! Fit-content containers.
//!
//! A [`Container`] wraps an ordered set of member boxes. The members'
//! relations may refer to the container (usually through
//! [`Target::Parent`](crate::Target::Parent)), while the container's size
//! depends on where the members end up. That mutual dependency is broken
//! with two fixed phases instead of a solver:
//!
//! 1. [`measure`](Container::measure): resolve every member against the
//!    provisional (zero or fixed-size) container, then size the container to
//!    the members' far edges.
//! 2. [`place`](Container::place): resolve every member again against the
//!    sized container, then apply padding.
//!
//! Padding grows the container and shifts every member by the top/left
//! inset. Members that were centered on the container before padding are
//! re-centered on the grown container, so unequal insets do not leave them
//! off-center.
//!
//! # Example
//!
//! ```
//! use zenframe::{AnchorRef, BoxTree, Container, Insets, Rect, Relation, Relations};
//!
//! let mut tree = BoxTree::new();
//! let title = tree.insert(Rect::ZERO);
//! let badge = tree.insert(Rect::ZERO);
//!
//! let container = Container::new()
//!     .member(
//!         title,
//!         Relations::new()
//!             .with(Relation::width(100.0))
//!             .with(Relation::height(20.0))
//!             .with(Relation::left(AnchorRef::parent_left()))
//!             .with(Relation::top(AnchorRef::parent_top())),
//!     )
//!     .member(
//!         badge,
//!         Relations::new()
//!             .with(Relation::width(40.0))
//!             .with(Relation::height(10.0))
//!             .with(Relation::center_x(AnchorRef::parent_center_x()))
//!             .with(Relation::top(title.bottom())),
//!     )
//!     .padding(Insets::new(0.0, 10.0, 0.0, 10.0))
//!     .layout(&mut tree)
//!     .unwrap();
//!
//! assert_eq!(tree.frame(container).unwrap().size(), zenframe::Size::new(120.0, 30.0));
//! assert_eq!(tree.frame(badge).unwrap().mid_x(), 60.0);
//! ```

use alloc::vec::Vec;

use crate::error::LayoutError;
use crate::geometry::{Axis, EPSILON, Insets, Rect, Size, approx_eq};
use crate::relation::{Anchor, Relation, Relations};
use crate::tree::{BoxId, BoxTree, StateKey};

/// A fit-content container: its members, sizing and padding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Container {
    /// Box to use as the container. When `None`, the members' shared
    /// parent is reused, or a new box is created. A container with no
    /// members and no box of its own therefore gets a fresh box on every
    /// run; set this to lay out into the same box repeatedly.
    pub container: Option<BoxId>,
    /// Fixed container width, instead of wrapping the members.
    pub width: Option<f64>,
    /// Fixed container height, instead of wrapping the members.
    pub height: Option<f64>,
    /// Space added around the members after they are placed.
    pub padding: Insets,
    /// State the resolved frames are cached under.
    pub state: StateKey,
    members: Vec<(BoxId, Relations)>,
}

impl Container {
    /// An empty container in the default state, with no padding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `id` as the container box.
    pub fn in_box(mut self, id: BoxId) -> Self {
        self.container = Some(id);
        self
    }

    /// Fix the container width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Fix the container height.
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Space to add around the members.
    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// State to cache every resolved frame under.
    pub fn state(mut self, state: impl Into<StateKey>) -> Self {
        self.state = state.into();
        self
    }

    /// Append a member with the relations that place it. Members are
    /// resolved in the order they are added.
    pub fn member(mut self, id: BoxId, relations: Relations) -> Self {
        self.members.push((id, relations));
        self
    }

    /// Run every phase and return the container box.
    pub fn layout(&self, tree: &mut BoxTree) -> Result<BoxId, LayoutError> {
        let container = self.prepare(tree)?;
        self.measure(tree, container)?;
        self.place(tree, container)?;
        log::trace!(
            "container {}: {} members, frame {:?}",
            container.index(),
            self.members.len(),
            tree.frame(container)?
        );
        Ok(container)
    }

    /// Pick the container box, reset it, and attach every member to it.
    ///
    /// Each member's origin is reset to zero (its size is kept), so members
    /// without a position relation on an axis start from the container's
    /// origin on every run.
    ///
    /// Fails without touching the tree when a handle is unknown or when the
    /// container is one of the members or sits below one.
    pub fn prepare(&self, tree: &mut BoxTree) -> Result<BoxId, LayoutError> {
        for (member, _) in &self.members {
            tree.frame(*member)?;
        }
        let container = match self.container {
            Some(id) => {
                tree.frame(id)?;
                id
            }
            None => match self.shared_parent(tree)? {
                Some(parent) => parent,
                None => tree.insert(Rect::ZERO),
            },
        };
        for (member, _) in &self.members {
            if tree.is_ancestor_or_self(*member, container) {
                return Err(LayoutError::Cycle {
                    parent: container,
                    child: *member,
                });
            }
        }

        let mut frame = Rect::ZERO;
        if let Some(w) = self.width {
            frame.width = w;
        }
        if let Some(h) = self.height {
            frame.height = h;
        }
        tree.set_frame(container, frame)?;

        for (member, _) in &self.members {
            if tree.parent(*member)? != Some(container) {
                tree.add_child(container, *member)?;
            }
            let f = tree.frame(*member)?;
            tree.set_frame(*member, Rect::from_size(f.size()))?;
        }
        Ok(container)
    }

    /// First phase: resolve members against the provisional container, then
    /// size the container around them. Returns the container size.
    pub fn measure(&self, tree: &mut BoxTree, container: BoxId) -> Result<Size, LayoutError> {
        self.resolve_members(tree)?;
        let extent = self.member_extent(tree)?;
        let frame = tree.configure(
            container,
            self.state.clone(),
            &self.container_relations(extent),
        )?;
        Ok(frame.size())
    }

    /// Second phase: resolve members against the sized container, then
    /// apply padding.
    pub fn place(&self, tree: &mut BoxTree, container: BoxId) -> Result<(), LayoutError> {
        self.resolve_members(tree)?;
        if !self.padding.is_zero() {
            self.apply_padding(tree, container)?;
        }
        Ok(())
    }

    fn resolve_members(&self, tree: &mut BoxTree) -> Result<(), LayoutError> {
        for (member, relations) in &self.members {
            tree.configure(*member, self.state.clone(), relations)?;
        }
        Ok(())
    }

    /// Far edges of the members in the container's space, floored at 0.
    ///
    /// Only members count. Other children of a reused parent neither size
    /// the container nor move with it.
    fn member_extent(&self, tree: &BoxTree) -> Result<Size, LayoutError> {
        let mut extent = Size::ZERO;
        for (member, _) in &self.members {
            let f = tree.frame(*member)?;
            extent.width = extent.width.max(f.max_x());
            extent.height = extent.height.max(f.max_y());
        }
        Ok(extent)
    }

    /// Relations sizing the container itself: fixed dimensions where set,
    /// the members' extent otherwise.
    fn container_relations(&self, extent: Size) -> Relations {
        Relations::new()
            .with(Relation::width(self.width.unwrap_or(extent.width)))
            .with(Relation::height(self.height.unwrap_or(extent.height)))
    }

    /// Parent shared by every member, if there is one.
    fn shared_parent(&self, tree: &BoxTree) -> Result<Option<BoxId>, LayoutError> {
        let mut shared = None;
        for (member, _) in &self.members {
            let Some(parent) = tree.parent(*member)? else {
                return Ok(None);
            };
            match shared {
                None => shared = Some(parent),
                Some(p) if p == parent => {}
                Some(_) => return Ok(None),
            }
        }
        Ok(shared)
    }

    fn apply_padding(&self, tree: &mut BoxTree, container: BoxId) -> Result<(), LayoutError> {
        let before = tree.frame(container)?;
        let (cx, cy) = (before.width / 2.0, before.height / 2.0);

        let mut centered = Vec::with_capacity(self.members.len());
        for (member, relations) in &self.members {
            let f = tree.frame(*member)?;
            centered.push((
                relations.centers_on(Axis::Horizontal) && approx_eq(f.mid_x(), cx, EPSILON),
                relations.centers_on(Axis::Vertical) && approx_eq(f.mid_y(), cy, EPSILON),
            ));
        }

        let pad = self.padding;
        let grown = Rect::new(
            before.x,
            before.y,
            before.width + pad.horizontal(),
            before.height + pad.vertical(),
        );
        tree.commit(container, self.state.clone(), grown)?;
        let (new_cx, new_cy) = (grown.width / 2.0, grown.height / 2.0);

        for ((member, _), (center_x, center_y)) in self.members.iter().zip(centered) {
            let mut f = tree.frame(*member)?.translate(pad.left, pad.top);
            if center_x {
                f.set_anchor(Anchor::CenterX, new_cx);
            }
            if center_y {
                f.set_anchor(Anchor::CenterY, new_cy);
            }
            tree.commit(*member, self.state.clone(), f)?;
        }
        Ok(())
    }
}
