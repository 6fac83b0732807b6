//! Box arena, parent/child links, and the per-box state cache.
//!
//! [`BoxTree`] stands in for a host toolkit's view tree. It owns every box;
//! a box's parent link is a plain index and does not own anything. Each box
//! carries its own map from [`StateKey`] to the frame last resolved for that
//! state, so switching states never recomputes.

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::LayoutError;
use crate::geometry::Rect;

/// Handle to a box in a [`BoxTree`].
///
/// Wraps the arena index at full `usize` width, so every slot the arena can
/// hold has a distinct handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoxId(usize);

impl BoxId {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of this box in its tree's arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Name of a configuration state.
///
/// Boxes keep one resolved frame per key. Keys compare by string content.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(Cow<'static, str>);

impl StateKey {
    /// The state used when the caller names none.
    pub const DEFAULT: Self = Self(Cow::Borrowed("DEFAULT STATE"));

    /// A key from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The state name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is [`StateKey::DEFAULT`].
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for StateKey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<&'static str> for StateKey {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for StateKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// Outcome of [`BoxTree::set_state`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StateSwitch {
    /// A frame was cached for the state and is now applied.
    Cached(Rect),
    /// Nothing was cached; the box now has the zero rectangle.
    ZeroFallback,
}

impl StateSwitch {
    /// The frame now applied to the box.
    pub fn frame(&self) -> Rect {
        match self {
            Self::Cached(r) => *r,
            Self::ZeroFallback => Rect::ZERO,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    frame: Rect,
    parent: Option<BoxId>,
    children: Vec<BoxId>,
    active: StateKey,
    states: BTreeMap<StateKey, Rect>,
}

impl Node {
    fn new(frame: Rect) -> Self {
        Self {
            frame,
            parent: None,
            children: Vec::new(),
            active: StateKey::DEFAULT,
            states: BTreeMap::new(),
        }
    }
}

/// Arena of boxes.
#[derive(Clone, Debug, Default)]
pub struct BoxTree {
    nodes: Vec<Node>,
}

impl BoxTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless box with the given frame.
    pub fn insert(&mut self, frame: Rect) -> BoxId {
        let id = BoxId::from_index(self.nodes.len());
        self.nodes.push(Node::new(frame));
        id
    }

    /// Number of boxes ever inserted.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no box has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a box in this tree.
    pub fn contains(&self, id: BoxId) -> bool {
        id.index() < self.nodes.len()
    }

    fn node(&self, id: BoxId) -> Result<&Node, LayoutError> {
        self.nodes.get(id.index()).ok_or(LayoutError::UnknownBox(id))
    }

    fn node_mut(&mut self, id: BoxId) -> Result<&mut Node, LayoutError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(LayoutError::UnknownBox(id))
    }

    // ── frames ──────────────────────────────────────────────────────────

    /// Current frame, in the parent's coordinate space.
    pub fn frame(&self, id: BoxId) -> Result<Rect, LayoutError> {
        Ok(self.node(id)?.frame)
    }

    /// Overwrite the current frame. The state cache is left alone.
    pub fn set_frame(&mut self, id: BoxId, frame: Rect) -> Result<(), LayoutError> {
        self.node_mut(id)?.frame = frame;
        Ok(())
    }

    // ── hierarchy ───────────────────────────────────────────────────────

    /// The box `id` is attached to, if any.
    pub fn parent(&self, id: BoxId) -> Result<Option<BoxId>, LayoutError> {
        Ok(self.node(id)?.parent)
    }

    /// Children of `id` in attach order.
    pub fn children(&self, id: BoxId) -> Result<&[BoxId], LayoutError> {
        Ok(&self.node(id)?.children)
    }

    /// Ancestors of `id`, nearest first. Unknown handles yield nothing.
    pub fn ancestors(&self, id: BoxId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes.get(id.index()).and_then(|n| n.parent),
        }
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: BoxId, id: BoxId) -> bool {
        ancestor == id || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Append `child` to `parent`'s children, detaching it from any previous
    /// parent first. Re-adding an existing child moves it to the end.
    pub fn add_child(&mut self, parent: BoxId, child: BoxId) -> Result<(), LayoutError> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(LayoutError::Cycle { parent, child });
        }
        self.remove_from_parent(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from its parent. No-op for parentless boxes.
    pub fn remove_from_parent(&mut self, child: BoxId) -> Result<(), LayoutError> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != child);
        Ok(())
    }

    // ── state cache ─────────────────────────────────────────────────────

    pub fn active_state(&self, id: BoxId) -> Result<&StateKey, LayoutError> {
        Ok(&self.node(id)?.active)
    }

    /// Frame cached for `key`, if any.
    pub fn cached_frame(&self, id: BoxId, key: &StateKey) -> Result<Option<Rect>, LayoutError> {
        Ok(self.node(id)?.states.get(key).copied())
    }

    /// Make `key` active and apply its cached frame.
    ///
    /// A state with nothing cached applies [`Rect::ZERO`] and reports
    /// [`StateSwitch::ZeroFallback`]; this is not an error.
    pub fn set_state(
        &mut self,
        id: BoxId,
        key: impl Into<StateKey>,
    ) -> Result<StateSwitch, LayoutError> {
        let key = key.into();
        let node = self.node_mut(id)?;
        let switch = match node.states.get(&key) {
            Some(frame) => StateSwitch::Cached(*frame),
            None => {
                log::debug!(
                    "box {}: no frame cached for state {:?}, falling back to zero",
                    id.index(),
                    key.as_str()
                );
                StateSwitch::ZeroFallback
            }
        };
        node.frame = switch.frame();
        node.active = key;
        Ok(switch)
    }

    /// Store `frame` under `key`, make it active and apply it.
    pub(crate) fn commit(
        &mut self,
        id: BoxId,
        key: StateKey,
        frame: Rect,
    ) -> Result<(), LayoutError> {
        let node = self.node_mut(id)?;
        node.states.insert(key.clone(), frame);
        node.active = key;
        node.frame = frame;
        Ok(())
    }

    /// Drop the frame cached for `key`. The current frame is kept.
    pub fn forget_state(&mut self, id: BoxId, key: &StateKey) -> Result<Option<Rect>, LayoutError> {
        Ok(self.node_mut(id)?.states.remove(key))
    }

    /// Drop every cached frame of `id`. The current frame is kept.
    pub fn clear_states(&mut self, id: BoxId) -> Result<(), LayoutError> {
        self.node_mut(id)?.states.clear();
        Ok(())
    }
}

/// Iterator over a box's ancestors, nearest first.
pub struct Ancestors<'a> {
    tree: &'a BoxTree,
    next: Option<BoxId>,
}

impl Iterator for Ancestors<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<BoxId> {
        let current = self.next?;
        self.next = self.tree.nodes.get(current.index()).and_then(|n| n.parent);
        Some(current)
    }
}
