//! Relation model: what a box's frame is tied to.
//!
//! A [`Relation`] binds one attribute of the box being configured (an edge,
//! a center, a dimension, or the whole size) to a constant, to an anchor of
//! another box, or to the min/max of several anchors. [`Relations`] is the
//! ordered list handed to the resolver.
//!
//! # Example
//!
//! ```
//! use zenframe::{AnchorRef, BoxTree, Rect, Relation, Relations, StateKey};
//!
//! let mut tree = BoxTree::new();
//! let root = tree.insert(Rect::new(0.0, 0.0, 320.0, 480.0));
//! let title = tree.insert(Rect::ZERO);
//! tree.add_child(root, title).unwrap();
//!
//! let relations = Relations::new()
//!     .with(Relation::height(44.0))
//!     .with(Relation::width(AnchorRef::parent_width()))
//!     .with(Relation::top(AnchorRef::parent_top()).inset(20.0));
//!
//! let frame = tree.configure(title, StateKey::DEFAULT, &relations).unwrap();
//! assert_eq!(frame, Rect::new(0.0, 20.0, 320.0, 44.0));
//! ```

use alloc::vec::Vec;

use crate::geometry::{Axis, Rect};
use crate::tree::BoxId;

/// One readable / writable attribute of a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Left edge (min x).
    Left,
    /// Right edge (max x).
    Right,
    /// Top edge (min y).
    Top,
    /// Bottom edge (max y).
    Bottom,
    /// Horizontal center.
    CenterX,
    /// Vertical center.
    CenterY,
    /// Width; never a position.
    Width,
    /// Height; never a position.
    Height,
}

impl Anchor {
    /// Every anchor.
    pub const ALL: [Self; 8] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::CenterX,
        Self::CenterY,
        Self::Width,
        Self::Height,
    ];

    /// Positional anchors, the ones the position pass writes.
    pub const POSITIONS: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::CenterX,
        Self::Top,
        Self::Bottom,
        Self::CenterY,
    ];

    /// Whether this is `Width` or `Height`.
    pub fn is_size(self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right | Self::CenterX | Self::Width => Axis::Horizontal,
            Self::Top | Self::Bottom | Self::CenterY | Self::Height => Axis::Vertical,
        }
    }

    /// Whether this is `CenterX` or `CenterY`.
    pub fn is_center(self) -> bool {
        matches!(self, Self::CenterX | Self::CenterY)
    }
}

/// Width or height.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    pub fn anchor(self) -> Anchor {
        match self {
            Self::Width => Anchor::Width,
            Self::Height => Anchor::Height,
        }
    }

    /// The other dimension.
    pub fn other(self) -> Self {
        match self {
            Self::Width => Self::Height,
            Self::Height => Self::Width,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Width => 0,
            Self::Height => 1,
        }
    }

    pub(crate) fn of(self, rect: &Rect) -> f64 {
        match self {
            Self::Width => rect.width,
            Self::Height => rect.height,
        }
    }
}

/// The box a relation reads from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// A specific box.
    Box(BoxId),
    /// The layout parent of the box being configured.
    Parent,
}

impl From<BoxId> for Target {
    fn from(id: BoxId) -> Self {
        Self::Box(id)
    }
}

/// An anchor of a target box, e.g. "the right edge of `a`".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnchorRef {
    pub target: Target,
    pub anchor: Anchor,
}

impl AnchorRef {
    pub const fn new(target: Target, anchor: Anchor) -> Self {
        Self { target, anchor }
    }

    /// An anchor of the configured box's parent.
    pub const fn parent(anchor: Anchor) -> Self {
        Self::new(Target::Parent, anchor)
    }

    pub const fn parent_left() -> Self {
        Self::parent(Anchor::Left)
    }

    pub const fn parent_right() -> Self {
        Self::parent(Anchor::Right)
    }

    pub const fn parent_top() -> Self {
        Self::parent(Anchor::Top)
    }

    pub const fn parent_bottom() -> Self {
        Self::parent(Anchor::Bottom)
    }

    pub const fn parent_center_x() -> Self {
        Self::parent(Anchor::CenterX)
    }

    pub const fn parent_center_y() -> Self {
        Self::parent(Anchor::CenterY)
    }

    pub const fn parent_width() -> Self {
        Self::parent(Anchor::Width)
    }

    pub const fn parent_height() -> Self {
        Self::parent(Anchor::Height)
    }
}

macro_rules! anchor_shorthands {
    ($ty:ty, $to_target:expr) => {
        impl $ty {
            /// Refer to `anchor` of this box.
            pub fn anchor(self, anchor: Anchor) -> AnchorRef {
                AnchorRef::new($to_target(self), anchor)
            }

            pub fn left(self) -> AnchorRef {
                self.anchor(Anchor::Left)
            }

            pub fn right(self) -> AnchorRef {
                self.anchor(Anchor::Right)
            }

            pub fn top(self) -> AnchorRef {
                self.anchor(Anchor::Top)
            }

            pub fn bottom(self) -> AnchorRef {
                self.anchor(Anchor::Bottom)
            }

            pub fn center_x(self) -> AnchorRef {
                self.anchor(Anchor::CenterX)
            }

            pub fn center_y(self) -> AnchorRef {
                self.anchor(Anchor::CenterY)
            }

            pub fn width(self) -> AnchorRef {
                self.anchor(Anchor::Width)
            }

            pub fn height(self) -> AnchorRef {
                self.anchor(Anchor::Height)
            }
        }
    };
}

anchor_shorthands!(BoxId, Target::Box);
anchor_shorthands!(Target, core::convert::identity);

/// Where a relation's value comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// A constant.
    Value(f64),
    /// One anchor of one box.
    Anchor(AnchorRef),
    /// The smallest of several anchors.
    Min(Vec<AnchorRef>),
    /// The largest of several anchors.
    Max(Vec<AnchorRef>),
}

impl Source {
    /// Smallest of `anchors`. An empty list reads 0.
    pub fn min(anchors: impl IntoIterator<Item = AnchorRef>) -> Self {
        Self::Min(anchors.into_iter().collect())
    }

    /// Largest of `anchors`. An empty list reads 0.
    pub fn max(anchors: impl IntoIterator<Item = AnchorRef>) -> Self {
        Self::Max(anchors.into_iter().collect())
    }

    /// Every anchor this source reads.
    pub fn anchors(&self) -> &[AnchorRef] {
        match self {
            Self::Value(_) => &[],
            Self::Anchor(a) => core::slice::from_ref(a),
            Self::Min(v) | Self::Max(v) => v,
        }
    }
}

impl From<f64> for Source {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<AnchorRef> for Source {
    fn from(a: AnchorRef) -> Self {
        Self::Anchor(a)
    }
}

/// What a relation constrains.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    /// Set one anchor of the configured box from `source`.
    Anchor { anchor: Anchor, source: Source },
    /// Width and height both follow the target's size.
    EqualSize { target: Target },
    /// `derived` = the other dimension × multiplier.
    AspectRatio { derived: Dimension },
    /// Size wraps the far edges of the box's layout children.
    FitContent,
}

/// Tie-break weight between relations on the same attribute.
///
/// The highest priority wins; equal priorities go to the relation declared
/// last.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u16);

impl Priority {
    pub const LOW: Self = Self(250);
    pub const HIGH: Self = Self(750);
    pub const REQUIRED: Self = Self(1000);
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

/// One relation: a rule plus its `value × multiplier + inset` adjustment.
#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    pub rule: Rule,
    pub multiplier: f64,
    pub inset: f64,
    pub priority: Priority,
}

impl Relation {
    /// Relation with multiplier 1, inset 0 and required priority.
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            multiplier: 1.0,
            inset: 0.0,
            priority: Priority::REQUIRED,
        }
    }

    /// Set `anchor` of the configured box from `source`.
    pub fn anchor(anchor: Anchor, source: impl Into<Source>) -> Self {
        Self::new(Rule::Anchor {
            anchor,
            source: source.into(),
        })
    }

    pub fn left(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::Left, source)
    }

    pub fn right(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::Right, source)
    }

    pub fn top(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::Top, source)
    }

    pub fn bottom(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::Bottom, source)
    }

    pub fn center_x(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::CenterX, source)
    }

    pub fn center_y(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::CenterY, source)
    }

    pub fn width(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::Width, source)
    }

    pub fn height(source: impl Into<Source>) -> Self {
        Self::anchor(Anchor::Height, source)
    }

    /// Width and height equal to `target`'s size.
    pub fn equal_size(target: impl Into<Target>) -> Self {
        Self::new(Rule::EqualSize {
            target: target.into(),
        })
    }

    /// `height = width × ratio`.
    pub fn height_to_width(ratio: f64) -> Self {
        Self::new(Rule::AspectRatio {
            derived: Dimension::Height,
        })
        .multiplier(ratio)
    }

    /// `width = height × ratio`.
    pub fn width_to_height(ratio: f64) -> Self {
        Self::new(Rule::AspectRatio {
            derived: Dimension::Width,
        })
        .multiplier(ratio)
    }

    /// Size to the far edges of the layout children.
    pub fn fit_content() -> Self {
        Self::new(Rule::FitContent)
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn inset(mut self, inset: f64) -> Self {
        self.inset = inset;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// `value × multiplier + inset`.
    pub(crate) fn adjust(&self, value: f64) -> f64 {
        value * self.multiplier + self.inset
    }

    /// Whether this relation centers the box on `axis` (a `CenterX` or
    /// `CenterY` anchor rule).
    pub fn centers_on(&self, axis: Axis) -> bool {
        matches!(
            self.rule,
            Rule::Anchor { anchor, .. } if anchor.is_center() && anchor.axis() == axis
        )
    }
}

/// Ordered relation set for one box and one configuration state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Relations {
    relations: Vec<Relation>,
    snap_scale: Option<f64>,
}

impl Relations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a relation.
    pub fn with(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Append a relation in place.
    pub fn push(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Snap the resolved frame to the pixel grid of `scale`.
    pub fn snap_to_pixels(mut self, scale: f64) -> Self {
        self.snap_scale = Some(scale);
        self
    }

    pub fn snap_scale(&self) -> Option<f64> {
        self.snap_scale
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Relation> {
        self.relations.iter()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Whether any relation centers the box on `axis`.
    pub fn centers_on(&self, axis: Axis) -> bool {
        self.relations.iter().any(|r| r.centers_on(axis))
    }
}

impl FromIterator<Relation> for Relations {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        Self {
            relations: iter.into_iter().collect(),
            snap_scale: None,
        }
    }
}

impl Extend<Relation> for Relations {
    fn extend<I: IntoIterator<Item = Relation>>(&mut self, iter: I) {
        self.relations.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Relations {
    type Item = &'a Relation;
    type IntoIter = core::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}
