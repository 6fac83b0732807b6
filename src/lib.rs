//! Relation-based frame layout for box trees.
//!
//! Boxes are positioned and sized by declarative relations (edge to edge,
//! size to size, center to center, aspect ratio, fit-content) resolved in a
//! fixed order, without a general constraint solver. Resolved frames are
//! cached per box and per named configuration state, so a box can switch
//! between layouts without recomputing.
//!
//! # Modules
//!
//! - [`geometry`]: `Rect`, `Size`, `Insets`, edge accessors and the one-edge mutator
//! - [`tree`]: `BoxTree` arena, parent/child links, per-state frame cache
//! - [`convert`]: coordinate conversion between box spaces
//! - [`relation`]: relation model and the `Relations` builder
//! - [`resolve`]: size-then-position resolution engine
//! - [`container`]: fit-content containers with padding

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod container;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod relation;
pub mod resolve;
pub mod tree;

pub use container::Container;
pub use error::LayoutError;
pub use geometry::{Axis, EPSILON, Insets, Rect, Size};
pub use relation::{
    Anchor, AnchorRef, Dimension, Priority, Relation, Relations, Rule, Source, Target,
};
pub use tree::{Ancestors, BoxId, BoxTree, StateKey, StateSwitch};
