//! Arena-based DOM for the diff engine.
//!
//! Source versions are parsed with html5ever and converted into a [`Tree`]:
//! a flat arena of nodes addressed by stable [`NodeId`] indices, each node
//! carrying a nullable parent index and an ordered child list. The merged
//! output is built in a second arena of the same shape, so grafting cloned
//! nodes between trees never has to reason about reference lifetimes.

mod node;
mod parse;
mod serialize;
mod tree;

pub use node::Attr;
pub(crate) use node::{NodeKind, node_equal, shape_equal};
pub(crate) use parse::parse_fragment;
pub(crate) use serialize::render;
pub(crate) use tree::{NodeId, Tree};
