//! The reduction rules for each kind of node.
//!
//! Every `reduce` function in this module reduces the children of the node first, then applies the
//! rules for the node itself.

pub(crate) mod log;
pub(crate) mod power;
pub(crate) mod product;
pub(crate) mod sum;
pub(crate) mod trigonometry;
