//! Directory tree walking
//!
//! [`TreeWalker`] drives a recursive, pruning traversal of the scan root and
//! reports every non-excluded entry to a [`TreeVisitor`]. The header pass
//! and both report builders are visitors over the same walk.

mod utils;
mod visitor;
mod walker;

pub use utils::{join_relative, read_sorted_entries, relative_path};
pub use visitor::{Entry, TreeVisitor};
pub use walker::{TreeWalker, WalkStats};
