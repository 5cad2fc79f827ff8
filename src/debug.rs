//! Debugging primitives.
//!
//! Two renderings of a buddy tree: a compact one-line form for the logs, and the multi-line dump
//! which shows the bytes in use at every node.

use core::fmt::{self, Write};

use crate::block::Address;
use crate::node::Node;

/// A "tree logger".
///
/// This intends to show the structure of a buddy tree in a single line. The syntax used is like:
///
/// ```text
/// (((|x_)_)x)
/// ```
///
/// where `x` denotes an occupied leaf, `_` denotes a free leaf, and a parenthesized pair is a
/// split block. `|` marks the leaf at the cursor, which is what the logged operation "revolves
/// around".
pub(crate) struct TreeLogger<'a> {
    /// The root of the tree.
    root: &'a Node,
    /// The address of the leaf to mark.
    cursor: Option<Address>,
}

impl<'a> TreeLogger<'a> {
    /// Log the tree below `root`, without a cursor.
    pub fn new(root: &'a Node) -> TreeLogger<'a> {
        TreeLogger { root, cursor: None }
    }

    /// Place the cursor at the leaf starting at `address`.
    pub fn cursor(self, address: Address) -> TreeLogger<'a> {
        TreeLogger {
            cursor: Some(address),
            ..self
        }
    }

    fn node(&self, f: &mut fmt::Formatter, node: &Node) -> fmt::Result {
        match node.children() {
            Some((left, right)) => {
                f.write_char('(')?;
                self.node(f, left)?;
                self.node(f, right)?;
                f.write_char(')')
            }
            None => {
                if self.cursor == Some(node.block().address()) {
                    f.write_char('|')?;
                }

                f.write_char(if node.is_free() { '_' } else { 'x' })
            }
        }
    }
}

impl<'a> fmt::Debug for TreeLogger<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.node(f, self.root)
    }
}

/// The width of a column of the dump.
const COLUMN: usize = 7;

/// A dump of a buddy tree.
///
/// Every node is printed on its own line, in address order (left buddy, node, right buddy),
/// indented by its depth. Leaves show the number of bytes in use, split nodes show `-`. The
/// header names the order of each column:
///
/// ```text
/// Order:4      3      2      1      0
///                        70000
///                     -
///                            0
///              -
///                     0
///       -
///         500000
/// ```
pub struct Dump<'a> {
    /// The root of the tree.
    root: &'a Node,
    /// The order of the root.
    max_order: usize,
}

impl<'a> Dump<'a> {
    pub(crate) fn new(root: &'a Node, max_order: usize) -> Dump<'a> {
        Dump { root, max_order }
    }
}

impl<'a> fmt::Display for Dump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Order:{}", self.max_order)?;
        for order in (0..self.max_order).rev() {
            write!(f, "{:>w$}", order, w = COLUMN)?;
        }
        writeln!(f)?;

        let mut res = Ok(());
        self.root.walk(0, &mut |node, depth| {
            if res.is_err() {
                return;
            }

            let indent = depth * COLUMN;
            res = match node.used() {
                Some(used) => writeln!(f, "{:indent$}{:>w$}", "", used, w = COLUMN),
                None => writeln!(f, "{:indent$}{:>w$}", "", "-", w = COLUMN),
            };
        });

        res
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::block::Block;

    #[test]
    fn test_tree_logger() {
        let mut root = Node::new(Block::new(0, 64), 2);
        assert_eq!(format!("{:?}", TreeLogger::new(&root)), "_");

        root.split().split().occupy(3);
        assert_eq!(format!("{:?}", TreeLogger::new(&root)), "((x_)_)");
        assert_eq!(
            format!("{:?}", TreeLogger::new(&root).cursor(Address::new(16))),
            "((x|_)_)"
        );
        // Split nodes are never marked.
        assert_eq!(
            format!("{:?}", TreeLogger::new(&root).cursor(Address::new(0))),
            "((|x_)_)"
        );
    }

    #[test]
    fn test_dump() {
        let mut root = Node::new(Block::new(0, 32), 1);
        root.split().occupy(7);

        assert_eq!(
            Dump::new(&root, 1).to_string(),
            "Order:1      0\n\
             \x20            7\n\
             \x20     -\n\
             \x20            0\n"
        );
    }

    #[test]
    fn test_dump_single() {
        let root = Node::new(Block::new(0, 16), 0);

        assert_eq!(Dump::new(&root, 0).to_string(), "Order:0\n      0\n");
    }
}
