//! Buddy tree nodes.
//!
//! This module provides the basic unit of the buddy tree, the nodes. A node covers a single block
//! of the region. It is either a leaf, which may hold data, or it is split into two half-sized
//! buddies, which it owns exclusively.

use crate::block::{Address, Block};
use crate::fail::{Error, Result};

/// The state of a node.
#[derive(Debug)]
pub(crate) enum State {
    /// An unsplit block.
    Leaf {
        /// The number of bytes in use. Zero means that the block is free.
        used: usize,
    },
    /// A block split into two buddies.
    ///
    /// A split node never holds data on its own.
    Split {
        /// The lower half.
        left: Box<Node>,
        /// The upper half.
        right: Box<Node>,
    },
}

/// A buddy tree node.
#[derive(Debug)]
pub(crate) struct Node {
    /// The block covered by this node.
    block: Block,
    /// The number of times this block may still be halved.
    order: usize,
    /// The leaf or split state.
    state: State,
}

impl Node {
    /// Create a free leaf.
    pub fn new(block: Block, order: usize) -> Node {
        Node {
            block,
            order,
            state: State::Leaf { used: 0 },
        }
    }

    /// The block covered by this node.
    #[inline]
    pub fn block(&self) -> Block {
        self.block
    }

    /// The order of this node.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// The number of bytes in use, or `None` for split nodes.
    #[inline]
    pub fn used(&self) -> Option<usize> {
        match self.state {
            State::Leaf { used } => Some(used),
            State::Split { .. } => None,
        }
    }

    /// The two buddies of a split node.
    #[inline]
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self.state {
            State::Leaf { .. } => None,
            State::Split {
                ref left,
                ref right,
            } => Some((&**left, &**right)),
        }
    }

    /// Is this an unsplit, unoccupied block?
    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self.state, State::Leaf { used: 0 })
    }

    /// The occupied part of this block, if it is an occupied leaf.
    #[inline]
    pub fn occupied(&self) -> Option<Block> {
        match self.state {
            State::Leaf { used } if used != 0 => Some(self.block.split(used).0),
            _ => None,
        }
    }

    /// Find the left-most free leaf of at least the given order.
    ///
    /// A free leaf is its own candidate. A split node prefers its left buddy, which makes the
    /// placement of allocations deterministic.
    pub fn find_candidate(&self, order: usize) -> Option<&Node> {
        if self.order < order {
            return None;
        }

        match self.state {
            State::Leaf { used: 0 } => Some(self),
            State::Leaf { .. } => None,
            State::Split {
                ref left,
                ref right,
            } => left
                .find_candidate(order)
                .or_else(|| right.find_candidate(order)),
        }
    }

    /// Mutable counterpart of [`find_candidate`](#method.find_candidate).
    pub fn find_candidate_mut(&mut self, order: usize) -> Option<&mut Node> {
        if self.order < order {
            return None;
        }
        if self.is_free() {
            return Some(self);
        }

        match self.state {
            State::Leaf { .. } => None,
            State::Split {
                ref mut left,
                ref mut right,
            } => match left.find_candidate_mut(order) {
                Some(node) => Some(node),
                None => right.find_candidate_mut(order),
            },
        }
    }

    /// Find the leaf starting at `address`.
    ///
    /// Only the buddy whose range covers the address is visited on each level.
    pub fn leaf(&self, address: Address) -> Option<&Node> {
        match self.state {
            State::Leaf { .. } => (self.block.address() == address).then_some(self),
            State::Split {
                ref left,
                ref right,
            } => {
                if address < right.block.address() {
                    left.leaf(address)
                } else {
                    right.leaf(address)
                }
            }
        }
    }

    /// Split this block into two free buddies, and return the left one.
    ///
    /// Only free leaves are ever split: a search candidate, or the left buddy of a block which was
    /// just split.
    pub fn split(&mut self) -> &mut Node {
        assert!(
            self.is_free() && self.order > 0,
            "Splitting a block which is not a free leaf ({:?}, order {}).",
            self.block,
            self.order
        );

        let (left, right) = self.block.halve();
        log::debug!("split {:?} into {:?} and {:?}", self.block, left, right);

        self.state = State::Split {
            left: Box::new(Node::new(left, self.order - 1)),
            right: Box::new(Node::new(right, self.order - 1)),
        };

        let State::Split { ref mut left, .. } = self.state else {
            unreachable!();
        };
        left
    }

    /// Merge the buddies of this node, if both are free leaves.
    ///
    /// The children are dropped together with their (possibly deep) subtrees, and this node
    /// becomes a free leaf again. Returns whether a merge happened.
    pub fn try_merge(&mut self) -> bool {
        let mergeable = matches!(
            self.state,
            State::Split { ref left, ref right } if left.is_free() && right.is_free()
        );

        if mergeable {
            log::debug!("merge buddies of {:?}", self.block);
            self.state = State::Leaf { used: 0 };
        }

        mergeable
    }

    /// Mark this free leaf as holding `used` bytes, and return the occupied part of the block.
    pub fn occupy(&mut self, used: usize) -> Block {
        assert!(self.is_free(), "Occupying a block which is not free ({:?}).", self.block);
        assert!(
            used != 0 && used <= self.block.size(),
            "{} bytes do not fit {:?}.",
            used,
            self.block
        );

        self.state = State::Leaf { used };
        self.block.split(used).0
    }

    /// Release the occupied leaf starting at `address`, and return the part of it that was
    /// occupied.
    ///
    /// On the way back up, every split node whose buddies are now both free is merged, so a
    /// release may cascade into merges all the way up to the root. A failed release does not
    /// touch the tree.
    pub fn release(&mut self, address: Address) -> Result<Block> {
        let res = match self.state {
            State::Leaf { ref mut used } => {
                return if self.block.address() == address && *used != 0 {
                    let span = self.block.split(*used).0;
                    *used = 0;
                    Ok(span)
                } else {
                    Err(Error::InvalidAddress { address })
                };
            }
            State::Split {
                ref mut left,
                ref mut right,
            } => {
                if address < right.block.address() {
                    left.release(address)
                } else {
                    right.release(address)
                }
            }
        };

        if res.is_ok() {
            self.try_merge();
        }

        res
    }

    /// Visit the subtree in order (left buddy, node, right buddy), with each node's depth below
    /// `depth`.
    pub fn walk<F: FnMut(&Node, usize)>(&self, depth: usize, f: &mut F) {
        if let Some((left, _)) = self.children() {
            left.walk(depth + 1, f);
        }
        f(self, depth);
        if let Some((_, right)) = self.children() {
            right.walk(depth + 1, f);
        }
    }

    /// The number of occupied bytes in this subtree.
    pub fn total_used(&self) -> usize {
        match self.state {
            State::Leaf { used } => used,
            State::Split {
                ref left,
                ref right,
            } => left.total_used() + right.total_used(),
        }
    }

    /// The left-most of the largest free leaves in this subtree.
    pub fn largest_free(&self) -> Option<Block> {
        match self.state {
            State::Leaf { used: 0 } => Some(self.block),
            State::Leaf { .. } => None,
            State::Split {
                ref left,
                ref right,
            } => match (left.largest_free(), right.largest_free()) {
                (Some(l), Some(r)) if r.size() > l.size() => Some(r),
                (l, r) => l.or(r),
            },
        }
    }

    /// Perform consistency checks.
    ///
    /// This will check for the following conditions:
    ///
    /// 1. Every block has the capacity of its order.
    /// 2. Leaves hold at most their capacity.
    /// 3. The buddies of a split node are the two halves of its block, one order lower.
    /// 4. No split node has two free buddies (they would have been merged).
    pub fn check(&self, min_block_size: usize) {
        assert_eq!(
            self.block.size(),
            min_block_size << self.order,
            "Block {:?} does not match its order {}.",
            self.block,
            self.order
        );

        match self.state {
            State::Leaf { used } => {
                assert!(used <= self.block.size(), "Block {:?} holds {} bytes.", self.block, used);
            }
            State::Split {
                ref left,
                ref right,
            } => {
                assert!(self.order > 0, "Block {:?} of order 0 is split.", self.block);
                assert!(
                    left.order + 1 == self.order && right.order + 1 == self.order,
                    "Buddies of {:?} have orders {} and {}.",
                    self.block,
                    left.order,
                    right.order
                );
                assert!(
                    left.block.buddy_of(&right.block)
                        && left.block.merge_right(right.block) == Some(self.block),
                    "{:?} and {:?} are not the halves of {:?}.",
                    left.block,
                    right.block,
                    self.block
                );
                assert!(
                    !(left.is_free() && right.is_free()),
                    "Unmerged free buddies in {:?}.",
                    self.block
                );

                left.check(min_block_size);
                right.check(min_block_size);
            }
        }
    }
}
