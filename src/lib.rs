//! This crate implements a height-balanced Binary Search Tree (BST)
//! over unique comparable keys.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). With clever construction the
//! height of a BST can be limited to `O(lg N)` where `N` is the number of nodes
//! in the tree. BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! The tree in this crate keeps its height low by construction rather than by
//! rotation: [`Tree::build`](tree::Tree::build) produces a height-balanced
//! shape from any input, plain inserts are allowed to degrade that shape, and
//! [`Tree::rebalance`](tree::Tree::rebalance) restores it on demand with a
//! full rebuild.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod gen;
pub mod tree;

#[cfg(test)]
mod test;
