//! Forest derivation
//!
//! [`build`] turns the flat list into a rooted forest. The forest is a
//! disposable projection: it is rebuilt from scratch for every query and
//! never edited and fed back.
//!
//! Entries whose parent is missing, unresolved, themselves, or on a cycle
//! become roots. No entry is ever dropped or placed twice.
//!
//! Nesting depth is unbounded, so nothing here recurses over the tree:
//! building, cloning, comparing, filtering and dropping all run on explicit
//! stacks.

use std::collections::{HashMap, HashSet};

use navmenu_model::{MenuEntry, SyntheticKey};
use tracing::trace;

use crate::links::ParentLinks;

/// One placed entry with its sorted children
#[derive(Debug)]
pub struct HierarchyNode {
    /// The entry itself
    pub entry: MenuEntry,

    /// Key of the enclosing node, `None` for roots
    pub parent_key: Option<SyntheticKey>,

    /// Distance from the root (roots are 0)
    pub depth: usize,

    /// Children, ascending by weight, ties in list order
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Key of this node's entry
    #[inline]
    #[must_use]
    pub fn key(&self) -> &SyntheticKey {
        self.entry.key()
    }

    /// Check if this node has children
    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, itself included
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Keys of every node below this one
    #[must_use]
    pub fn descendant_keys(&self) -> Vec<SyntheticKey> {
        let mut keys = Vec::new();
        let mut stack: Vec<&HierarchyNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            keys.push(node.key().clone());
            stack.extend(node.children.iter().rev());
        }
        keys
    }
}

impl Clone for HierarchyNode {
    fn clone(&self) -> Self {
        let kept = rebuild(self, |_, _| true);
        kept.unwrap_or_else(|| self.shallow_copy(Vec::new()))
    }
}

impl PartialEq for HierarchyNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.entry != b.entry
                || a.parent_key != b.parent_key
                || a.depth != b.depth
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Drop for HierarchyNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl HierarchyNode {
    fn shallow_copy(&self, children: Vec<HierarchyNode>) -> Self {
        Self {
            entry: self.entry.clone(),
            parent_key: self.parent_key.clone(),
            depth: self.depth,
            children,
        }
    }
}

/// Post-order copy of the subtree at `root`
///
/// `keep(node, has_kept_children)` decides whether a node survives; a
/// dropped node takes its (already dropped) subtree with it.
fn rebuild(
    root: &HierarchyNode,
    keep: impl Fn(&HierarchyNode, bool) -> bool,
) -> Option<HierarchyNode> {
    struct Frame<'a> {
        node: &'a HierarchyNode,
        next: usize,
        kept: Vec<HierarchyNode>,
    }

    let mut stack = vec![Frame {
        node: root,
        next: 0,
        kept: Vec::new(),
    }];
    while let Some(top) = stack.last_mut() {
        let node = top.node;
        if let Some(child) = node.children.get(top.next) {
            top.next += 1;
            stack.push(Frame {
                node: child,
                next: 0,
                kept: Vec::with_capacity(child.children.len()),
            });
            continue;
        }

        let frame = stack.pop()?;
        let copy = keep(frame.node, !frame.kept.is_empty())
            .then(|| frame.node.shallow_copy(frame.kept));
        match stack.last_mut() {
            Some(parent) => parent.kept.extend(copy),
            None => return copy,
        }
    }
    None
}

/// Rooted forest derived from a flat list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    /// Top-level nodes, ascending by weight, ties in list order
    pub roots: Vec<HierarchyNode>,
}

/// Derive the forest for `entries`
///
/// Never fails. A messy list yields a flatter tree, not an error.
#[must_use]
pub fn build(entries: &[MenuEntry]) -> Forest {
    let links = ParentLinks::resolve(entries);

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    for index in 0..entries.len() {
        match links.parent_of(index) {
            Some(parent) => children[parent].push(index),
            None => roots.push(index),
        }
    }

    // Stable sort keeps list order among equal weights
    let by_weight = |list: &mut Vec<usize>| list.sort_by_key(|&i| entries[i].weight());
    by_weight(&mut roots);
    for list in &mut children {
        by_weight(list);
    }

    // Pre-order over the accepted links; every attached chain ends at a root
    let mut order = Vec::with_capacity(entries.len());
    let mut depth = vec![0; entries.len()];
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(index) = stack.pop() {
        order.push(index);
        for &child in children[index].iter().rev() {
            depth[child] = depth[index] + 1;
            stack.push(child);
        }
    }

    // Reverse pre-order builds every child before its parent
    let mut built: Vec<Option<HierarchyNode>> = (0..entries.len()).map(|_| None).collect();
    for &index in order.iter().rev() {
        let nested = children[index]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(HierarchyNode {
            entry: entries[index].clone(),
            parent_key: links.parent_of(index).map(|p| entries[p].key().clone()),
            depth: depth[index],
            children: nested,
        });
    }

    let forest = Forest {
        roots: roots
            .iter()
            .filter_map(|&index| built[index].take())
            .collect(),
    };
    trace!(entries = entries.len(), roots = forest.roots.len(), "forest built");
    forest
}

impl Forest {
    /// Total number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.iter().map(HierarchyNode::subtree_len).sum()
    }

    /// Check if the forest has no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first, pre-order traversal in display order
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Node holding the entry with `key`
    #[must_use]
    pub fn find(&self, key: &SyntheticKey) -> Option<&HierarchyNode> {
        self.iter().find(|node| node.key() == key)
    }

    /// Keys of the ancestors of `key`, root first
    ///
    /// Empty for roots and for keys not in the forest.
    #[must_use]
    pub fn path_to(&self, key: &SyntheticKey) -> Vec<SyntheticKey> {
        let parents: HashMap<&SyntheticKey, Option<&SyntheticKey>> = self
            .iter()
            .map(|node| (node.key(), node.parent_key.as_ref()))
            .collect();

        let mut path = Vec::new();
        let mut current = parents.get(key).copied().flatten();
        while let Some(ancestor) = current {
            path.push(ancestor.clone());
            current = parents.get(ancestor).copied().flatten();
        }
        path.reverse();
        path
    }

    /// Keys of the top-level nodes
    #[must_use]
    pub fn root_keys(&self) -> Vec<SyntheticKey> {
        self.roots.iter().map(|node| node.key().clone()).collect()
    }

    /// Number of rows shown when only expanded nodes reveal their children
    #[must_use]
    pub fn visible_count(&self, is_expanded: impl Fn(&SyntheticKey) -> bool) -> usize {
        let mut count = 0;
        let mut stack: Vec<&HierarchyNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            if node.has_children() && is_expanded(node.key()) {
                stack.extend(node.children.iter());
            }
        }
        count
    }

    /// Forest restricted to nodes matching `term` and their ancestors
    ///
    /// A node is kept when its name, identifier or url contains `term`
    /// (case-insensitive), or when any descendant is kept. An empty term
    /// keeps everything.
    #[must_use]
    pub fn filter(&self, term: &str) -> Forest {
        if term.is_empty() {
            return self.clone();
        }
        let needle = term.to_lowercase();
        Forest {
            roots: self
                .roots
                .iter()
                .filter_map(|node| {
                    rebuild(node, |n, has_kept| has_kept || matches_term(&n.entry, &needle))
                })
                .collect(),
        }
    }

    /// Keys of every node
    #[must_use]
    pub fn keys(&self) -> HashSet<SyntheticKey> {
        self.iter().map(|node| node.key().clone()).collect()
    }
}

/// Case-insensitive substring match on name, identifier and url
///
/// `needle` must already be lowercase.
#[must_use]
pub fn matches_term(entry: &MenuEntry, needle: &str) -> bool {
    [&entry.name, &entry.identifier, &entry.url]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Pre-order iterator over a [`Forest`]
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a HierarchyNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
