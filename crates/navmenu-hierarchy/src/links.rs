//! Parent-link resolution over the flat list
//!
//! Resolves every entry's `parent` to an index in the list and marks the
//! entries that sit on a parent cycle. Shared by the forest builder and the
//! integrity analyzer so both agree on what "attached" means.

use std::collections::HashMap;

use navmenu_model::MenuEntry;

/// Why an entry did not get a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Detached {
    /// No `parent` field (or an empty one)
    NoParent,
    /// `parent` names no identifier in the list
    Unresolved,
    /// `parent` names the entry's own identifier
    SelfParent,
    /// Attaching would close a loop
    Cycle,
}

/// Resolved parent links for one flat list
#[derive(Debug)]
pub(crate) struct ParentLinks {
    /// Raw resolution, before cycle breaking
    tentative: Vec<Option<usize>>,
    /// Accepted parent index or the reason there is none
    resolved: Vec<Result<usize, Detached>>,
}

impl ParentLinks {
    pub(crate) fn resolve(entries: &[MenuEntry]) -> Self {
        // Last write wins on duplicate identifiers
        let mut by_identifier: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if let Some(identifier) = entry.identifier() {
                by_identifier.insert(identifier, index);
            }
        }

        let lookup: Vec<Result<usize, Detached>> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let parent = entry.parent().ok_or(Detached::NoParent)?;
                let &target = by_identifier.get(parent).ok_or(Detached::Unresolved)?;
                if target == index {
                    return Err(Detached::SelfParent);
                }
                Ok(target)
            })
            .collect();

        let tentative: Vec<Option<usize>> = lookup.iter().map(|r| r.ok()).collect();
        let looped = on_cycle(&tentative);

        let resolved = lookup
            .into_iter()
            .enumerate()
            .map(|(index, link)| {
                let parent = link?;
                if looped[index] {
                    Err(Detached::Cycle)
                } else {
                    Ok(parent)
                }
            })
            .collect();

        Self {
            tentative,
            resolved,
        }
    }

    /// Accepted parent of `index`
    #[inline]
    pub(crate) fn parent_of(&self, index: usize) -> Option<usize> {
        self.resolved[index].ok()
    }

    /// Reason `index` has no parent, if it has none
    #[inline]
    pub(crate) fn detached(&self, index: usize) -> Option<Detached> {
        self.resolved[index].err()
    }

    /// Walk the raw links from `start` until the loop closes
    ///
    /// Only meaningful for indices detached with [`Detached::Cycle`] or
    /// [`Detached::SelfParent`].
    pub(crate) fn cycle_from(&self, start: usize) -> Vec<usize> {
        let mut members = vec![start];
        let mut current = self.tentative[start];
        while let Some(next) = current {
            if next == start || members.len() > self.tentative.len() {
                break;
            }
            members.push(next);
            current = self.tentative[next];
        }
        members
    }
}

/// Mark every index whose raw link chain leads back to itself
///
/// Each index has at most one outgoing link, so one walk per unvisited
/// index finds every loop in linear time.
fn on_cycle(tentative: &[Option<usize>]) -> Vec<bool> {
    const UNSEEN: usize = usize::MAX;

    let mut looped = vec![false; tentative.len()];
    // Walk that first reached each index, UNSEEN until visited
    let mut walk_of = vec![UNSEEN; tentative.len()];
    let mut path = Vec::new();

    for start in 0..tentative.len() {
        if walk_of[start] != UNSEEN {
            continue;
        }
        path.clear();
        let mut current = Some(start);
        while let Some(index) = current {
            if walk_of[index] != UNSEEN {
                // Closing on this walk's own path means a new loop
                if walk_of[index] == start {
                    if let Some(pos) = path.iter().position(|&i| i == index) {
                        for &member in &path[pos..] {
                            looped[member] = true;
                        }
                    }
                }
                break;
            }
            walk_of[index] = start;
            path.push(index);
            current = tentative[index];
        }
    }
    looped
}
