//! Instance selection model
//!
//! Holds the client-visible snapshot of a process instance hierarchy and
//! keeps per-node checked state consistent as rows are toggled. The set of
//! checked ids is what a bulk operation takes as its input.
//!
//! Nodes live in an arena keyed by instance id rather than a nested object
//! graph, so recomputing a parent's flag is a lookup over child ids instead
//! of a traversal through shared mutable structures.
//!
//! Aggregation rules:
//! - Toggling a top-level instance cascades its new value to every loaded
//!   descendant.
//! - Toggling a child flips that child alone, then recomputes the direct
//!   parent's flag as the AND over all of the parent's loaded children.
//!   The recomputation does not ripple further up; top-level flags are only
//!   driven by explicit top-level toggles.

use indexmap::{IndexMap, IndexSet};

use crate::domain::process::ProcessInstance;

/// A process instance plus its selection bookkeeping.
#[derive(Debug, Clone)]
pub struct InstanceNode {
    pub instance: ProcessInstance,
    pub is_checked: bool,
    children: Vec<String>,
    children_loaded: bool,
}

impl InstanceNode {
    fn new(instance: ProcessInstance) -> Self {
        Self {
            instance,
            is_checked: false,
            children: Vec::new(),
            children_loaded: false,
        }
    }

    /// Ids of loaded children, in fetch order.
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Whether a child fetch has completed for this node.
    pub fn children_loaded(&self) -> bool {
        self.children_loaded
    }
}

/// Arena of instance nodes with parent/child checked-state aggregation.
#[derive(Debug, Clone, Default)]
pub struct InstanceTree {
    nodes: IndexMap<String, InstanceNode>,
    selected: IndexSet<String>,
}

impl InstanceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tree from a freshly fetched top-level instance list.
    ///
    /// Replaces any previous contents and drops the selection.
    pub fn insert_roots(&mut self, instances: Vec<ProcessInstance>) {
        self.clear();
        for instance in instances {
            self.nodes
                .insert(instance.id.clone(), InstanceNode::new(instance));
        }
    }

    pub fn get(&self, id: &str) -> Option<&InstanceNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a fetched child list to `parent_id`.
    ///
    /// A no-op when the parent is gone (the list was refreshed while the
    /// fetch was in flight) or when its children were already loaded; the
    /// first completed fetch wins for the session.
    ///
    /// Children fetched under an already-checked parent come in checked,
    /// keeping the parent flag equal to the AND over its loaded children.
    pub fn load_children(&mut self, parent_id: &str, children: Vec<ProcessInstance>) {
        let parent_checked = match self.nodes.get(parent_id) {
            Some(node) if !node.children_loaded => node.is_checked,
            _ => return,
        };

        let mut child_ids = Vec::with_capacity(children.len());
        for child in children {
            let id = child.id.clone();
            let mut node = InstanceNode::new(child);
            node.is_checked = parent_checked;
            if parent_checked {
                self.selected.insert(id.clone());
            }
            child_ids.push(id.clone());
            self.nodes.insert(id, node);
        }

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children = child_ids;
            parent.children_loaded = true;
        }
    }

    /// Toggle the checkbox for `id`.
    ///
    /// Unknown ids are ignored; a child whose parent is not in the arena
    /// still flips its own flag, the parent recomputation is simply skipped.
    pub fn toggle(&mut self, id: &str) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let parent_id = node.instance.parent_process_instance_id.clone();
        let new_value = !node.is_checked;

        match parent_id {
            None => self.set_subtree(id, new_value),
            Some(parent_id) => {
                self.set_flag(id, new_value);
                self.recompute_parent(&parent_id);
            }
        }
    }

    /// Owned snapshot of the currently selected ids, in selection order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Snapshot of the selected instances keyed by id, in selection order.
    ///
    /// This is the input shape the bulk executor takes.
    pub fn selected_instances(&self) -> IndexMap<String, ProcessInstance> {
        self.selected
            .iter()
            .filter_map(|id| {
                self.nodes
                    .get(id)
                    .map(|node| (id.clone(), node.instance.clone()))
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.selected.clear();
    }

    fn set_flag(&mut self, id: &str, value: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.is_checked = value;
            if value {
                self.selected.insert(id.to_string());
            } else {
                self.selected.shift_remove(id);
            }
        }
    }

    /// Set `id` and every loaded descendant to `value`.
    fn set_subtree(&mut self, id: &str, value: bool) {
        let mut pending = vec![id.to_string()];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.get(&current) {
                pending.extend(node.children.iter().cloned());
            }
            self.set_flag(&current, value);
        }
    }

    /// The parent is checked iff every loaded child is checked. Skipped when
    /// the parent is gone or its children were never fetched.
    fn recompute_parent(&mut self, parent_id: &str) {
        let Some(parent) = self.nodes.get(parent_id) else {
            return;
        };
        if !parent.children_loaded {
            return;
        }
        let all_checked = parent
            .children
            .iter()
            .all(|child_id| self.nodes.get(child_id).is_some_and(|c| c.is_checked));
        self.set_flag(parent_id, all_checked);
    }
}
