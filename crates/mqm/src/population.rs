use bson::Bson;
use mqm_query::PopulationNode;

use crate::error::{CompileError, CompileResult};

/// The relation-expansion tree requested through `populate=`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationTree {
    nodes: Vec<PopulationNode>,
}

impl PopulationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `populate=` value such as `user,user.settings,pet`.
    ///
    /// Paths are inserted shallowest first. The sort is stable, so paths at
    /// the same depth keep their input order. Empty entries are skipped.
    pub fn from_value(value: &str) -> CompileResult<Self> {
        let mut paths: Vec<&str> = value.split(',').filter(|p| !p.is_empty()).collect();
        paths.sort_by_key(|p| p.matches('.').count());

        let mut tree = Self::new();
        for path in paths {
            tree.insert(path)?;
        }
        Ok(tree)
    }

    /// Insert one dotted path. Every ancestor must already be in the tree.
    ///
    /// A path without a dot is appended at the top level, even if a node with
    /// the same path is already there.
    pub fn insert(&mut self, path: &str) -> CompileResult<()> {
        let Some((head, rest)) = path.split_once('.') else {
            self.nodes.push(PopulationNode::new(path));
            return Ok(());
        };

        let parent = self
            .nodes
            .iter_mut()
            .find(|n| n.path == head)
            .ok_or_else(|| CompileError::LogicalPopulation {
                path: path.to_owned(),
            })?;
        attach(parent, rest, path)
    }

    /// Move a dotted projection field into the node that owns it.
    ///
    /// The first segment must name a top-level node. From there the walk
    /// descends while the next segment names an existing child, and the
    /// remaining suffix becomes a key in that node's projection. Returns
    /// `false` when no top-level node matches, leaving the tree untouched.
    pub fn route_field(&mut self, field: &str, sign: i32) -> bool {
        let Some((head, rest)) = field.split_once('.') else {
            return false;
        };
        let Some(node) = self.nodes.iter_mut().find(|n| n.path == head) else {
            return false;
        };
        project_into(node, rest, Bson::Int32(sign));
        true
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[PopulationNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<PopulationNode> {
        self.nodes
    }
}

fn attach(parent: &mut PopulationNode, rest: &str, path: &str) -> CompileResult<()> {
    match rest.split_once('.') {
        None => {
            parent.children.push(PopulationNode::new(rest));
            Ok(())
        }
        Some((head, rest)) => {
            let child =
                parent
                    .child_mut(head)
                    .ok_or_else(|| CompileError::LogicalSubPopulation {
                        path: path.to_owned(),
                    })?;
            attach(child, rest, path)
        }
    }
}

fn project_into(node: &mut PopulationNode, field: &str, value: Bson) {
    if let Some((head, rest)) = field.split_once('.')
        && let Some(child) = node.child_mut(head)
    {
        project_into(child, rest, value);
        return;
    }
    node.project(field, value);
}
