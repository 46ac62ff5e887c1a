use bson::{Bson, Document};
use serde::Serialize;

/// One relation to expand alongside the primary result.
///
/// Children are owned by their parent and addressed by `path`, so the
/// tree is built by appending only and can never contain cycles.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PopulationNode {
    /// Relation name at this level. Never contains a `.`.
    pub path: String,
    /// Field map scoped to this relation, created on first use.
    pub projection: Option<Document>,
    #[serde(rename = "population", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PopulationNode>,
}

impl PopulationNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            projection: None,
            children: Vec::new(),
        }
    }

    /// First child whose path is `path`.
    pub fn child(&self, path: &str) -> Option<&PopulationNode> {
        self.children.iter().find(|c| c.path == path)
    }

    pub fn child_mut(&mut self, path: &str) -> Option<&mut PopulationNode> {
        self.children.iter_mut().find(|c| c.path == path)
    }

    /// Set `field` to `value` in this node's projection.
    pub fn project(&mut self, field: impl Into<String>, value: impl Into<Bson>) {
        self.projection
            .get_or_insert_with(Document::new)
            .insert(field.into(), value.into());
    }

    /// `{ path, projection, population? }`. The `population` key only
    /// appears when the node has children.
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn leaf_node_document() {
        let node = PopulationNode::new("user");
        assert_eq!(node.to_document().unwrap(), doc! { "path": "user", "projection": null });
    }

    #[test]
    fn nested_node_document() {
        let mut user = PopulationNode::new("user");
        user.project("name", 1);
        user.children.push(PopulationNode::new("settings"));

        assert_eq!(
            user.to_document().unwrap(),
            doc! {
                "path": "user",
                "projection": { "name": 1 },
                "population": [{ "path": "settings", "projection": null }],
            }
        );
    }

    #[test]
    fn child_lookup_returns_first_match() {
        let mut user = PopulationNode::new("user");
        user.children.push(PopulationNode::new("settings"));
        user.children.push(PopulationNode::new("settings"));
        user.child_mut("settings").unwrap().project("theme", 0);

        assert!(user.children[0].projection.is_some());
        assert!(user.children[1].projection.is_none());
        assert!(user.child("missing").is_none());
    }
}
