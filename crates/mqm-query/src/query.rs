use bson::Document;
use serde::Serialize;

use crate::population::PopulationNode;
use crate::sort::Sort;

/// A compiled query, ready to be handed to a database client.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryDocument {
    /// Field path to a literal value or an operator sub-document.
    pub filter: Document,
    /// `None` when no `sort=` argument was given or its value was empty.
    pub sort: Option<Vec<Sort>>,
    pub skip: u64,
    pub limit: u64,
    /// `None` when no `fields=` argument was given or it produced nothing.
    pub projection: Option<Document>,
    /// Only `Some` when the compile ran in population mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Vec<PopulationNode>>,
}

impl QueryDocument {
    /// Keyword-style document for a driver's `find`.
    ///
    /// Only fails for a `skip` or `limit` beyond `i64::MAX`.
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

impl TryFrom<QueryDocument> for Document {
    type Error = bson::ser::Error;

    fn try_from(query: QueryDocument) -> Result<Self, Self::Error> {
        query.to_document()
    }
}
