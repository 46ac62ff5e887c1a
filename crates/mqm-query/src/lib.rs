mod operator;
mod population;
mod query;
mod sort;

pub use operator::{EXISTS, IN, NOT_IN, Operator, SEARCH, TEXT};
pub use population::PopulationNode;
pub use query::QueryDocument;
pub use sort::{ASCENDING, DESCENDING, Sort, SortDirection};
