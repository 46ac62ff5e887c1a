mod blacklist;
mod cast;
mod compiler;
mod error;
mod filter;
mod operator;
mod options;
mod params;
mod population;
mod projection;

pub use bson::{Bson, Document};
pub use cast::{Caster, cast_builtin};
pub use compiler::{Compiler, compile};
pub use error::{BoundFault, CasterError, CompileError, CompileResult};
pub use filter::{Condition, FilterMerger, Fragment, build_fragment};
pub use mqm_query::{
    Operator, PopulationNode, QueryDocument, Sort, SortDirection, ASCENDING, DESCENDING,
};
pub use operator::resolve_operator;
pub use options::{CastFn, CasterTable, CompileOptions};
pub use params::{Reserved, parse_limit, parse_skip, parse_sort, text_fragment};
pub use population::PopulationTree;
pub use projection::parse_projection;
