use mqm_query::QueryDocument;
use percent_encoding::percent_decode_str;
use tracing::{debug, trace};

use crate::blacklist::Blacklist;
use crate::cast::Caster;
use crate::error::CompileResult;
use crate::filter::{FilterMerger, build_fragment};
use crate::options::CompileOptions;
use crate::params::{Reserved, parse_limit, parse_skip, parse_sort, text_fragment};
use crate::population::PopulationTree;
use crate::projection::parse_projection;

/// Compiles query strings with a fixed, read-only configuration.
///
/// Holds no per-compile state, so one `Compiler` can serve any number of
/// threads at once.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a raw (still percent-encoded) query string.
    ///
    /// The string is decoded as a whole and then split on `&`. In population
    /// mode a first pass builds the population tree so that `fields=` can
    /// route into it regardless of argument order. The second pass dispatches
    /// every argument in input order. Reserved arguments overwrite any earlier
    /// occurrence; filter arguments merge into the filter document.
    pub fn compile(&self, query: &str) -> CompileResult<QueryDocument> {
        let decoded = percent_decode_str(query).decode_utf8_lossy();
        let args: Vec<&str> = decoded.split('&').filter(|a| !a.is_empty()).collect();
        let blacklist = Blacklist::new(self.options.blacklist.as_slice());
        let caster = Caster::new(&self.options.casters);

        debug!(args = args.len(), populate = self.options.populate, "compiling query string");

        let mut population = if self.options.populate {
            Some(build_population(&args, &blacklist)?)
        } else {
            None
        };

        let mut result = QueryDocument::default();
        let mut filter = FilterMerger::new();

        for &arg in &args {
            if blacklist.blocks(arg) {
                trace!(arg, "skipping blacklisted argument");
                continue;
            }

            match Reserved::split(arg) {
                Some((reserved, value)) => {
                    trace!(arg, ?reserved, "dispatching reserved argument");
                    match reserved {
                        Reserved::Sort => result.sort = parse_sort(value),
                        Reserved::Limit => result.limit = parse_limit(value)?,
                        Reserved::Skip => result.skip = parse_skip(value)?,
                        Reserved::Fields => {
                            result.projection = parse_projection(value, population.as_mut())?;
                        }
                        Reserved::Text => filter.merge(text_fragment(value)?),
                        // Built in the first pass.
                        Reserved::Populate => {}
                    }
                }
                None => {
                    trace!(arg, "dispatching filter argument");
                    filter.merge(build_fragment(arg, &caster)?);
                }
            }
        }

        result.filter = filter.into_document();
        result.population = population.map(PopulationTree::into_nodes);

        debug!(
            filters = result.filter.len(),
            sorted = result.sort.is_some(),
            projected = result.projection.is_some(),
            "compiled query string"
        );
        Ok(result)
    }
}

/// The last non-empty `populate=` argument wins.
fn build_population(args: &[&str], blacklist: &Blacklist) -> CompileResult<PopulationTree> {
    let value = args
        .iter()
        .filter(|arg| !blacklist.blocks(arg))
        .filter_map(|arg| match Reserved::split(arg) {
            Some((Reserved::Populate, value)) if !value.is_empty() => Some(value),
            _ => None,
        })
        .last();

    match value {
        Some(value) => PopulationTree::from_value(value),
        None => Ok(PopulationTree::new()),
    }
}

/// Compile `query` once with `options`.
pub fn compile(query: &str, options: &CompileOptions) -> CompileResult<QueryDocument> {
    Compiler::new(options.clone()).compile(query)
}
