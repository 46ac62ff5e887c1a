use std::fmt;
use std::sync::Arc;

use bson::Bson;
use serde::Deserialize;

use crate::error::CasterError;

/// A named transform applied to the inner text of `name(inner)` values.
pub type CastFn = dyn Fn(&str) -> Result<Bson, CasterError> + Send + Sync;

/// Caller-supplied casters, consulted in registration order before any
/// built-in rule.
#[derive(Clone, Default)]
pub struct CasterTable {
    rules: Vec<(String, Arc<CastFn>)>,
}

impl CasterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `cast` under `name`. An existing caster with the same name
    /// is replaced in place, keeping its position.
    pub fn insert<F>(&mut self, name: impl Into<String>, cast: F)
    where
        F: Fn(&str) -> Result<Bson, CasterError> + Send + Sync + 'static,
    {
        let name = name.into();
        let cast: Arc<CastFn> = Arc::new(cast);
        match self.rules.iter_mut().find(|(n, _)| *n == name) {
            Some(rule) => rule.1 = cast,
            None => self.rules.push((name, cast)),
        }
    }

    pub fn with<F>(mut self, name: impl Into<String>, cast: F) -> Self
    where
        F: Fn(&str) -> Result<Bson, CasterError> + Send + Sync + 'static,
    {
        self.insert(name, cast);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &CastFn)> {
        self.rules.iter().map(|(name, cast)| (name.as_str(), cast.as_ref()))
    }
}

impl fmt::Debug for CasterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Read-only configuration for a compile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompileOptions {
    /// Argument names dropped before any other processing.
    #[serde(default)]
    pub blacklist: Vec<String>,
    /// Build the population tree from `populate=` and route dotted
    /// projection fields into it.
    #[serde(default)]
    pub populate: bool,
    #[serde(skip)]
    pub casters: CasterTable,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blacklist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_population(mut self, populate: bool) -> Self {
        self.populate = populate;
        self
    }

    pub fn with_casters(mut self, casters: CasterTable) -> Self {
        self.casters = casters;
        self
    }
}
