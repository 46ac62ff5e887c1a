use bson::{Bson, Document};
use mqm_query::{EXISTS, IN, NOT_IN, Operator};

use crate::cast::Caster;
use crate::error::{CompileError, CompileResult};
use crate::operator::resolve_operator;

/// What a single argument asks of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Direct equality, written without an operator wrapper.
    Equals(Bson),
    /// Operator sub-document such as `{ "$gt": 5 }`.
    Operators(Document),
}

impl Condition {
    fn operator(symbol: &str, value: impl Into<Bson>) -> Self {
        let mut doc = Document::new();
        doc.insert(symbol, value.into());
        Self::Operators(doc)
    }

    pub fn into_bson(self) -> Bson {
        match self {
            Self::Equals(value) => value,
            Self::Operators(doc) => Bson::Document(doc),
        }
    }
}

/// A partial filter produced from one argument, before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub field: String,
    pub condition: Condition,
}

impl Fragment {
    pub fn new(field: impl Into<String>, condition: Condition) -> Self {
        Self {
            field: field.into(),
            condition,
        }
    }

    fn exists(field: &str, present: bool) -> Self {
        Self::new(field, Condition::operator(EXISTS, present))
    }
}

/// Build the filter fragment for a non-reserved argument.
///
/// ```text
/// phone        -> { phone: { $exists: true } }
/// !phone       -> { phone: { $exists: false } }
/// count>5      -> { count: { $gt: 5 } }
/// status=5     -> { status: 5 }
/// country=A,B  -> { country: { $in: ["A", "B"] } }
/// country!=A,B -> { country: { $nin: ["A", "B"] } }
/// ```
pub fn build_fragment(arg: &str, caster: &Caster<'_>) -> CompileResult<Fragment> {
    let Some(operator) = resolve_operator(arg) else {
        return Ok(Fragment::exists(arg, true));
    };

    let mut parts = arg.split(operator.token());
    let (Some(field), Some(raw), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CompileError::Filter {
            filter: arg.to_owned(),
            operator,
        });
    };

    // `!field`: the field name is what follows the operator.
    if operator == Operator::Not {
        return Ok(Fragment::exists(raw, false));
    }

    let condition = match (caster.cast(raw)?, operator) {
        (Bson::Array(items), Operator::Eq) => Condition::operator(IN, items),
        (Bson::Array(items), Operator::Ne) => Condition::operator(NOT_IN, items),
        (Bson::Array(_), operator) => {
            return Err(CompileError::ListOperator {
                field: field.to_owned(),
                operator,
            });
        }
        (value, Operator::Eq) => Condition::Equals(value),
        (value, operator) => Condition::operator(operator.symbol(), value),
    };

    Ok(Fragment::new(field, condition))
}

/// Folds fragments into one filter document.
///
/// Two operator documents on the same field are merged key by key, with the
/// later fragment winning on a shared operator. When either side is a direct
/// equality the later fragment replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct FilterMerger {
    filter: Document,
}

impl FilterMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, fragment: Fragment) {
        let Fragment { field, condition } = fragment;

        if let Condition::Operators(ops) = &condition
            && let Some(Bson::Document(existing)) = self.filter.get_mut(&field)
            && is_operator_document(existing)
        {
            for (symbol, value) in ops {
                existing.insert(symbol.clone(), value.clone());
            }
            return;
        }

        self.filter.insert(field, condition.into_bson());
    }

    pub fn into_document(self) -> Document {
        self.filter
    }
}

/// A sub-document whose first key starts with `$` holds operators; anything
/// else is an embedded value compared for equality.
fn is_operator_document(doc: &Document) -> bool {
    doc.keys().next().is_some_and(|k| k.starts_with('$'))
}
