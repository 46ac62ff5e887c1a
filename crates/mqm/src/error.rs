use std::fmt;

use mqm_query::Operator;

/// Error returned by a custom caster's transform.
pub type CasterError = Box<dyn std::error::Error + Send + Sync>;

/// Why a `skip=` or `limit=` value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundFault {
    /// Not an integer.
    Bad,
    Negative,
}

impl fmt::Display for BoundFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bad => f.write_str("Bad"),
            Self::Negative => f.write_str("Negative"),
        }
    }
}

/// Every way a compile can fail. A single bad argument aborts the whole
/// compile; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("{0} skip value")]
    Skip(BoundFault),

    #[error("{0} limit value")]
    Limit(BoundFault),

    /// A list value combined with an operator other than `=` or `!=`.
    #[error("List operator not found")]
    ListOperator { field: String, operator: Operator },

    /// The resolved operator occurs more than once in the argument.
    #[error("Fail to split filter {filter} with operator {operator}")]
    Filter { filter: String, operator: Operator },

    #[error("Bad $text value")]
    TextOperator,

    #[error("Fail to cast {value} with caster {caster}")]
    CustomCasterFail {
        value: String,
        caster: String,
        #[source]
        source: CasterError,
    },

    #[error("Fail to decode projection")]
    Projection { literal: String, reason: String },

    /// A population path whose top-level relation was never declared.
    #[error("Fail to find logical population item")]
    LogicalPopulation { path: String },

    /// A population path with a missing intermediate relation.
    #[error("Fail to find logical sub population item")]
    LogicalSubPopulation { path: String },
}

pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn bound_messages() {
        assert_eq!(CompileError::Skip(BoundFault::Bad).to_string(), "Bad skip value");
        assert_eq!(
            CompileError::Limit(BoundFault::Negative).to_string(),
            "Negative limit value"
        );
    }

    #[test]
    fn filter_message_names_argument_and_operator() {
        let err = CompileError::Filter {
            filter: "flag==toto".into(),
            operator: Operator::Eq,
        };
        assert_eq!(err.to_string(), "Fail to split filter flag==toto with operator =");
    }

    #[test]
    fn caster_failure_keeps_source() {
        let err = CompileError::CustomCasterFail {
            value: "float(A.B)".into(),
            caster: "float".into(),
            source: "invalid float literal".into(),
        };
        assert_eq!(err.to_string(), "Fail to cast float(A.B) with caster float");
        assert_eq!(err.source().unwrap().to_string(), "invalid float literal");
    }
}
