use mqm_query::{SEARCH, Sort, TEXT};

use crate::error::{BoundFault, CompileError, CompileResult};
use crate::filter::{Condition, Fragment};

/// Argument names with their own builder instead of the filter path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Sort,
    Limit,
    Skip,
    Fields,
    Text,
    Populate,
}

impl Reserved {
    pub const ALL: [Reserved; 6] = [
        Reserved::Sort,
        Reserved::Limit,
        Reserved::Skip,
        Reserved::Fields,
        Reserved::Text,
        Reserved::Populate,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sort => "sort=",
            Self::Limit => "limit=",
            Self::Skip => "skip=",
            Self::Fields => "fields=",
            Self::Text => "$text=",
            Self::Populate => "populate=",
        }
    }

    /// Match `arg` against the reserved prefixes, returning the name and
    /// everything after its `=`.
    pub fn split(arg: &str) -> Option<(Self, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|r| arg.strip_prefix(r.prefix()).map(|value| (r, value)))
    }
}

/// `sort=-created_at,+price,name`. An empty value means no sort.
pub fn parse_sort(value: &str) -> Option<Vec<Sort>> {
    if value.is_empty() {
        return None;
    }

    Some(
        value
            .split(',')
            .map(|param| {
                if let Some(field) = param.strip_prefix('+') {
                    Sort::asc(field)
                } else if let Some(field) = param.strip_prefix('-') {
                    Sort::desc(field)
                } else {
                    Sort::asc(param)
                }
            })
            .collect(),
    )
}

pub fn parse_limit(value: &str) -> CompileResult<u64> {
    parse_bound(value).map_err(CompileError::Limit)
}

pub fn parse_skip(value: &str) -> CompileResult<u64> {
    parse_bound(value).map_err(CompileError::Skip)
}

/// Empty means 0. Surrounding whitespace is ignored, but a value that is
/// only whitespace is bad.
fn parse_bound(value: &str) -> Result<u64, BoundFault> {
    if value.is_empty() {
        return Ok(0);
    }
    let n: i64 = value.trim().parse().map_err(|_| BoundFault::Bad)?;
    u64::try_from(n).map_err(|_| BoundFault::Negative)
}

/// `$text=phrase` becomes `{ $text: { $search: phrase } }`, merged into the
/// filter like any other fragment.
pub fn text_fragment(value: &str) -> CompileResult<Fragment> {
    if value.is_empty() {
        return Err(CompileError::TextOperator);
    }
    let mut search = bson::Document::new();
    search.insert(SEARCH, value);
    Ok(Fragment::new(TEXT, Condition::Operators(search)))
}

#[cfg(test)]
mod tests {
    use bson::{Bson, doc};
    use mqm_query::SortDirection;

    use super::*;

    #[test]
    fn reserved_split() {
        assert_eq!(Reserved::split("sort=-_id"), Some((Reserved::Sort, "-_id")));
        assert_eq!(Reserved::split("limit="), Some((Reserved::Limit, "")));
        assert_eq!(
            Reserved::split("$text=java shop"),
            Some((Reserved::Text, "java shop"))
        );
        assert_eq!(Reserved::split("fields=a=b"), Some((Reserved::Fields, "a=b")));
        assert_eq!(Reserved::split("sorted=1"), None);
        assert_eq!(Reserved::split("sort>1"), None);
    }

    #[test]
    fn sort_directions() {
        let sort = parse_sort("_id,-created_at,+price").unwrap();
        assert_eq!(
            sort,
            vec![Sort::asc("_id"), Sort::desc("created_at"), Sort::asc("price")]
        );
        assert_eq!(sort[1].direction, SortDirection::Desc);
        assert_eq!(sort[1].direction.as_i32(), -1);
    }

    #[test]
    fn empty_sort_is_absent() {
        assert_eq!(parse_sort(""), None);
    }

    #[test]
    fn bounds() {
        assert_eq!(parse_limit("5").unwrap(), 5);
        assert_eq!(parse_skip("").unwrap(), 0);
        assert_eq!(parse_skip("0").unwrap(), 0);
    }

    #[test]
    fn bounds_ignore_surrounding_whitespace() {
        assert_eq!(parse_limit(" 5").unwrap(), 5);
        assert_eq!(parse_skip("10 ").unwrap(), 10);
        assert_eq!(parse_limit(" -5 ").unwrap_err().to_string(), "Negative limit value");
        assert_eq!(parse_skip(" ").unwrap_err().to_string(), "Bad skip value");
    }

    #[test]
    fn bound_errors() {
        assert_eq!(parse_skip("-5").unwrap_err().to_string(), "Negative skip value");
        assert_eq!(parse_skip("toto").unwrap_err().to_string(), "Bad skip value");
        assert_eq!(parse_limit("-1").unwrap_err().to_string(), "Negative limit value");
        assert_eq!(parse_limit("1.5").unwrap_err().to_string(), "Bad limit value");
    }

    #[test]
    fn text_search_phrase_is_verbatim() {
        let frag = text_fragment("\"toto\"").unwrap();
        assert_eq!(frag.field, "$text");
        assert_eq!(
            frag.condition.into_bson(),
            Bson::Document(doc! { "$search": "\"toto\"" })
        );
    }

    #[test]
    fn empty_text_fails() {
        let err = text_fragment("").unwrap_err();
        assert!(matches!(err, CompileError::TextOperator));
        assert_eq!(err.to_string(), "Bad $text value");
    }
}
