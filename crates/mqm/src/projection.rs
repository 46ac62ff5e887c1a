use bson::{Bson, Document};

use crate::error::{CompileError, CompileResult};
use crate::population::PopulationTree;

/// Build the projection from a `fields=` value.
///
/// `field` includes (1), `-field` excludes (0), and a `{...}` token is a
/// JSON object whose first entry is copied in as an advanced projection.
/// With a non-empty population tree, a dotted field whose first segment
/// names a relation goes to that relation's own projection instead.
///
/// Returns `None` when nothing ends up in the top-level projection.
pub fn parse_projection(
    value: &str,
    mut population: Option<&mut PopulationTree>,
) -> CompileResult<Option<Document>> {
    if value.is_empty() {
        return Ok(None);
    }

    let mut projection = Document::new();
    for param in value.split(',') {
        let (field, sign) = match param.strip_prefix('-') {
            Some(field) => (field, 0),
            None => (param, 1),
        };

        if let Some(tree) = population.as_deref_mut()
            && !tree.is_empty()
            && param.find('.').is_some_and(|i| i > 0)
            && tree.route_field(field, sign)
        {
            continue;
        }

        if sign == 0 {
            projection.insert(field, Bson::Int32(0));
        } else if param.starts_with('{') && param.ends_with('}') {
            let (key, value) = parse_literal(param)?;
            projection.insert(key, value);
        } else {
            projection.insert(param, Bson::Int32(1));
        }
    }

    Ok((!projection.is_empty()).then_some(projection))
}

fn parse_literal(literal: &str) -> CompileResult<(String, Bson)> {
    let fail = |reason: String| CompileError::Projection {
        literal: literal.to_owned(),
        reason,
    };

    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(literal).map_err(|e| fail(e.to_string()))?;
    let (key, value) = object
        .into_iter()
        .next()
        .ok_or_else(|| fail("empty object".to_owned()))?;
    let value = bson::to_bson(&value).map_err(|e| fail(e.to_string()))?;
    Ok((key, value))
}
