use mqm_query::Operator;

/// Find which comparison operator an argument uses.
///
/// Operators are tried in [`Operator::PRECEDENCE`] order and the first one
/// found anywhere in the argument wins. `None` means the argument is a bare
/// field name. Operator characters cannot be escaped.
pub fn resolve_operator(arg: &str) -> Option<Operator> {
    Operator::PRECEDENCE
        .into_iter()
        .find(|op| arg.contains(op.token()))
}
