/// Membership operator used for `field=a,b`.
pub const IN: &str = "$in";
/// Negated membership operator used for `field!=a,b`.
pub const NOT_IN: &str = "$nin";
/// Field presence operator.
pub const EXISTS: &str = "$exists";
/// Full-text search operator key.
pub const TEXT: &str = "$text";
/// Phrase key inside a `$text` document.
pub const SEARCH: &str = "$search";

/// A comparison operator as it appears in a query-string argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Lte,
    Gte,
    Ne,
    Eq,
    Gt,
    Lt,
    Not,
}

impl Operator {
    /// Resolution order. Two-character operators come first because they
    /// contain `=`, `<`, `>` and `!` as substrings.
    pub const PRECEDENCE: [Operator; 7] = [
        Operator::Lte,
        Operator::Gte,
        Operator::Ne,
        Operator::Eq,
        Operator::Gt,
        Operator::Lt,
        Operator::Not,
    ];

    /// The literal text of the operator inside an argument.
    pub fn token(self) -> &'static str {
        match self {
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Ne => "!=",
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Not => "!",
        }
    }

    /// The database operator keyword this maps to.
    ///
    /// `Eq` maps to `$eq` but the compiler writes direct equality without a
    /// wrapper document. `Not` is the negative form of `$exists`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Lte => "$lte",
            Self::Gte => "$gte",
            Self::Ne => "$ne",
            Self::Eq => "$eq",
            Self::Gt => "$gt",
            Self::Lt => "$lt",
            Self::Not => EXISTS,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
