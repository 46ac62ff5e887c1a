use serde::{Serialize, Serializer};

/// Ascending sort order.
pub const ASCENDING: i32 = 1;
/// Descending sort order.
pub const DESCENDING: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Asc => ASCENDING,
            Self::Desc => DESCENDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Serializes as `[field, 1 | -1]`, the pair shape a driver's `sort` option
/// takes.
impl Serialize for Sort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.field, self.direction.as_i32()).serialize(serializer)
    }
}
