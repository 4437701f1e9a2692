//! Equality over business fields only.
//!
//! Generated `PartialEq` on each model compares every column, including the
//! server-assigned id and timestamps. `BusinessEq` compares what a caller
//! supplies, which is what a create-then-read round trip must preserve.

pub trait BusinessEq {
    fn business_eq(&self, other: &Self) -> bool;
}

/// Both absent are equal, exactly one absent is unequal, both present compare
/// field by field.
pub fn optional_business_eq<T: BusinessEq>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.business_eq(b),
        _ => false,
    }
}
