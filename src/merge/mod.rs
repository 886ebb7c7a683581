//! Category merge engine.
//!
//! Seven pure reducers, one per document category, each folding a newly
//! extracted fragment into the value accumulated so far for that category:
//!
//! ```text
//! merge(existing | absent, incoming) -> accumulated
//! ```
//!
//! Reducers never fail. Missing or malformed sub-fields resolve to
//! "existing retained" or stay absent. Scalar "latest wins" fields depend on
//! application order; list fields are unions by a dedup key and end up with
//! the same set of entries whatever the order.

pub mod convention;
pub mod financial;
pub mod minutes;
pub mod policy;
pub mod records;

use crate::models::CategoryValue;

/// Same-typed merge of an accumulated value with an incoming fragment.
pub trait Merge: Sized {
    /// `self` is the accumulated value, `incoming` the newer fragment.
    fn merge(self, incoming: Self) -> Self;
}

/// Dispatch on category. The session only ever pairs values of the same
/// category; a mismatched pair is resolved by taking the fragment.
pub fn merge(existing: Option<CategoryValue>, incoming: CategoryValue) -> CategoryValue {
    use CategoryValue::*;

    let Some(existing) = existing else {
        return incoming;
    };

    match (existing, incoming) {
        (Convention(a), Convention(b)) => Convention(a.merge(b)),
        (Financial(a), Financial(b)) => Financial(a.merge(b)),
        (Minutes(a), Minutes(b)) => Minutes(a.merge(b)),
        (Certificates(a), Certificates(b)) => Certificates(a.merge(b)),
        (Personnel(a), Personnel(b)) => Personnel(a.merge(b)),
        (Legal(a), Legal(b)) => Legal(a.merge(b)),
        (Miscellaneous(a), Miscellaneous(b)) => Miscellaneous(a.merge(b)),
        (existing, incoming) => {
            tracing::warn!(
                existing = %existing.category(),
                incoming = %incoming.category(),
                "Category mismatch in merge, keeping incoming fragment"
            );
            incoming
        }
    }
}

/// Fold a sequence of fragments from an absent accumulator.
pub fn fold<I>(fragments: I) -> Option<CategoryValue>
where
    I: IntoIterator<Item = CategoryValue>,
{
    fragments
        .into_iter()
        .fold(None, |acc, fragment| Some(merge(acc, fragment)))
}
