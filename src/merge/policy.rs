//! Field-level precedence rules shared by the category reducers.
//!
//! Two notions of "has a value" are in play and must not be mixed up:
//! - present: non-empty text, non-zero number, `true`, non-empty list.
//! - non-null: anything that was supplied at all, zero and `false` included.

/// Text: incoming when non-empty, otherwise existing.
pub fn prefer_text(incoming: Option<String>, existing: Option<String>) -> Option<String> {
    match incoming {
        Some(s) if !s.is_empty() => Some(s),
        _ => existing,
    }
}

/// Number: incoming when non-zero, otherwise existing. Zero loses.
pub fn prefer_number(incoming: Option<f64>, existing: Option<f64>) -> Option<f64> {
    match incoming {
        Some(n) if is_truthy_number(n) => Some(n),
        _ => existing,
    }
}

/// Flag: incoming when `true`, otherwise existing.
pub fn prefer_flag(incoming: Option<bool>, existing: Option<bool>) -> Option<bool> {
    match incoming {
        Some(true) => Some(true),
        _ => existing,
    }
}

/// Any value: incoming when supplied, otherwise existing. Zero wins.
pub fn prefer_non_null<T>(incoming: Option<T>, existing: Option<T>) -> Option<T> {
    incoming.or(existing)
}

/// Wholesale replace: the incoming block wins only when `accept` holds for it.
pub fn replace_if<T>(incoming: Option<T>, existing: Option<T>, accept: impl FnOnce(&T) -> bool) -> Option<T> {
    match incoming {
        Some(block) if accept(&block) => Some(block),
        _ => existing,
    }
}

/// Wholesale keep: the existing block is retained when `keep` holds for it,
/// otherwise the incoming block takes its place.
pub fn keep_if<T>(existing: Option<T>, incoming: Option<T>, keep: impl FnOnce(&T) -> bool) -> Option<T> {
    match existing {
        Some(block) if keep(&block) => Some(block),
        _ => incoming,
    }
}

/// List: incoming when non-empty, otherwise existing.
pub fn prefer_list<T>(incoming: Option<Vec<T>>, existing: Option<Vec<T>>) -> Option<Vec<T>> {
    replace_if(incoming, existing, |v| !v.is_empty())
}

/// Field-by-field merge of a nested block. A missing side is treated as an
/// all-absent block, so the result is always materialized.
pub fn merge_block<T: Default>(
    existing: Option<T>,
    incoming: Option<T>,
    merge: impl FnOnce(T, T) -> T,
) -> Option<T> {
    Some(merge(existing.unwrap_or_default(), incoming.unwrap_or_default()))
}

/// Set union of two lists by a dedup key.
///
/// Existing entries are kept in order; each incoming entry is appended only
/// when no entry already in the result has the same key. The check runs
/// against the growing result, so repeats inside `incoming` collapse too.
pub fn union_by_key<T, K, F>(existing: Option<Vec<T>>, incoming: Option<Vec<T>>, key: F) -> Vec<T>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut merged = existing.unwrap_or_default();
    let mut seen: Vec<K> = merged.iter().map(&key).collect();
    for item in incoming.unwrap_or_default() {
        let k = key(&item);
        if !seen.contains(&k) {
            seen.push(k);
            merged.push(item);
        }
    }
    merged
}

/// Union against the existing entries only.
///
/// Keys are snapshotted from `existing` before anything is appended, so
/// repeats inside `incoming` are all kept; only entries already present in
/// `existing` suppress an incoming one.
pub fn union_against_existing<T, K, F>(existing: Option<Vec<T>>, incoming: Option<Vec<T>>, key: F) -> Vec<T>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut merged = existing.unwrap_or_default();
    let seen: Vec<K> = merged.iter().map(&key).collect();
    merged.extend(incoming.unwrap_or_default().into_iter().filter(|item| !seen.contains(&key(item))));
    merged
}

/// Case-insensitive dedup key. Missing keys share the empty key.
pub fn folded(key: Option<&str>) -> String {
    key.unwrap_or_default().to_lowercase()
}

/// Exact-match dedup key.
pub fn exact(key: Option<&str>) -> String {
    key.unwrap_or_default().to_string()
}

pub fn is_truthy_number(n: f64) -> bool {
    n != 0.0 && !n.is_nan()
}
