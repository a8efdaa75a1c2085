//! City and zone scope values.
//!
//! A [`Scope`] is either unrestricted (`all`) or an explicit set of allowed ids.
//! Scopes are built from loosely-typed input with [`normalize`] and layered on top of
//! each other with [`combine`], where the left operand is the identity-derived *base*
//! scope and the right operand is the permission-derived *overlay* scope.
//!
//! # Combination rules
//!
//! | base            | overlay         | result                   |
//! |-----------------|-----------------|--------------------------|
//! | all             | anything        | all                      |
//! | ids             | all             | base ids                 |
//! | empty           | empty           | empty                    |
//! | non-empty ids   | empty           | base ids                 |
//! | empty           | non-empty ids   | empty                    |
//! | non-empty ids   | non-empty ids   | intersection             |
//!
//! The first row is not a true intersection: an unrestricted base wins even over a
//! restrictive overlay. Callers rely on this, so `combine` is not symmetric.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::serde::coerce_id;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Scope {
    /// Unrestricted access. `ids` is always empty when set.
    pub all: bool,
    #[schema(value_type = Vec<i64>)]
    pub ids: BTreeSet<i64>,
}

impl Scope {
    /// Scope with no restriction.
    pub fn unrestricted() -> Self {
        Self {
            all: true,
            ids: BTreeSet::new(),
        }
    }

    /// Scope granting nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            all: false,
            ids: ids.into_iter().collect(),
        }
    }

    /// True when the scope grants no id at all.
    pub fn is_empty(&self) -> bool {
        !self.all && self.ids.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.all || self.ids.contains(&id)
    }

    /// Layers `overlay` on top of `self`. See the module docs for the rules.
    pub fn combine(&self, overlay: &Scope) -> Scope {
        if self.all {
            return Scope::unrestricted();
        }

        if overlay.all {
            return Scope::from_ids(self.ids.iter().copied());
        }

        match (self.ids.is_empty(), overlay.ids.is_empty()) {
            (true, _) => Scope::empty(),
            (false, true) => Scope::from_ids(self.ids.iter().copied()),
            (false, false) => Scope::from_ids(self.ids.intersection(&overlay.ids).copied()),
        }
    }

    /// Converts the scope into a query filter.
    ///
    /// `None` means "no filter", `Some(vec![])` means "match nothing".
    pub fn to_filter(&self) -> Option<Vec<i64>> {
        if self.all {
            None
        } else {
            Some(self.ids.iter().copied().collect())
        }
    }
}

/// Builds a [`Scope`] from a raw JSON-like value.
///
/// - absent or `null` yields an empty scope
/// - `{"all": true}` yields an unrestricted scope
/// - otherwise `ids` is read as an array and every non-numeric entry is dropped
pub fn normalize(raw: Option<&Value>) -> Scope {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return Scope::empty();
    };

    if raw.get("all").and_then(Value::as_bool) == Some(true) {
        return Scope::unrestricted();
    }

    match raw.get("ids") {
        Some(Value::Array(items)) => Scope::from_ids(items.iter().filter_map(coerce_id)),
        _ => Scope::empty(),
    }
}

/// Free-function form of [`Scope::combine`].
pub fn combine(base: &Scope, overlay: &Scope) -> Scope {
    base.combine(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_absent() {
        assert_eq!(normalize(None), Scope::empty());
        assert_eq!(normalize(Some(&Value::Null)), Scope::empty());
    }

    #[test]
    fn test_normalize_all_ignores_ids() {
        let raw = json!({"all": true, "ids": [1, 2]});
        let scope = normalize(Some(&raw));
        assert!(scope.all);
        assert!(scope.ids.is_empty());
    }

    #[test]
    fn test_normalize_all_must_be_true() {
        let raw = json!({"all": "yes", "ids": [4]});
        assert_eq!(normalize(Some(&raw)), Scope::from_ids([4]));
    }

    #[test]
    fn test_normalize_drops_non_numeric_ids() {
        let raw = json!({"ids": [1, "2", "abc", null, 2, {"x": 1}, 3.5]});
        assert_eq!(normalize(Some(&raw)), Scope::from_ids([1, 2]));
    }

    #[test]
    fn test_normalize_missing_ids() {
        let raw = json!({"all": false});
        assert_eq!(normalize(Some(&raw)), Scope::empty());
    }

    #[test]
    fn test_combine_unrestricted_base_wins() {
        let base = Scope::unrestricted();
        for overlay in [
            Scope::unrestricted(),
            Scope::empty(),
            Scope::from_ids([1]),
            Scope::from_ids([9, 10]),
        ] {
            assert_eq!(base.combine(&overlay), Scope::unrestricted());
        }
    }

    #[test]
    fn test_combine_unrestricted_overlay_keeps_base() {
        let base = Scope::from_ids([3, 4]);
        assert_eq!(base.combine(&Scope::unrestricted()), Scope::from_ids([3, 4]));
        assert_eq!(
            Scope::empty().combine(&Scope::unrestricted()),
            Scope::empty()
        );
    }

    #[test]
    fn test_combine_both_empty() {
        assert_eq!(Scope::empty().combine(&Scope::empty()), Scope::empty());
    }

    #[test]
    fn test_combine_empty_overlay_keeps_base() {
        let base = Scope::from_ids([1, 2]);
        assert_eq!(base.combine(&Scope::empty()), base);
    }

    #[test]
    fn test_combine_empty_base_starves() {
        assert_eq!(
            Scope::empty().combine(&Scope::from_ids([1, 2, 3])),
            Scope::empty()
        );
    }

    #[test]
    fn test_combine_intersection() {
        let base = Scope::from_ids([1, 2, 3, 4]);
        let overlay = Scope::from_ids([3, 4, 5]);
        assert_eq!(base.combine(&overlay), Scope::from_ids([3, 4]));
    }

    #[test]
    fn test_combine_disjoint_sets() {
        let base = Scope::from_ids([1, 2]);
        let overlay = Scope::from_ids([7]);
        assert!(base.combine(&overlay).is_empty());
    }

    #[test]
    fn test_combine_is_not_symmetric() {
        let restricted = Scope::from_ids([1]);
        let all = Scope::unrestricted();
        assert_eq!(combine(&all, &restricted), Scope::unrestricted());
        assert_eq!(combine(&restricted, &all), Scope::from_ids([1]));
    }

    #[test]
    fn test_to_filter() {
        assert_eq!(Scope::unrestricted().to_filter(), None);
        assert_eq!(Scope::empty().to_filter(), Some(vec![]));
        assert_eq!(Scope::from_ids([5, 2]).to_filter(), Some(vec![2, 5]));
    }

    #[test]
    fn test_contains() {
        assert!(Scope::unrestricted().contains(42));
        assert!(Scope::from_ids([42]).contains(42));
        assert!(!Scope::empty().contains(42));
    }
}
