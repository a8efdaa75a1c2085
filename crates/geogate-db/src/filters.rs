//! SQL predicate builders for scoped listings.

use geogate_models::ZoneAccess;

/// A `WHERE`/`AND` fragment plus the array parameter it references, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFilterClause {
    pub clause: String,
    /// Bind as the next positional parameter when present.
    pub ids: Option<Vec<i64>>,
}

/// Builds the zone predicate for `alias`.
///
/// `param_count` is the number of positional parameters already bound; when it is
/// non-zero the fragment starts with `AND`, otherwise with `WHERE`.
///
/// - no scope or an unrestricted scope: empty clause
/// - empty scope: `WHERE 1=0`
/// - otherwise `alias.zone_id = ANY($n)`
pub fn build_zone_filter_clause(
    scope: Option<&ZoneAccess>,
    alias: &str,
    param_count: usize,
) -> ZoneFilterClause {
    let Some(scope) = scope.filter(|s| !s.all) else {
        return ZoneFilterClause {
            clause: String::new(),
            ids: None,
        };
    };

    if scope.ids.is_empty() {
        return ZoneFilterClause {
            clause: "WHERE 1=0".to_string(),
            ids: None,
        };
    }

    let prefix = if param_count > 0 { "AND" } else { "WHERE" };
    ZoneFilterClause {
        clause: format!(
            "{} {}.zone_id = ANY(${}::bigint[])",
            prefix,
            alias,
            param_count + 1
        ),
        ids: Some(scope.ids.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_scope_has_no_clause() {
        let clause = build_zone_filter_clause(Some(&ZoneAccess::unrestricted()), "z", 0);
        assert!(clause.clause.is_empty());
        assert!(clause.ids.is_none());

        let clause = build_zone_filter_clause(None, "z", 0);
        assert!(clause.clause.is_empty());
    }

    #[test]
    fn test_empty_scope_matches_nothing() {
        let clause = build_zone_filter_clause(Some(&ZoneAccess::restricted(vec![])), "z", 2);
        assert_eq!(clause.clause, "WHERE 1=0");
        assert!(clause.ids.is_none());
    }

    #[test]
    fn test_restricted_scope_binds_next_parameter() {
        let scope = ZoneAccess::restricted(vec![4, 9]);

        let clause = build_zone_filter_clause(Some(&scope), "z", 0);
        assert_eq!(clause.clause, "WHERE z.zone_id = ANY($1::bigint[])");
        assert_eq!(clause.ids, Some(vec![4, 9]));

        let clause = build_zone_filter_clause(Some(&scope), "r", 2);
        assert_eq!(clause.clause, "AND r.zone_id = ANY($3::bigint[])");
    }
}
