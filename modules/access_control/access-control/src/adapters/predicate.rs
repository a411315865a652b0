//! Decision-to-predicate translation.

use sea_orm::Condition;
use sea_orm::sea_query::{Alias, Expr};
use staffgrid_security::AccessDecision;
use uuid::Uuid;

/// Translate a decision into a predicate on `alias.column`.
///
/// `Unrestricted` contributes nothing, `Blocked` contributes an
/// always-false predicate, `RestrictedTo` contributes an `IN` filter.
#[must_use]
pub fn decision_condition(
    decision: &AccessDecision,
    alias: &str,
    column: &str,
) -> Option<Condition> {
    match decision {
        AccessDecision::Unrestricted => None,
        AccessDecision::Blocked => Some(deny_all()),
        AccessDecision::RestrictedTo(ids) => Some(
            Condition::all().add(
                Expr::col((Alias::new(alias), Alias::new(column))).is_in(ids.iter().copied()),
            ),
        ),
    }
}

/// Predicate matching no rows.
#[must_use]
pub fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// Predicate restricting `alias.column` to exactly one id.
#[must_use]
pub fn single_id(alias: &str, column: &str, id: Uuid) -> Condition {
    Condition::all().add(Expr::col((Alias::new(alias), Alias::new(column))).eq(id))
}
