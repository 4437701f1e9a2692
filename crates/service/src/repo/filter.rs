//! Builds the `WHERE` condition of a list query from optional filter fields.
//!
//! Every value reaches SQL as a bound parameter. A pivot lookup that
//! resolved to no ids becomes `id IS NULL` on the non-null primary key,
//! which selects nothing without ever emitting an empty `IN ()`.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait};

/// Escape character for LIKE patterns. Must be quoted identically by every
/// backend's string literal syntax, which rules out backslash.
pub const LIKE_ESCAPE: char = '!';

pub struct PredicateBuilder<E: EntityTrait> {
    id: E::Column,
    cond: Condition,
}

impl<E: EntityTrait> PredicateBuilder<E> {
    pub fn new(id: E::Column) -> Self { Self { id, cond: Condition::all() } }

    /// Direct id filter; an empty slice constrains nothing.
    pub fn ids(mut self, ids: &[i64]) -> Self {
        if !ids.is_empty() {
            let expr = self.id.is_in(ids.iter().copied());
            self.cond = self.cond.add(expr);
        }
        self
    }

    pub fn eq(mut self, col: E::Column, value: Option<i64>) -> Self {
        if let Some(v) = value.filter(|v| *v != 0) {
            self.cond = self.cond.add(col.eq(v));
        }
        self
    }

    /// Case-insensitive substring match against any of `cols`.
    pub fn contains(mut self, cols: &[E::Column], needle: Option<&str>) -> Self {
        let Some(needle) = needle.map(str::trim).filter(|s| !s.is_empty()) else {
            return self;
        };
        let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
        let mut any = Condition::any();
        for col in cols {
            any = any.add(
                Expr::expr(Func::lower(Expr::col((E::default(), *col)))).like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
            );
        }
        self.cond = self.cond.add(any);
        self
    }

    /// Ids resolved through a pivot table. `None` means no pivot filter was
    /// requested. The set narrows any direct `ids` filter, never replaces it.
    pub fn pivot(mut self, resolved: Option<&[i64]>) -> Self {
        match resolved {
            None => {}
            Some([]) => {
                let expr = self.id.is_null();
                self.cond = self.cond.add(expr);
            }
            Some(ids) => {
                let expr = self.id.is_in(ids.iter().copied());
                self.cond = self.cond.add(expr);
            }
        }
        self
    }

    /// Hide soft-deleted rows.
    pub fn live(mut self, deleted_at: E::Column) -> Self {
        self.cond = self.cond.add(deleted_at.is_null());
        self
    }

    pub fn build(self) -> Condition { self.cond }
}

/// Escape LIKE wildcards so user text only ever matches literally.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}
