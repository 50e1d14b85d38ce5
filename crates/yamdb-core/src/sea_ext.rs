use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

/// Case folding applied to stored search columns and to the needles matched
/// against them. Unicode-aware, so `Ёлка` and `ЁЛКА` fold alike.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Substring match on a column holding [`fold_case`]d text:
/// `col LIKE '%folded needle%'`.
///
/// Both sides are folded by the application, so the result does not depend
/// on the backend's `LOWER()` (SQLite's only folds ASCII).
pub fn contains_folded<C>(col: C, needle: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::col(col).like(like_pattern(&fold_case(needle)))
}

/// Case-insensitive substring match on an ASCII-only column such as a
/// username or slug: `LOWER(col) LIKE '%needle%'`.
///
/// The needle gets the same ASCII-only folding SQLite applies to the column.
pub fn icontains<C>(col: C, needle: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::expr(Func::lower(Expr::col(col))).like(like_pattern(&needle.to_ascii_lowercase()))
}

/// `%needle%` with `%`, `_` and `\` escaped so they match literally.
fn like_pattern(needle: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(needle))).escape('\\')
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
