//! Conjunctive filter composition for list queries.

use crate::sql::SqlParam;

/// SQL text plus bound params, built clause by clause.
#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
    conditions: Vec<String>,
}

impl QueryBuf {
    pub fn new(select: impl Into<String>) -> Self {
        QueryBuf {
            sql: select.into(),
            params: Vec::new(),
            conditions: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> usize {
        self.params.push(v);
        self.params.len()
    }

    /// Add `<expr> <op> $n` with `value` bound at `n`.
    pub fn and_where(&mut self, expr: &str, op: &str, value: impl Into<SqlParam>) -> &mut Self {
        let n = self.push_param(value.into());
        self.conditions.push(format!("{} {} ${}", expr, op, n));
        self
    }

    /// Add a condition with no parameter.
    pub fn and_where_raw(&mut self, condition: &str) -> &mut Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// Add `<expr> ILIKE $n` matching `needle` anywhere, case-insensitively.
    pub fn and_contains(&mut self, expr: &str, needle: &str) -> &mut Self {
        self.and_where(expr, "ILIKE", format!("%{}%", escape_like(needle)))
    }

    /// Append the WHERE clause (when any condition was added) and ORDER BY.
    pub fn finish(mut self, order_by: &str) -> Self {
        if !self.conditions.is_empty() {
            self.sql.push_str(" WHERE ");
            self.sql.push_str(&self.conditions.join(" AND "));
        }
        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(order_by);
        self
    }
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_only_orders() {
        let q = QueryBuf::new("SELECT 1 FROM t").finish("name");
        assert_eq!(q.sql, "SELECT 1 FROM t ORDER BY name");
        assert!(q.params.is_empty());
    }

    #[test]
    fn filters_are_joined_with_and_in_param_order() {
        let mut q = QueryBuf::new("SELECT 1 FROM t");
        q.and_where("a", ">=", 5).and_where_raw("b > 0").and_contains("c", "x");
        let q = q.finish("c");
        assert_eq!(q.sql, "SELECT 1 FROM t WHERE a >= $1 AND b > 0 AND c ILIKE $2 ORDER BY c");
        assert_eq!(q.params, vec![SqlParam::from(5), SqlParam::from("%x%")]);
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }
}
