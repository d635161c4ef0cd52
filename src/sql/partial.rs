//! Partial-update `SET` clause builder shared by every resource.

use crate::error::AppError;
use crate::sql::SqlParam;

/// Output of [`sql_for_partial_update`]: `"col"=$1, "other"=$2` plus the
/// values in placeholder order.
#[derive(Debug, PartialEq)]
pub struct PartialUpdate<V = SqlParam> {
    pub set_cols: String,
    pub values: Vec<V>,
}

impl<V> PartialUpdate<V> {
    /// Placeholder index following the last `SET` value, for the key in `WHERE`.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Quote identifier for PostgreSQL. Identifiers only ever come from code.
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Turn an ordered field/value list into a `SET` clause.
///
/// `js_to_sql` maps application field names to column names; a field with no
/// entry is used verbatim. Placeholder N belongs to the Nth field. An empty
/// list is rejected.
pub fn sql_for_partial_update<K, V, I>(data: I, js_to_sql: &[(&str, &str)]) -> Result<PartialUpdate<V>, AppError>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut cols = Vec::new();
    let mut values = Vec::new();
    for (idx, (field, value)) in data.into_iter().enumerate() {
        let field = field.as_ref();
        let column = js_to_sql
            .iter()
            .find(|(js, _)| *js == field)
            .map(|(_, col)| *col)
            .unwrap_or(field);
        cols.push(format!("{}=${}", quoted(column), idx + 1));
        values.push(value);
    }
    if cols.is_empty() {
        return Err(AppError::bad_request("No data"));
    }
    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field() {
        let res = sql_for_partial_update([("field1", "val1")], &[("field1", "field1"), ("field2", "field2")]).unwrap();
        assert_eq!(res.set_cols, "\"field1\"=$1");
        assert_eq!(res.values, vec!["val1"]);
    }

    #[test]
    fn maps_names_and_keeps_order() {
        let res = sql_for_partial_update(
            [("firstName", "Aliya"), ("age", "32")],
            &[("firstName", "first_name")],
        )
        .unwrap();
        assert_eq!(res.set_cols, "\"first_name\"=$1, \"age\"=$2");
        assert_eq!(res.values, vec!["Aliya", "32"]);
        assert_eq!(res.next_placeholder(), 3);
    }

    #[test]
    fn placeholder_n_matches_nth_key() {
        let fields: Vec<(String, i32)> = (0..12).map(|i| (format!("f{}", i), i * 10)).collect();
        let res = sql_for_partial_update(fields.clone(), &[("f3", "col_three")]).unwrap();
        let frags: Vec<&str> = res.set_cols.split(", ").collect();
        assert_eq!(frags.len(), fields.len());
        for (i, frag) in frags.iter().enumerate() {
            let col = if i == 3 { "col_three".to_string() } else { format!("f{}", i) };
            assert_eq!(*frag, format!("\"{}\"=${}", col, i + 1));
        }
        let expected: Vec<i32> = fields.iter().map(|(_, v)| *v).collect();
        assert_eq!(res.values, expected);
    }

    #[test]
    fn rejects_empty_update() {
        let err = sql_for_partial_update(Vec::<(&str, SqlParam)>::new(), &[]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == &vec!["No data".to_string()]));
    }
}
