//! GraphQL query documents and response shapes
//!
//! Every builder here is a pure function returning query text. Identifying
//! parameters travel as GraphQL variables; only the aliased branch comparison
//! query inlines values, through [`graphql_string_literal`].

pub mod graphql_types;
pub mod organization;
pub mod repository;
pub mod user;

/// Renders `value` as a GraphQL string literal.
///
/// JSON string escaping is a subset of what GraphQL accepts inside `"..."`, so
/// quotes, backslashes and control characters in branch names stay inert.
pub fn graphql_string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_string_literal_escapes() {
        assert_eq!(graphql_string_literal("main"), r#""main""#);
        assert_eq!(
            graphql_string_literal(r#"we"ird\branch"#),
            r#""we\"ird\\branch""#
        );
        assert_eq!(graphql_string_literal("a\nb"), r#""a\nb""#);
    }
}
