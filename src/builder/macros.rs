//! Macros for building state data.

/// Build a [`Fields`](crate::core::Fields) mapping from `key => value` pairs.
///
/// Values go through `serde_json::Value::from`, so strings, numbers,
/// booleans, vectors and `json!` values all work.
///
/// # Example
///
/// ```
/// use hookstate::fields;
///
/// let data = fields! {
///     "message" => "first",
///     "age" => 0,
///     "alive" => true,
/// };
///
/// assert_eq!(data.len(), 3);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::core::Fields::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut fields = $crate::core::Fields::new();
        $(
            fields.insert(
                ::std::string::String::from($key),
                $crate::core::Value::from($value),
            );
        )+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn fields_macro_builds_mapping() {
        let data = fields! {
            "message" => "first",
            "count" => 2,
            "nested" => json!({ "a": [1, 2] }),
        };

        assert_eq!(data.get("message"), Some(&json!("first")));
        assert_eq!(data.get("count"), Some(&json!(2)));
        assert_eq!(data.get("nested"), Some(&json!({ "a": [1, 2] })));
    }

    #[test]
    fn fields_macro_last_key_wins() {
        let data = fields! { "a" => 1, "a" => 2 };

        assert_eq!(data.len(), 1);
        assert_eq!(data.get("a"), Some(&json!(2)));
    }

    #[test]
    fn fields_macro_allows_empty() {
        let data = fields! {};
        assert!(data.is_empty());
    }
}
