//! Convenience builder for HTTP query parameters.

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Chainable form of [`QueryParams::push`].
    #[must_use]
    pub fn with<T>(mut self, key: &'static str, value: T) -> Self
    where
        T: Display,
    {
        self.push(key, value);
        self
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_formats_bool() {
        let params = QueryParams::new().with("decrypt", false);
        assert_eq!(params.into_pairs(), vec![("decrypt", "false".to_string())]);
    }

    #[test]
    fn pairs_keep_insertion_order() {
        let mut params = QueryParams::new().with("domain", "www.example.com");
        params.push("decrypt", true);
        assert_eq!(
            params.into_pairs(),
            vec![
                ("domain", "www.example.com".to_string()),
                ("decrypt", "true".to_string()),
            ]
        );
    }
}
