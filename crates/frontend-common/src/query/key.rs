//! Cache keys

use std::fmt;

/// Ordered segments naming one cached server response, e.g. `room/<id>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Prefix match used by invalidation: `admin` covers `admin/users`
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching() {
        let users = QueryKey::new(["admin", "users"]);
        assert!(users.starts_with(&QueryKey::new(["admin"])));
        assert!(users.starts_with(&users));
        assert!(!users.starts_with(&QueryKey::new(["admin", "pending-templates"])));
        assert!(!QueryKey::new(["admin"]).starts_with(&users));
    }

    #[test]
    fn display_joins_segments() {
        assert_eq!(QueryKey::new(["room", "r1"]).to_string(), "room/r1");
    }
}
