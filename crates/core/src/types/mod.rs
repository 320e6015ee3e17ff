//! Shared type definitions and newtypes

use std::fmt;

/// Cookie fields the portal needs to authenticate a request.
/// A `<name>_v2` field satisfies the same requirement.
pub const REQUIRED_COOKIE_FIELDS: [&str; 4] = ["account_id", "cookie_token", "ltoken", "ltuid"];

/// Opaque `Cookie` header value carrying the account's auth fields
#[derive(Clone, PartialEq, Eq)]
pub struct Cookie(String);

impl Cookie {
    pub fn new(raw: impl Into<String>) -> Self {
        Cookie(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a single `name=value` pair, if present
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| key.trim() == name)
            .map(|(_, value)| value.trim())
    }

    /// Account id embedded in the cookie (`account_id` or `account_id_v2`)
    pub fn account_id(&self) -> Option<&str> {
        self.field("account_id")
            .or_else(|| self.field("account_id_v2"))
            .filter(|id| !id.is_empty())
    }

    /// Required auth fields absent from this cookie
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_COOKIE_FIELDS
            .iter()
            .copied()
            .filter(|name| {
                self.field(name).is_none() && self.field(&format!("{}_v2", name)).is_none()
            })
            .collect()
    }
}

// Never print the token itself
impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cookie(<{} bytes>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "account_id=1001; cookie_token=abc; ltoken=def; ltuid=1001; mi18nLang=en-us";

    #[test]
    fn test_field_lookup() {
        let cookie = Cookie::new(FULL);
        assert_eq!(cookie.field("cookie_token"), Some("abc"));
        assert_eq!(cookie.field("mi18nLang"), Some("en-us"));
        assert_eq!(cookie.field("missing"), None);
    }

    #[test]
    fn test_account_id_prefers_plain_field() {
        let cookie = Cookie::new("account_id_v2=2002; account_id=1001");
        assert_eq!(cookie.account_id(), Some("1001"));

        let v2_only = Cookie::new("ltoken_v2=x; account_id_v2=2002");
        assert_eq!(v2_only.account_id(), Some("2002"));

        assert_eq!(Cookie::new("ltoken=x").account_id(), None);
    }

    #[test]
    fn test_missing_fields() {
        assert!(Cookie::new(FULL).missing_fields().is_empty());

        let v2 = Cookie::new("account_id_v2=1; cookie_token_v2=a; ltoken_v2=b; ltuid_v2=1");
        assert!(v2.missing_fields().is_empty());

        let partial = Cookie::new("account_id=1; ltuid=1");
        assert_eq!(partial.missing_fields(), vec!["cookie_token", "ltoken"]);
    }

    #[test]
    fn test_debug_hides_token() {
        let rendered = format!("{:?}", Cookie::new(FULL));
        assert!(!rendered.contains("abc"));
    }
}
