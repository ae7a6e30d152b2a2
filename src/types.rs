use std::fmt;

use serde::Serialize;

/// A validated domain name split into its fields.
///
/// Only the parser builds these; every instance has a non-empty domain
/// label and one or two TLDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DomainName {
    /// Original input, unmodified
    name: String,
    /// Host labels, left to right
    hosts: Vec<String>,
    /// Registrable domain label
    domain_label: String,
    /// Dotted TLD labels, left to right (".com", ".cn")
    top_level_domains: Vec<String>,
}

impl DomainName {
    pub(crate) fn new(
        name: impl Into<String>,
        hosts: Vec<String>,
        domain_label: impl Into<String>,
        top_level_domains: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hosts,
            domain_label: domain_label.into(),
            top_level_domains,
        }
    }

    /// The full input string
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host (subdomain) labels in their original order, possibly empty
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// The registrable domain label ("foobar" in "www.foobar.com")
    pub fn domain_label(&self) -> &str {
        &self.domain_label
    }

    /// Dotted TLD labels, most specific first
    pub fn top_level_domains(&self) -> &[String] {
        &self.top_level_domains
    }

    /// TLD labels joined back together, e.g. ".com.cn"
    pub fn suffix(&self) -> String {
        self.top_level_domains.concat()
    }

    /// Domain label plus suffix, e.g. "foobar.com.cn"
    pub fn registrable_domain(&self) -> String {
        format!("{}{}", self.domain_label, self.suffix())
    }

    pub fn has_compound_tld(&self) -> bool {
        self.top_level_domains.len() == 2
    }

    /// Number of dot-separated labels in the name
    pub fn label_count(&self) -> usize {
        self.hosts.len() + 1 + self.top_level_domains.len()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomainName {
        DomainName::new(
            "www.foobar.com.cn",
            vec!["www".to_string()],
            "foobar",
            vec![".com".to_string(), ".cn".to_string()],
        )
    }

    #[test]
    fn test_accessors() {
        let dn = sample();
        assert_eq!(dn.name(), "www.foobar.com.cn");
        assert_eq!(dn.hosts(), ["www"]);
        assert_eq!(dn.domain_label(), "foobar");
        assert_eq!(dn.top_level_domains(), [".com", ".cn"]);
    }

    #[test]
    fn test_derived_fields() {
        let dn = sample();
        assert_eq!(dn.suffix(), ".com.cn");
        assert_eq!(dn.registrable_domain(), "foobar.com.cn");
        assert!(dn.has_compound_tld());
        assert_eq!(dn.label_count(), 4);
    }

    #[test]
    fn test_display_is_original_name() {
        let dn = sample();
        assert_eq!(dn.to_string(), "www.foobar.com.cn");
        assert_eq!(dn.as_ref(), "www.foobar.com.cn");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["name"], "www.foobar.com.cn");
        assert_eq!(json["hosts"][0], "www");
        assert_eq!(json["domain_label"], "foobar");
        assert_eq!(json["top_level_domains"][1], ".cn");
    }
}
