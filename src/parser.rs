use std::str::FromStr;
use std::sync::Arc;

use crate::error::{DomainError, Result};
use crate::registry::{default_registry, TldLoader, TldRegistry};
use crate::types::DomainName;
use crate::validate::{check_domain_label, check_host, validate_tld, DOMAIN_NAME_MAX_SIZE};

/// Validate `input` against `registry` and split it into hosts, domain
/// label and TLDs.
///
/// The last label must be a registered TLD. When the label before it is a
/// registered TLD too, both form a compound TLD (".com.cn") and the domain
/// label moves one position left. Everything before the domain label is a
/// host. The first failing check aborts the parse.
pub fn detect_with(registry: &TldRegistry, input: &str) -> Result<DomainName> {
    let result = classify(registry, input);
    if let Err(ref e) = result {
        tracing::trace!(input, error = %e, "domain name rejected");
    }
    result
}

/// Validate `input` against the bundled TLD list.
pub fn detect(input: &str) -> Result<DomainName> {
    detect_with(default_registry(), input)
}

/// Pass/fail form of [`detect`].
pub fn is_valid(input: &str) -> bool {
    detect(input).is_ok()
}

fn check_structure(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(DomainError::Empty);
    }
    if input.len() > DOMAIN_NAME_MAX_SIZE {
        return Err(DomainError::TooLong { len: input.len() });
    }
    if input.starts_with('.') {
        return Err(DomainError::LeadingDot);
    }
    Ok(())
}

fn require_tld(registry: &TldRegistry, labels: &[&str], position: usize) -> Result<()> {
    if !validate_tld(labels[position], registry) {
        return Err(DomainError::UnknownTld {
            label: labels[position].to_string(),
            position,
        });
    }
    Ok(())
}

fn require_domain_label(labels: &[&str], position: usize) -> Result<()> {
    check_domain_label(labels[position]).map_err(|kind| DomainError::InvalidDomainLabel {
        label: labels[position].to_string(),
        position,
        kind,
    })
}

fn classify(registry: &TldRegistry, input: &str) -> Result<DomainName> {
    check_structure(input)?;

    let labels: Vec<&str> = input.split('.').collect();
    let count = labels.len();

    if count < 2 {
        return Err(DomainError::TooFewLabels { count });
    }

    // Two labels: domain + TLD, with no other reading
    if count == 2 {
        require_domain_label(&labels, 0)?;
        require_tld(registry, &labels, 1)?;
        return Ok(DomainName::new(
            input,
            Vec::new(),
            labels[0],
            vec![format!(".{}", labels[1])],
        ));
    }

    let last = count - 1;
    require_tld(registry, &labels, last)?;

    let (top_level_domains, domain_index) = if validate_tld(labels[last - 1], registry) {
        (
            vec![format!(".{}", labels[last - 1]), format!(".{}", labels[last])],
            count - 3,
        )
    } else {
        (vec![format!(".{}", labels[last])], count - 2)
    };

    require_domain_label(&labels, domain_index)?;

    let mut hosts = Vec::with_capacity(domain_index);
    for (position, label) in labels[..domain_index].iter().enumerate() {
        check_host(label).map_err(|kind| DomainError::InvalidHost {
            label: label.to_string(),
            position,
            kind,
        })?;
        hosts.push(label.to_string());
    }

    Ok(DomainName::new(input, hosts, labels[domain_index], top_level_domains))
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        detect(s)
    }
}

/// Detector bound to one shared, read-only TLD registry.
///
/// Cloning is cheap and clones share the registry, so a single detector can
/// be handed to any number of threads.
#[derive(Debug, Clone)]
pub struct DomainDetector {
    registry: Arc<TldRegistry>,
}

impl DomainDetector {
    /// Create a detector over an already-built registry
    pub fn new(registry: Arc<TldRegistry>) -> Self {
        Self { registry }
    }

    /// Load the registry once through `loader` and wrap it
    pub fn from_loader(loader: &dyn TldLoader) -> Result<Self> {
        let registry = loader.load()?;
        log::debug!("Domain detector ready with {} TLDs", registry.len());
        Ok(Self::new(Arc::new(registry)))
    }

    pub fn registry(&self) -> &TldRegistry {
        &self.registry
    }

    pub fn detect(&self, input: &str) -> Result<DomainName> {
        detect_with(&self.registry, input)
    }

    pub fn is_valid(&self, input: &str) -> bool {
        self.detect(input).is_ok()
    }

    /// Detect each input independently, keeping input order.
    pub fn detect_many<I, S>(&self, inputs: I) -> Vec<Result<DomainName>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        inputs
            .into_iter()
            .map(|input| self.detect(input.as_ref()))
            .collect()
    }
}

#[cfg(feature = "bundled")]
impl Default for DomainDetector {
    fn default() -> Self {
        Self::new(Arc::new(TldRegistry::bundled()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCategory, LabelErrorKind};
    use crate::registry::MemoryTldLoader;

    fn registry() -> TldRegistry {
        TldRegistry::from_lines([
            ".com",
            ".cn",
            ".net",
            ".org",
            ".uk",
            ".co",
            ".中国",
            ".xn--fiqs8s",
        ])
    }

    fn detect(input: &str) -> Result<DomainName> {
        detect_with(&registry(), input)
    }

    #[test]
    fn test_detect_simple() {
        let dn = detect("foobar.com").unwrap();
        assert_eq!(dn.name(), "foobar.com");
        assert!(dn.hosts().is_empty());
        assert_eq!(dn.domain_label(), "foobar");
        assert_eq!(dn.top_level_domains(), [".com"]);
    }

    #[test]
    fn test_detect_compound_tld_with_host() {
        let dn = detect("www.foobar.com.cn").unwrap();
        assert_eq!(dn.name(), "www.foobar.com.cn");
        assert_eq!(dn.hosts(), ["www"]);
        assert_eq!(dn.domain_label(), "foobar");
        assert_eq!(dn.top_level_domains(), [".com", ".cn"]);
    }

    #[test]
    fn test_detect_compound_tld_without_host() {
        let dn = detect("foobar.com.cn").unwrap();
        assert!(dn.hosts().is_empty());
        assert_eq!(dn.domain_label(), "foobar");
        assert_eq!(dn.top_level_domains(), [".com", ".cn"]);
    }

    #[test]
    fn test_detect_multiple_hosts() {
        let dn = detect("download.file.foobar.com").unwrap();
        assert_eq!(dn.hosts(), ["download", "file"]);
        assert_eq!(dn.domain_label(), "foobar");
        assert_eq!(dn.top_level_domains(), [".com"]);
    }

    #[test]
    fn test_detect_internationalized() {
        let dn = detect("时尚.中国").unwrap();
        assert!(dn.hosts().is_empty());
        assert_eq!(dn.domain_label(), "时尚");
        assert_eq!(dn.top_level_domains(), [".中国"]);

        let dn = detect("xn--9et52u.xn--fiqs8s").unwrap();
        assert_eq!(dn.domain_label(), "xn--9et52u");
        assert_eq!(dn.top_level_domains(), [".xn--fiqs8s"]);
    }

    #[test]
    fn test_structural_failures() {
        assert!(matches!(detect(""), Err(DomainError::Empty)));
        assert!(matches!(detect(".foobar.com"), Err(DomainError::LeadingDot)));
        assert!(matches!(
            detect("com"),
            Err(DomainError::TooFewLabels { count: 1 })
        ));

        let long = format!("{}.com", "a".repeat(250));
        assert!(matches!(detect(&long), Err(DomainError::TooLong { len: 254 })));
    }

    #[test]
    fn test_length_boundary() {
        // 253 bytes: three 59-byte hosts, a 5-byte host, a 63-byte domain label, ".com"
        let host = "a".repeat(59);
        let input = format!(
            "{h}.{h}.{h}.{}.{}.com",
            "c".repeat(5),
            "b".repeat(63),
            h = host
        );
        assert_eq!(input.len(), 253);
        assert!(detect(&input).is_ok());

        let input = format!("c{}", input);
        assert!(matches!(detect(&input), Err(DomainError::TooLong { .. })));
    }

    #[test]
    fn test_two_labels_unknown_tld() {
        let err = detect("foobar.foobar").unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnknownTld { ref label, position: 1 } if label == "foobar"
        ));
        assert!(detect("foobar.baz").is_err());
    }

    #[test]
    fn test_two_labels_bad_domain_label() {
        for input in ["f.com", "-foobar.com", "foobar-.com", "foobar%.com"] {
            let err = detect(input).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::DomainLabel, "{}", input);
        }
        assert!(detect("fo.com").is_ok());
    }

    #[test]
    fn test_unknown_tld_reported_before_hosts() {
        for input in ["baz-.foobar.foobar", "-baz.foobar.foobar", "%.foobar.foobar"] {
            let err = detect(input).unwrap_err();
            assert!(
                matches!(err, DomainError::UnknownTld { position: 2, .. }),
                "{}: {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_bad_hosts() {
        let cases = [
            ("-.foobar.com", LabelErrorKind::LoneHyphen),
            ("-baz.foobar.com", LabelErrorKind::LeadingHyphen),
            ("baz-.foobar.com", LabelErrorKind::TrailingHyphen),
            ("%.foobar.com", LabelErrorKind::InvalidCharacter),
            ("www..foobar.com", LabelErrorKind::Empty),
        ];
        for (input, expected) in cases {
            match detect(input) {
                Err(DomainError::InvalidHost { kind, .. }) => {
                    assert_eq!(kind, expected, "{}", input)
                }
                other => panic!("{}: expected InvalidHost, got {:?}", input, other),
            }
        }
        assert!(detect("a-b.foobar.com").is_ok());
        assert!(detect("a.foobar.com").is_ok());
    }

    #[test]
    fn test_first_failing_host_aborts() {
        let err = detect("ok.-bad.also_bad.foobar.com").unwrap_err();
        assert_eq!(err.position(), Some(1));
        assert_eq!(err.label(), Some("-bad"));
    }

    #[test]
    fn test_empty_labels() {
        // Trailing dot leaves an empty last label, which is never a TLD
        assert!(matches!(
            detect("foobar.com."),
            Err(DomainError::UnknownTld { .. })
        ));
        // Empty label in domain position
        assert!(matches!(
            detect("www..com"),
            Err(DomainError::InvalidDomainLabel {
                kind: LabelErrorKind::Empty,
                ..
            })
        ));
    }

    #[test]
    fn test_single_tld_when_second_to_last_unknown() {
        let dn = detect("www.foobar.cn").unwrap();
        assert_eq!(dn.hosts(), ["www"]);
        assert_eq!(dn.domain_label(), "foobar");
        assert_eq!(dn.top_level_domains(), [".cn"]);
    }

    #[test]
    fn test_compound_tld_leaves_bad_domain_label() {
        // "com.cn" is taken as the TLD pair, so "f" is the domain label
        let err = detect("f.com.cn").unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidDomainLabel {
                position: 0,
                kind: LabelErrorKind::TooShort,
                ..
            }
        ));
    }

    #[test]
    fn test_idempotent() {
        let a = detect("www.foobar.com.cn").unwrap();
        let b = detect("www.foobar.com.cn").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_detector_shares_registry() {
        let detector = DomainDetector::from_loader(
            &MemoryTldLoader::new().with_tld(".com").with_tld(".cn"),
        )
        .unwrap();
        let clone = detector.clone();
        assert!(std::ptr::eq(detector.registry(), clone.registry()));

        assert!(detector.is_valid("foobar.com"));
        assert!(!detector.is_valid("foobar.net"));
    }

    #[test]
    fn test_detect_many_keeps_order() {
        let detector = DomainDetector::new(Arc::new(registry()));
        let results = detector.detect_many(["foobar.com", "com", "www.foobar.com.cn"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().domain_label(), "foobar");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().hosts(), ["www"]);
    }

    #[test]
    fn test_detector_across_threads() {
        let detector = DomainDetector::new(Arc::new(registry()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let detector = detector.clone();
                std::thread::spawn(move || {
                    detector
                        .detect(&format!("host{}.foobar.com", i))
                        .map(|dn| dn.hosts()[0].clone())
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap().unwrap(), format!("host{}", i));
        }
    }
}
