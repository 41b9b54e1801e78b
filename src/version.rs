//! Semantic version sort keys for release tags.
//!
//! Parses `vMAJOR.MINOR.PATCH[-PRERELEASE[.NUM]]` into a totally ordered
//! key. A prerelease sorts before the stable release of the same
//! major.minor.patch, and prerelease numbers compare numerically so
//! `beta.2 < beta.10`. Parsing never fails: unparsable tags sort after
//! every parsed one, tie-broken by their literal text.

/// Sort key for a release tag.
///
/// The derived ordering does all the work: `Parsed` compares field by field
/// (`stable: false` before `true`), and the `Parsed` variant precedes
/// `Unparsed`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionKey {
    Parsed {
        major: u64,
        minor: u64,
        patch: u64,
        stable: bool,
        pre_label: String,
        pre_num: u64,
    },
    Unparsed(String),
}

impl VersionKey {
    pub fn parse(tag: &str) -> Self {
        Self::try_parse(tag).unwrap_or_else(|| VersionKey::Unparsed(tag.to_string()))
    }

    fn try_parse(tag: &str) -> Option<Self> {
        let version = tag.strip_prefix('v').unwrap_or(tag);

        let (core, prerelease) = match version.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (version, None),
        };

        let mut parts = core.split('.');
        let major = parse_component(parts.next()?)?;
        let minor = parse_component(parts.next()?)?;
        let patch = parse_component(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }

        let (stable, pre_label, pre_num) = match prerelease {
            None => (true, String::new(), 0),
            Some(pre) => {
                // Trailing ".NUM" is the prerelease number; the rest is the label
                let (label, num) = match pre.rsplit_once('.') {
                    Some((label, num)) if is_decimal(num) => (label, num.parse().ok()?),
                    _ => (pre, 0),
                };
                if label.is_empty()
                    || !label
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-')
                {
                    return None;
                }
                (false, label.to_string(), num)
            }
        };

        Some(VersionKey::Parsed {
            major,
            minor,
            patch,
            stable,
            pre_label,
            pre_num,
        })
    }
}

fn parse_component(s: &str) -> Option<u64> {
    if !is_decimal(s) {
        return None;
    }
    s.parse().ok()
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
