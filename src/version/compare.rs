use std::cmp::Ordering;
use std::fmt;

/// A `major.minor.patch` triple parsed from an arbitrary version string.
///
/// Parsing never fails: missing components and segments that are not plain
/// non-negative integers become `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string, defaulting unparseable or missing segments to zero.
    ///
    /// Examples:
    /// - "1" -> Version(1, 0, 0)
    /// - "1.2" -> Version(1, 2, 0)
    /// - "1.x.3" -> Version(1, 0, 3)
    /// - "1.2.3.4" -> Version(1, 2, 3)
    pub fn parse(input: &str) -> Self {
        let mut segments = input
            .split('.')
            .map(|segment| segment.parse::<u64>().unwrap_or(0));

        let major = segments.next().unwrap_or(0);
        let minor = segments.next().unwrap_or(0);
        let patch = segments.next().unwrap_or(0);

        Self::new(major, minor, patch)
    }
}

impl From<&str> for Version {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
