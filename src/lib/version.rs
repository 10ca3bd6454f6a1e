// src/lib/version.rs

// semantic version triple, ordered major first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    // version of this library
    pub const CURRENT: Version = Version::new(0, 1, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    pub fn at_least(&self, other: Version) -> bool {
        *self >= other
    }

    pub fn at_most(&self, other: Version) -> bool {
        *self <= other
    }

    pub fn same_major(&self, major: u32) -> bool {
        self.major == major
    }

    pub fn same_minor(&self, major: u32, minor: u32) -> bool {
        self.major == major && self.minor == minor
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
