use std::fmt;

/// An inclusive range of wire protocol versions a server speaks.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct VersionRange {
    pub min: i32,
    pub max: i32,
}

impl VersionRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn includes(&self, version: i32) -> bool {
        self.min <= version && version <= self.max
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::VersionRange;

    #[test]
    fn includes_is_inclusive_at_both_ends() {
        let range = VersionRange::new(2, 6);

        assert!(range.includes(2));
        assert!(range.includes(6));
        assert!(!range.includes(1));
        assert!(!range.includes(7));
        assert_eq!(range.to_string(), "[2, 6]");
    }
}
