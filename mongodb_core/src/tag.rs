use std::collections::HashMap;

/// A single replica set member tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

/// The tags a server reports in its heartbeat, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self(tags)
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let mut tags = map
            .iter()
            .map(|(name, value)| Tag {
                name: name.clone(),
                value: value.clone(),
            })
            .collect::<Vec<_>>();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Self(tags)
    }

    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.0.iter().any(|t| t.name == name && t.value == value)
    }

    /// True when every tag in `other` is also in this set.
    pub fn contains_all(&self, other: &TagSet) -> bool {
        other.0.iter().all(|t| self.contains(&t.name, &t.value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}
