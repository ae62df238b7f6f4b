use std::collections::BTreeMap;

/// Maps intake concern identifiers onto the knowledge base's condition tags.
#[derive(Debug, Clone, Copy)]
pub struct ConcernNormalizer<'a> {
    map: &'a BTreeMap<String, Vec<String>>,
}

impl<'a> ConcernNormalizer<'a> {
    pub fn new(map: &'a BTreeMap<String, Vec<String>>) -> Self {
        Self { map }
    }

    /// Condition tags for `concern`. Unknown concerns pass through unchanged,
    /// so a concern spelled the same as a tag needs no mapping entry.
    pub fn expand<'s>(&self, concern: &'s str) -> Vec<&'s str>
    where
        'a: 's,
    {
        let map = self.map;
        match map.get(concern) {
            Some(tags) if !tags.is_empty() => tags.iter().map(String::as_str).collect(),
            _ => vec![concern],
        }
    }

    /// The mapped concern vocabulary, sorted by identifier.
    pub fn known_concerns(&self) -> impl Iterator<Item = (&'a str, &'a [String])> + use<'a> {
        let map = self.map;
        map.iter().map(|(c, tags)| (c.as_str(), tags.as_slice()))
    }
}
