use serde::Serialize;

use crate::domain::value_objects::remote_address::RemoteAddress;

/// The remotes of a repository, keyed by name.
///
/// Iteration follows the order in which names were first inserted.
/// Inserting a name that is already present replaces its address in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RemoteSet {
    remotes: Vec<RemoteAddress>,
}

impl RemoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `remote`, returning the address it replaced.
    pub fn insert(&mut self, remote: RemoteAddress) -> Option<RemoteAddress> {
        match self.remotes.iter_mut().find(|r| r.name() == remote.name()) {
            Some(existing) => Some(std::mem::replace(existing, remote)),
            None => {
                self.remotes.push(remote);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RemoteAddress> {
        self.remotes.iter().find(|r| r.name() == name)
    }

    /// Remove and return the named remote.
    pub fn take(&mut self, name: &str) -> Option<RemoteAddress> {
        let index = self.remotes.iter().position(|r| r.name() == name)?;
        Some(self.remotes.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.remotes.iter().map(RemoteAddress::name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemoteAddress> {
        self.remotes.iter()
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

impl IntoIterator for RemoteSet {
    type Item = RemoteAddress;
    type IntoIter = std::vec::IntoIter<RemoteAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.remotes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RemoteSet {
    type Item = &'a RemoteAddress;
    type IntoIter = std::slice::Iter<'a, RemoteAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.remotes.iter()
    }
}

impl FromIterator<RemoteAddress> for RemoteSet {
    fn from_iter<I: IntoIterator<Item = RemoteAddress>>(iter: I) -> Self {
        let mut set = RemoteSet::new();
        for remote in iter {
            set.insert(remote);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn remote(name: &str, url: &str) -> RemoteAddress {
        RemoteAddress::from_url(url, name).unwrap()
    }

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut set = RemoteSet::new();
        set.insert(remote("origin", "https://github.com/a/a.git"));
        set.insert(remote("upstream", "https://github.com/b/b.git"));
        set.insert(remote("origin", "https://github.com/c/c.git"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["origin", "upstream"]);
        assert_eq!(set.get("origin").unwrap().path(), Some("/c/c.git"));
    }

    #[test]
    fn test_insert_returns_replaced() {
        let mut set = RemoteSet::new();
        assert!(set.insert(remote("origin", "https://github.com/a/a.git")).is_none());
        let replaced = set.insert(remote("origin", "https://github.com/b/b.git"));
        assert_eq!(replaced.unwrap().path(), Some("/a/a.git"));
    }

    #[test]
    fn test_lookup_and_take() {
        let mut set: RemoteSet = vec![
            remote("origin", "https://github.com/a/a.git"),
            remote("fork", "git@github.com:me/a.git"),
        ]
        .into_iter()
        .collect();

        assert!(set.contains("fork"));
        assert!(!set.contains("missing"));
        assert!(set.get("missing").is_none());

        let fork = set.take("fork").unwrap();
        assert_eq!(fork.host(), Some("github.com"));
        assert!(!set.contains("fork"));
        assert!(set.take("fork").is_none());
    }

    #[test]
    fn test_empty_set() {
        let set = RemoteSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
