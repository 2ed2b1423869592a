use crate::link::LinkRecord;
use std::collections::{HashMap, HashSet, VecDeque};

/// Records discovered but not fetched yet, oldest first.
#[derive(Debug, Default)]
pub struct WaitingSet {
    queue: VecDeque<LinkRecord>,
    keys: HashSet<String>,
}

impl WaitingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false and drops `record` when its url is already waiting.
    pub fn insert_if_absent(&mut self, record: LinkRecord) -> bool {
        if !self.keys.insert(record.url.clone()) {
            return false;
        }
        self.queue.push_back(record);
        true
    }

    pub fn pop_oldest(&mut self) -> Option<LinkRecord> {
        let record = self.queue.pop_front()?;
        self.keys.remove(&record.url);
        Some(record)
    }

    pub fn remove(&mut self, url: &str) -> Option<LinkRecord> {
        if !self.keys.remove(url) {
            return None;
        }
        let index = self.queue.iter().position(|r| r.url == url)?;
        self.queue.remove(index)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.keys.contains(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Successfully fetched pages, in the order they were promoted.
///
/// Write-once per url: a second insert for the same url is ignored.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    records: Vec<LinkRecord>,
    index: HashMap<String, usize>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: LinkRecord) -> bool {
        if self.index.contains_key(&record.url) {
            return false;
        }
        self.index.insert(record.url.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&LinkRecord> {
        self.index.get(url).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<LinkRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a VisitedSet {
    type Item = &'a LinkRecord;
    type IntoIter = std::slice::Iter<'a, LinkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<LinkRecord> for VisitedSet {
    fn from_iter<T: IntoIterator<Item = LinkRecord>>(iter: T) -> Self {
        let mut visited = VisitedSet::new();
        for record in iter {
            visited.insert(record);
        }
        visited
    }
}
