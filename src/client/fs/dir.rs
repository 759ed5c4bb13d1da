use std::collections::VecDeque;

use crate::protocol::DirEntry;

/// Iterator over the entries of a remote directory, in server order.
#[derive(Debug)]
pub struct ReadDir {
    pub(crate) entries: VecDeque<DirEntry>,
}

impl ReadDir {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Iterator for ReadDir {
    type Item = DirEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.pop_front()
    }
}
