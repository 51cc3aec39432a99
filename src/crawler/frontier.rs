//! Breadth-first crawl frontier
//!
//! Holds the FIFO queue of pending URLs plus the two membership sets a crawl
//! needs: every URL ever admitted (bounded by the discovery cap) and every URL
//! already dequeued.

use std::collections::{HashSet, VecDeque};

/// A URL waiting to be visited and the link depth it was found at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

/// Result of offering a discovered link to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Already queued or visited; nothing changed
    AlreadySeen,
    /// The discovery cap is full; the caller stops offering links from this page
    CapReached,
    Enqueued,
}

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    /// Every URL ever admitted, root included
    queued: HashSet<String>,
    visited: HashSet<String>,
    max_discovered: usize,
}

impl Frontier {
    /// A frontier holding only the root at depth 0
    pub fn seeded(root: impl Into<String>, max_discovered: usize) -> Self {
        let root = root.into();
        let mut queued = HashSet::new();
        queued.insert(root.clone());

        Self {
            queue: VecDeque::from([FrontierEntry {
                url: root,
                depth: 0,
            }]),
            queued,
            visited: HashSet::new(),
            max_discovered,
        }
    }

    /// Dequeues the next unvisited entry and marks it visited
    pub fn next(&mut self) -> Option<FrontierEntry> {
        while let Some(entry) = self.queue.pop_front() {
            if self.visited.insert(entry.url.clone()) {
                return Some(entry);
            }
        }
        None
    }

    /// Offers a discovered link at `depth`
    pub fn offer(&mut self, url: &str, depth: u32) -> Offer {
        if self.queued.contains(url) || self.visited.contains(url) {
            return Offer::AlreadySeen;
        }
        if self.queued.len() >= self.max_discovered {
            return Offer::CapReached;
        }

        self.queued.insert(url.to_string());
        self.queue.push_back(FrontierEntry {
            url: url.to_string(),
            depth,
        });
        Offer::Enqueued
    }

    pub fn queued_count(&self) -> usize {
        self.queued.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
