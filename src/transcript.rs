//! Session transcript: an append-only record of who ran which tool and what
//! came back. The console renders it; tests assert against it.

use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EntryKind {
    Message,
    Handoff,
    AgentRunning,
    ToolCall,
    ToolOutput,
    ToolError,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Message => "Message",
            EntryKind::Handoff => "Handing Off Request",
            EntryKind::AgentRunning => "Agent Now Running",
            EntryKind::ToolCall => "Tool Call",
            EntryKind::ToolOutput => "Tool Output",
            EntryKind::ToolError => "Tool Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub seq: u64,
    pub kind: EntryKind,
    pub actor: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    entries: VecDeque<Entry>,
    capacity: usize,
    next_seq: u64,
}

impl Transcript {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: VecDeque::new(), capacity: capacity.max(1), next_seq: 0 }
    }

    pub fn record(
        &mut self,
        kind: EntryKind,
        actor: impl Into<String>,
        content: impl Into<String>,
    ) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        let entry =
            Entry { seq: self.next_seq, kind, actor: actor.into(), content: content.into() };
        self.next_seq += 1;
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<Entry> {
        self.recent_offset(n, 0)
    }

    /// A window of `n` entries ending `offset` entries before the newest.
    pub fn recent_offset(&self, n: usize, offset: usize) -> Vec<Entry> {
        let end = self.entries.len().saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.entries.range(start..end).cloned().collect()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
