//! Bars, channel tracks and notes

use serde::{Deserialize, Serialize};

/// A single note inside a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Start position in parts, relative to the owning bar
    pub start: u32,
    /// End position in parts (exclusive). May exceed the bar length for
    /// notes that spill into the following bar.
    pub end: u32,
    /// MIDI note number (0-127, 60 = middle C)
    pub pitch: u8,
    /// Velocity (0-127)
    pub velocity: u8,
}

impl Note {
    pub fn new(start: u32, end: u32, pitch: u8, velocity: u8) -> Self {
        Self { start, end, pitch, velocity }
    }

    /// Length in parts
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Notes of one channel within one bar, sorted by start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTrack {
    pub notes: Vec<Note>,
}

impl ChannelTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(mut notes: Vec<Note>) -> Self {
        notes.sort_by_key(|n| n.start);
        Self { notes }
    }

    /// Add a note, keeping notes sorted by start
    pub fn add_note(&mut self, note: Note) {
        let idx = self.notes
            .iter()
            .position(|n| n.start > note.start)
            .unwrap_or(self.notes.len());
        self.notes.insert(idx, note);
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// One bar: a channel track per channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub channels: Vec<ChannelTrack>,
}

impl Bar {
    /// An empty bar with `channel_count` empty channel tracks
    pub fn empty(channel_count: usize) -> Self {
        Self {
            channels: vec![ChannelTrack::new(); channel_count],
        }
    }

    pub fn note_count(&self) -> usize {
        self.channels.iter().map(|c| c.notes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(ChannelTrack::is_empty)
    }
}

/// Ordered bars of a song. Every bar carries the same number of channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub channel_count: usize,
    pub bars: Vec<Bar>,
}

impl Sequence {
    pub fn new(channel_count: usize, bar_count: usize) -> Self {
        Self {
            channel_count,
            bars: vec![Bar::empty(channel_count); bar_count],
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Total notes across all bars and channels
    pub fn note_count(&self) -> usize {
        self.bars.iter().map(Bar::note_count).sum()
    }

    pub fn channel(&self, bar: usize, channel: usize) -> Option<&ChannelTrack> {
        self.bars.get(bar)?.channels.get(channel)
    }

    pub fn channel_mut(&mut self, bar: usize, channel: usize) -> Option<&mut ChannelTrack> {
        self.bars.get_mut(bar)?.channels.get_mut(channel)
    }

    /// Add a note to a bar and channel, growing the sequence if the bar
    /// does not exist yet. Returns false if the channel is out of range.
    pub fn add_note(&mut self, bar: usize, channel: usize, note: Note) -> bool {
        if channel >= self.channel_count {
            return false;
        }
        while self.bars.len() <= bar {
            self.bars.push(Bar::empty(self.channel_count));
        }
        self.bars[bar].channels[channel].add_note(note);
        true
    }

    /// Iterate `(bar, channel, note)` for every note
    pub fn iter_notes(&self) -> impl Iterator<Item = (usize, usize, &Note)> {
        self.bars.iter().enumerate().flat_map(|(bar_idx, bar)| {
            bar.channels.iter().enumerate().flat_map(move |(channel_idx, track)| {
                track.notes.iter().map(move |note| (bar_idx, channel_idx, note))
            })
        })
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
