//! Plain-text summaries for terminal output

use std::fmt::Write;

use beatshift_services::{ShiftReport, Song};

pub fn report_line(report: &ShiftReport) -> String {
    let mut line = format!(
        "Moved {} notes by {} beats ({} parts, {})",
        report.note_count, report.beats, report.offset_parts, report.strategy
    );
    if report.bar_count_changed() {
        let _ = write!(
            line,
            "; bars {} -> {} (+{} before, +{} after)",
            report.bars_before, report.bars_after, report.bars_prepended, report.bars_appended
        );
    }
    line
}

pub fn describe_song(song: &Song) -> String {
    let grid = song.grid;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} bars x {} channels, {}/{} parts per beat/bar, loop {}+{}",
        if song.name.is_empty() { "Untitled" } else { song.name.as_str() },
        song.bar_count(),
        song.sequence.channel_count,
        grid.parts_per_beat(),
        grid.parts_per_bar(),
        song.loop_start,
        song.loop_length
    );
    for (bar_idx, bar) in song.sequence.bars.iter().enumerate() {
        for (channel_idx, track) in bar.channels.iter().enumerate() {
            if track.is_empty() {
                continue;
            }
            let notes: Vec<String> = track
                .notes
                .iter()
                .map(|n| format!("{}@{}..{}", n.pitch, n.start, n.end))
                .collect();
            let _ = writeln!(out, "  bar {:>3} ch {}: {}", bar_idx, channel_idx, notes.join(" "));
        }
    }
    out
}
