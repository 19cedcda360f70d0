//! Plain-text and CSV rendering of a lap history
//!
//! The engine produces the strings only; delivering them (file, mail,
//! clipboard) is the shell's job. The layouts are a stable contract:
//! downstream spreadsheets parse the CSV header and row shape.

use crate::format::format_time;
use crate::history::LapHistory;

/// Render a plain-text session summary
///
/// One `Lap {n}: {time}` line per lap in chronological order. The
/// fastest lap is annotated ` (best)` and the slowest ` (worst)`,
/// earliest occurrence winning ties; with a single lap only ` (best)`
/// appears. An empty history renders the header alone.
pub fn to_text(history: &LapHistory) -> String {
    let mut out = String::from("Lap timer session data\n\n");

    let best = history.best();
    let worst = history.worst();

    for (i, lap) in history.iter().enumerate() {
        out.push_str(&format!("Lap {}: {}", i + 1, format_time(lap)));
        if best.is_some_and(|(idx, _)| idx == i) {
            out.push_str(" (best)");
        } else if worst.is_some_and(|(idx, _)| idx == i) {
            out.push_str(" (worst)");
        }
        out.push('\n');
    }

    out
}

/// Render the lap history as CSV
///
/// Header `lap,time,milliseconds`, then one row per lap carrying the
/// 1-based lap number, the formatted time and the raw milliseconds.
/// Rows use CRLF line endings.
pub fn to_csv(history: &LapHistory) -> String {
    let mut out = String::from("lap,time,milliseconds\r\n");

    for (i, lap) in history.iter().enumerate() {
        out.push_str(&format!("{},{},{}\r\n", i + 1, format_time(lap), lap));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(laps: &[u64]) -> LapHistory {
        let mut h = LapHistory::new();
        for &lap in laps {
            h.append(lap);
        }
        h
    }

    #[test]
    fn test_text_annotates_best_and_worst() {
        let text = to_text(&history(&[12_300, 11_900, 15_000]));
        assert_eq!(
            text,
            "Lap timer session data\n\n\
             Lap 1: 0:12:3\n\
             Lap 2: 0:11:9 (best)\n\
             Lap 3: 0:15:0 (worst)\n"
        );
    }

    #[test]
    fn test_text_single_lap_is_best_only() {
        let text = to_text(&history(&[12_300]));
        assert_eq!(text, "Lap timer session data\n\nLap 1: 0:12:3 (best)\n");
    }

    #[test]
    fn test_text_empty_history_is_header_only() {
        assert_eq!(to_text(&LapHistory::new()), "Lap timer session data\n\n");
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&history(&[12_300, 61_234]));
        assert_eq!(
            csv,
            "lap,time,milliseconds\r\n\
             1,0:12:3,12300\r\n\
             2,1:01:2,61234\r\n"
        );
    }

    #[test]
    fn test_csv_empty_history_is_header_only() {
        assert_eq!(to_csv(&LapHistory::new()), "lap,time,milliseconds\r\n");
    }
}
