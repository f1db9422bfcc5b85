//! Text rendering of catalog listings and search results for the CLI.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::{Language, SearchResult, Video};
use crate::search::{SearchOutcome, SeekTarget};
use crate::theme::Theme;
use crate::timestamp::{self, ParseError, Timestamp};

const FALLBACK_WIDTH: usize = 80;
const ELLIPSIS: char = '…';

/// Width of stdout's terminal, or 80 when it is not a terminal.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Count digits in a number (for width calculation).
pub fn count_digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Cut `s` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

/// Collapse line breaks and runs of whitespace in a subtitle snippet.
fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One line per video: id, title, upload date.
pub fn video_table(videos: &[Video], theme: &Theme, width: usize) -> String {
    if videos.is_empty() {
        return theme.secondary_text("No videos on the server yet");
    }

    let id_width = videos
        .iter()
        .map(|v| v.id.to_string().len())
        .max()
        .unwrap_or(1);
    // id, two gaps, date column
    let title_width = width.saturating_sub(id_width + 2 + 2 + 10).max(10);

    videos
        .iter()
        .map(|video| {
            let title = truncate_to_width(&single_line(&video.title), title_width);
            let pad = title_width.saturating_sub(title.width());
            let date = video
                .uploaded_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            format!(
                "{}  {}{}  {}",
                theme.accent_text(&format!("{:>id_width$}", video.id)),
                theme.primary_text(&title),
                " ".repeat(pad),
                theme.secondary_text(&date),
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn language_list(languages: &[Language], theme: &Theme) -> String {
    if languages.is_empty() {
        return theme.secondary_text("No subtitles available for this video");
    }

    languages
        .iter()
        .map(|l| {
            if l.name.is_empty() {
                theme.accent_text(&l.code)
            } else {
                format!(
                    "{}  {}",
                    theme.accent_text(&format!("{:<4}", l.code)),
                    theme.primary_text(&l.name)
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Numbered result list, best match first.
///
/// Results whose timestamp cannot be parsed are still listed, marked as not
/// seekable.
pub fn search_results(query: &str, outcome: &SearchOutcome, theme: &Theme, width: usize) -> String {
    let targets = match outcome {
        SearchOutcome::NoResults => {
            return theme.secondary_text(&format!("No results for {:?}", query.trim()));
        }
        SearchOutcome::Results(targets) => targets,
    };

    let rank_width = count_digits(targets.len());
    targets
        .iter()
        .map(|target| result_line(target, rank_width, theme, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn result_line(target: &SeekTarget, rank_width: usize, theme: &Theme, width: usize) -> String {
    let position = position_cell(&target.timestamp, theme);
    // "N. " + "HH:MM:SS.mmm" + "  "
    let used = rank_width + 2 + 12 + 2;
    let snippet = truncate_to_width(&single_line(&target.result.content), width.saturating_sub(used).max(10));

    format!(
        "{:>rank_width$}. {}  {}",
        target.rank,
        position,
        theme.primary_text(&snippet)
    )
}

/// Every subtitle line of a video, in backend order.
pub fn subtitle_list(subtitles: &[SearchResult], theme: &Theme, width: usize) -> String {
    if subtitles.is_empty() {
        return theme.secondary_text("No subtitles for this video");
    }

    subtitles
        .iter()
        .map(|subtitle| {
            let position = position_cell(&timestamp::parse(&subtitle.raw_timestamp), theme);
            let text = truncate_to_width(&single_line(&subtitle.content), width.saturating_sub(14).max(10));
            format!("{}  {}", position, theme.primary_text(&text))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Twelve columns: the timestamp, or a centered marker when it did not parse.
fn position_cell(timestamp: &Result<Timestamp, ParseError>, theme: &Theme) -> String {
    match timestamp {
        Ok(ts) => theme.accent_text(&ts.to_string()),
        Err(_) => theme.error_text(&format!("{:^12}", "no time")),
    }
}
