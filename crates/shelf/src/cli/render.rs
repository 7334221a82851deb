//! # Rendering Module
//!
//! Turns `CmdResult` values into terminal text. Every function here returns a
//! `String` so output can be tested without a terminal; `commands.rs` does the
//! printing.
//!
//! Layout math (column widths, truncation) is Unicode-aware via
//! `unicode-width`, since titles routinely carry wide characters. Colors come
//! from `colored`, which disables itself when stdout is not a terminal or
//! `NO_COLOR` is set.

use chrono::{DateTime, Utc};
use colored::Colorize;
use shelfapp::api::{CmdMessage, Listed, MessageLevel, ScoreSummary};
use shelfapp::model::{
    GroupWatch, ProgressItem, Rating, Recommendation, Review, Score, SharedContent, WatchItem,
};
use shelfapp::shelf::StoreStatus;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const BAR_WIDTH: usize = 20;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

/// One line per entry, ids aligned in the first column.
pub fn render_listed(listed: &[Listed]) -> String {
    if listed.is_empty() {
        return format!("{}\n", "Nothing here yet.".dimmed());
    }

    let id_width = listed
        .iter()
        .map(|entry| entry.id().to_string().width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in listed {
        let id = entry.id().to_string();
        let id_cell = format!("{}{}", id, " ".repeat(id_width - id.width()));
        let prefix_width = id_width + 4;
        let available = LINE_WIDTH.saturating_sub(prefix_width);

        let body = match entry {
            Listed::Watch(item) => watch_line(item, available),
            Listed::Progress(item) => progress_line(item, available),
            Listed::Rating(rating) => rating_line(rating, available),
            Listed::Review(review) => review_line(review, available),
            Listed::Shared(share) => shared_line(share, available),
            Listed::Recommendation(rec) => recommendation_line(rec, available),
            Listed::GroupWatch(watch) => group_watch_line(watch, available),
        };
        out.push_str(&format!("  {}  {}\n", id_cell.yellow(), body));
    }
    out
}

pub fn render_score(summary: &ScoreSummary) -> String {
    match summary.average {
        Some(average) => format!(
            "{} {} {:.2} from {} score{}\n",
            summary.content_id.to_string().yellow(),
            stars_for(average.round() as u8),
            average,
            summary.count,
            if summary.count == 1 { "" } else { "s" }
        ),
        None => String::new(),
    }
}

pub fn render_stores(stores: &[StoreStatus]) -> String {
    let key_width = stores.iter().map(|s| s.key.width()).max().unwrap_or(0);
    let mut out = String::new();
    for store in stores {
        let hydration = if store.hydration_failed {
            store.hydration.red()
        } else {
            store.hydration.normal()
        };
        out.push_str(&format!(
            "  {}{}  {:<16}  {:>5}  {}\n",
            store.key.bold(),
            " ".repeat(key_width - store.key.width()),
            store.policy,
            store.entries,
            hydration
        ));
        if let Some(err) = &store.persist_error {
            out.push_str(&format!("      {}\n", format!("last write failed: {}", err).red()));
        }
    }
    if let Some(store) = stores.first() {
        if let Some(dir) = store.location.parent() {
            out.push_str(&format!("  {}\n", dir.display().to_string().dimmed()));
        }
    }
    out
}

fn watch_line(item: &WatchItem, available: usize) -> String {
    let mut details = item.kind.to_string();
    if let Some(year) = item.year {
        details = format!("{}, {}", details, year);
    }
    if !item.genres.is_empty() {
        details = format!("{}, {}", details, item.genres.join("/"));
    }
    let time = format_time_ago(item.added_at);
    columns(&item.title, &format!("({})", details), &time, available)
}

fn progress_line(item: &ProgressItem, available: usize) -> String {
    let bar = progress_bar(item.progress);
    let remaining = format!("{} left", format_duration(item.remaining_secs()));
    let title_width = available.saturating_sub(BAR_WIDTH + 7 + TIME_WIDTH + 2);
    let title = pad_to_width(&truncate_to_width(&item.title, title_width), title_width);
    format!(
        "{} {} {:>3.0}% {}",
        title,
        bar,
        item.progress,
        format!("{:>width$}", remaining, width = TIME_WIDTH).dimmed()
    )
}

fn rating_line(rating: &Rating, available: usize) -> String {
    let time = format_time_ago(rating.rated_at);
    let title_width = available.saturating_sub(TIME_WIDTH + 1);
    format!(
        "{}{}",
        pad_to_width(&stars(rating.score), title_width),
        time.dimmed()
    )
}

fn review_line(review: &Review, available: usize) -> String {
    let head = format!(
        "{} on {} by {}",
        stars(review.score),
        review.content_id,
        review.author
    );
    let reactions = format!("+{} -{}", review.likes, review.dislikes);
    let body = format!("{}: {}", head, review.body.replace('\n', " "));
    columns(&body, &reactions, &format_time_ago(review.created_at), available)
}

fn shared_line(share: &SharedContent, available: usize) -> String {
    let to = format!("to {}", share.recipients.join(", "));
    columns(&share.title, &to, &format_time_ago(share.shared_at), available)
}

fn recommendation_line(rec: &Recommendation, available: usize) -> String {
    let from = match &rec.reason {
        Some(reason) => format!("from {}: {}", rec.from, reason),
        None => format!("from {}", rec.from),
    };
    columns(&rec.title, &from, &format_time_ago(rec.created_at), available)
}

fn group_watch_line(watch: &GroupWatch, available: usize) -> String {
    let who = format!(
        "hosted by {}, {} going",
        watch.host,
        watch.participants.len()
    );
    let when = watch.scheduled_for.format("%Y-%m-%d %H:%M").to_string();
    columns(&watch.title, &who, &when, available)
}

/// `title  detail ........ right`, truncating the left part to fit.
fn columns(title: &str, detail: &str, right: &str, available: usize) -> String {
    let right_width = right.width().max(TIME_WIDTH);
    let left_width = available.saturating_sub(right_width + 1);
    let left = truncate_to_width(&format!("{}  {}", title, detail), left_width);

    // Style only the title portion; the detail stays dim.
    let (styled, plain_width) = match left.find(detail) {
        Some(pos) if !detail.is_empty() => (
            format!("{}{}", left[..pos].bold(), left[pos..].dimmed()),
            left.width(),
        ),
        _ => (left.bold().to_string(), left.width()),
    };
    format!(
        "{}{} {}",
        styled,
        " ".repeat(left_width.saturating_sub(plain_width)),
        format!("{:>width$}", right, width = right_width).dimmed()
    )
}

fn stars(score: Score) -> String {
    stars_for(score.value())
}

fn stars_for(filled: u8) -> String {
    let filled = filled.min(Score::MAX) as usize;
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(Score::MAX as usize - filled)
    )
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    )
}

fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    let (hours, minutes) = (total / 3600, (total % 3600) / 60);
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", total)
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfapp::model::{EntryId, MediaKind};
    use std::path::PathBuf;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_truncate_to_width_handles_wide_chars() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Each CJK character is two columns wide
        let truncated = truncate_to_width("千と千尋の神隠し", 7);
        assert!(truncated.width() <= 7);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(Score::new(3).unwrap()), "★★★☆☆");
        assert_eq!(stars_for(9), "★★★★★");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42.0), "42s");
        assert_eq!(format_duration(600.0), "10m");
        assert_eq!(format_duration(3900.0), "1h 05m");
        assert_eq!(format_duration(-5.0), "0s");
    }

    #[test]
    fn test_render_listed_empty() {
        plain();
        assert_eq!(render_listed(&[]), "Nothing here yet.\n");
    }

    #[test]
    fn test_render_watch_items_aligns_ids() {
        plain();
        let listed = vec![
            Listed::Watch(WatchItem::new(7, "Dark").with_kind(MediaKind::Series)),
            Listed::Watch(WatchItem::new(1234, "Heat").with_year(1995)),
        ];
        let out = render_listed(&listed);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  7     Dark"));
        assert!(lines[0].contains("(series)"));
        assert!(lines[1].starts_with("  1234  Heat"));
        assert!(lines[1].contains("(movie, 1995)"));
        assert!(lines.iter().all(|l| l.width() <= LINE_WIDTH));
    }

    #[test]
    fn test_render_uuid_ids_in_full() {
        plain();
        let review = Review::new(
            EntryId::Int(3),
            "ana".to_string(),
            Score::new(4).unwrap(),
            "Great".to_string(),
        );
        let id = review.id.to_string();
        let out = render_listed(&[Listed::Review(review)]);
        // Ids must be typed back verbatim, so they are never shortened
        assert!(out.starts_with(&format!("  {}  ★★★★☆ on 3 by ana", id)));
        assert!(out.lines().all(|l| l.width() <= LINE_WIDTH));
        assert!(out.contains("+0 -0"));
    }

    #[test]
    fn test_render_score() {
        plain();
        let summary = ScoreSummary {
            content_id: EntryId::Int(5),
            average: Some(3.5),
            count: 2,
        };
        assert_eq!(render_score(&summary), "5 ★★★★☆ 3.50 from 2 scores\n");

        let none = ScoreSummary {
            content_id: EntryId::Int(5),
            average: None,
            count: 0,
        };
        assert_eq!(render_score(&none), "");
    }

    #[test]
    fn test_render_stores_flags_persist_errors() {
        plain();
        let stores = vec![StoreStatus {
            key: "myList".to_string(),
            policy: "insert-if-absent",
            entries: 2,
            hydration: "loaded 2".to_string(),
            hydration_failed: false,
            persist_error: Some("disk full".to_string()),
            location: PathBuf::from("/data/myList.json"),
        }];
        let out = render_stores(&stores);
        assert!(out.contains("myList"));
        assert!(out.contains("loaded 2"));
        assert!(out.contains("last write failed: disk full"));
        assert!(out.contains("/data"));
    }
}
