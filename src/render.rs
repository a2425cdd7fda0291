// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Framed report rendering

use crate::types::{FileChange, RepoStatus, ScanReport, StatusCode};
use owo_colors::Style;
use std::fmt::Write;

const TOP_LEFT: &str = "╔";
const TOP_RIGHT: &str = "╗";
const BOTTOM_LEFT: &str = "╚";
const BOTTOM_RIGHT: &str = "╝";
const HORIZONTAL: &str = "═";
const VERTICAL: &str = "║";
const TEE_RIGHT: &str = "╠";
const TEE_LEFT: &str = "╣";

const FILE_COL: usize = 40;
const STATUS_COL: usize = 20;

/// Renderer configuration
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Total frame width in columns
    pub width: usize,
    /// Whether to emit ANSI styling
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 80,
            color: true,
        }
    }
}

/// Styles for every report element; all no-ops when color is disabled
struct Palette {
    frame: Style,
    label: Style,
    banner: Style,
    path: Style,
    success: Style,
    green: Style,
    yellow: Style,
    red: Style,
    magenta: Style,
    blue: Style,
    white: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Self {
                frame: Style::new().cyan(),
                label: Style::new().bold(),
                banner: Style::new().bold().on_blue(),
                path: Style::new().bold().white(),
                success: Style::new().bold().green(),
                green: Style::new().green(),
                yellow: Style::new().yellow(),
                red: Style::new().red(),
                magenta: Style::new().magenta(),
                blue: Style::new().blue(),
                white: Style::new().white(),
            }
        } else {
            let plain = Style::new();
            Self {
                frame: plain,
                label: plain,
                banner: plain,
                path: plain,
                success: plain,
                green: plain,
                yellow: plain,
                red: plain,
                magenta: plain,
                blue: plain,
                white: plain,
            }
        }
    }

    fn for_change(&self, change: &FileChange) -> Style {
        if change.staged {
            return self.green;
        }
        match change.status {
            StatusCode::Modified => self.yellow,
            StatusCode::Added => self.green,
            StatusCode::Deleted => self.red,
            StatusCode::Untracked => self.magenta,
            StatusCode::Renamed => self.blue,
            StatusCode::Unknown => self.white,
        }
    }
}

struct Span {
    text: String,
    style: Style,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Emits one frame's rows and rules with width-aware padding.
///
/// Padding is computed from the unstyled text, so ANSI escape sequences
/// never throw the columns off.
struct Frame<'a> {
    out: &'a mut String,
    width: usize,
    style: Style,
}

impl<'a> Frame<'a> {
    fn new(out: &'a mut String, width: usize, style: Style) -> Self {
        Self { out, width, style }
    }

    fn inner(&self) -> usize {
        self.width.saturating_sub(2)
    }

    fn edge(&mut self, left: &str, right: &str) {
        let mut rule = String::with_capacity(self.width * 3);
        rule.push_str(left);
        for _ in 0..self.inner() {
            rule.push_str(HORIZONTAL);
        }
        rule.push_str(right);
        let _ = writeln!(self.out, "{}", self.style.style(rule));
    }

    fn row(&mut self, spans: &[Span]) {
        let _ = write!(self.out, "{}", self.style.style(VERTICAL));
        let mut used = 0;
        for span in spans {
            used += span.text.chars().count();
            let _ = write!(self.out, "{}", span.style.style(&span.text));
        }
        for _ in used..self.inner() {
            self.out.push(' ');
        }
        let _ = writeln!(self.out, "{}", self.style.style(VERTICAL));
    }

    fn centered(&mut self, span: &Span) {
        let len = span.text.chars().count();
        let left = self.inner().saturating_sub(len) / 2;
        let right = self.inner().saturating_sub(len + left);
        let _ = write!(self.out, "{}", self.style.style(VERTICAL));
        for _ in 0..left {
            self.out.push(' ');
        }
        let _ = write!(self.out, "{}", span.style.style(&span.text));
        for _ in 0..right {
            self.out.push(' ');
        }
        let _ = writeln!(self.out, "{}", self.style.style(VERTICAL));
    }
}

/// Truncate `text` to at most `max` columns, marking the cut with an ellipsis
fn truncate_cell(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cell: String = text.chars().take(max.saturating_sub(3)).collect();
    cell.push_str("...");
    cell
}

/// Truncate and right-pad `text` to exactly `width` columns
fn pad_cell(text: &str, width: usize) -> String {
    let mut cell = truncate_cell(text, width);
    while cell.chars().count() < width {
        cell.push(' ');
    }
    cell
}

/// Human-readable label for a change, part of the on-screen contract
#[must_use]
pub fn status_label(change: &FileChange) -> &'static str {
    if change.staged {
        match change.status {
            StatusCode::Modified => "modified (staged)",
            StatusCode::Added => "new file (staged)",
            StatusCode::Deleted => "deleted (staged)",
            StatusCode::Renamed => "renamed (staged)",
            _ => "staged",
        }
    } else {
        match change.status {
            StatusCode::Modified => "modified",
            StatusCode::Added => "new file",
            StatusCode::Deleted => "deleted",
            StatusCode::Untracked => "untracked",
            StatusCode::Renamed => "renamed",
            StatusCode::Unknown => "unknown",
        }
    }
}

/// Progress line printed before the walk starts
#[must_use]
pub fn scanning_banner(config: &RenderConfig) -> String {
    let palette = Palette::new(config.color);
    format!(
        "{}",
        palette
            .yellow
            .style("Scanning for git repositories with uncommitted changes...")
    )
}

/// Celebration line for an empty report
#[must_use]
pub fn all_clean_banner(config: &RenderConfig) -> String {
    let palette = Palette::new(config.color);
    format!(
        "\n{}\n",
        palette
            .success
            .style("✓ No uncommitted changes found in any git repository!")
    )
}

/// Render the complete framed report to a string
#[must_use]
pub fn render_report(report: &ScanReport, config: &RenderConfig) -> String {
    let palette = Palette::new(config.color);
    let mut out = String::new();

    render_title(&mut out, config, &palette);
    for repo in &report.repos {
        render_repo(&mut out, repo, config, &palette);
    }
    render_summary(&mut out, report, config, &palette);

    out
}

fn render_title(out: &mut String, config: &RenderConfig, palette: &Palette) {
    out.push('\n');
    let mut frame = Frame::new(out, config.width, palette.frame);
    frame.edge(TOP_LEFT, TOP_RIGHT);
    frame.centered(&Span::styled(
        "  GIT UNCOMMITTED CHANGES SCANNER  ",
        palette.banner,
    ));
    frame.edge(BOTTOM_LEFT, BOTTOM_RIGHT);
    out.push('\n');
}

fn render_repo(out: &mut String, repo: &RepoStatus, config: &RenderConfig, palette: &Palette) {
    let inner = config.width.saturating_sub(2);
    let mut frame = Frame::new(out, config.width, palette.frame);

    frame.edge(TOP_LEFT, TOP_RIGHT);

    let path = truncate_cell(&repo.path.display().to_string(), inner.saturating_sub(1));
    frame.row(&[Span::plain(" "), Span::styled(path, palette.path)]);

    frame.edge(TEE_RIGHT, TEE_LEFT);

    let mut spans = vec![
        Span::plain("  "),
        Span::styled("Branch:", palette.label),
        Span::plain(" "),
        Span::styled(
            repo.branch.clone().unwrap_or_else(|| "(unknown)".into()),
            palette.green,
        ),
    ];
    if let Some(upstream) = &repo.remote_branch {
        spans.push(Span::plain(" -> "));
        spans.push(Span::styled(upstream.clone(), palette.blue));
    }
    frame.row(&spans);

    let mut spans = vec![
        Span::plain("  "),
        Span::styled("Remote:", palette.label),
        Span::plain(" "),
    ];
    if repo.has_remote {
        let github = repo
            .remote_url
            .as_deref()
            .is_some_and(|url| url.contains("github.com"));
        if github {
            spans.push(Span::styled("GitHub", palette.blue));
        } else {
            spans.push(Span::styled("Remote configured", palette.green));
        }
        spans.push(Span::plain(" "));
        if repo.is_pushed {
            spans.push(Span::styled("(pushed)", palette.green));
        } else {
            spans.push(Span::styled("(not pushed)", palette.yellow));
        }
    } else {
        spans.push(Span::styled("No remote configured", palette.red));
    }
    frame.row(&spans);

    if repo.ahead > 0 || repo.behind > 0 {
        let mut spans = vec![Span::plain("  ")];
        if repo.ahead > 0 {
            spans.push(Span::styled(
                format!("↑ {} ahead", repo.ahead),
                palette.green,
            ));
        }
        if repo.ahead > 0 && repo.behind > 0 {
            spans.push(Span::plain("  "));
        }
        if repo.behind > 0 {
            spans.push(Span::styled(
                format!("↓ {} behind", repo.behind),
                palette.red,
            ));
        }
        frame.row(&spans);
    }

    let mut spans = vec![
        Span::plain("  "),
        Span::styled("Summary:", palette.label),
        Span::plain(" "),
    ];
    if repo.staged_count() > 0 {
        spans.push(Span::styled(
            format!("{} staged ", repo.staged_count()),
            palette.green,
        ));
    }
    if repo.unstaged_count() > 0 {
        spans.push(Span::styled(
            format!("{} modified ", repo.unstaged_count()),
            palette.yellow,
        ));
    }
    if repo.untracked_count() > 0 {
        spans.push(Span::styled(
            format!("{} untracked", repo.untracked_count()),
            palette.magenta,
        ));
    }
    frame.row(&spans);

    frame.edge(TEE_RIGHT, TEE_LEFT);

    frame.row(&[
        Span::plain("  "),
        Span::styled(
            format!("{}  {}", pad_cell("File", FILE_COL), pad_cell("Status", STATUS_COL)),
            palette.label,
        ),
    ]);

    for change in &repo.changes {
        let style = palette.for_change(change);
        frame.row(&[
            Span::plain("  "),
            Span::styled(pad_cell(&change.filename, FILE_COL), style),
            Span::plain("  "),
            Span::styled(pad_cell(status_label(change), STATUS_COL), style),
        ]);
    }

    frame.edge(BOTTOM_LEFT, BOTTOM_RIGHT);
    out.push('\n');
}

fn render_summary(out: &mut String, report: &ScanReport, config: &RenderConfig, palette: &Palette) {
    let mut frame = Frame::new(out, config.width, palette.frame);
    frame.edge(TOP_LEFT, TOP_RIGHT);
    frame.centered(&Span::plain(format!(
        "SUMMARY: {} repositories with uncommitted changes",
        report.repos.len()
    )));
    frame.edge(TEE_RIGHT, TEE_LEFT);
    frame.row(&[
        Span::plain("  "),
        Span::styled(report.total_staged().to_string(), palette.green),
        Span::plain(" staged  |  "),
        Span::styled(report.total_unstaged().to_string(), palette.yellow),
        Span::plain(" modified  |  "),
        Span::styled(report.total_untracked().to_string(), palette.magenta),
        Span::plain(" untracked"),
    ]);
    frame.edge(BOTTOM_LEFT, BOTTOM_RIGHT);
    out.push('\n');
}
