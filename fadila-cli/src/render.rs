//! Plain-text rendering of table views.

use std::fmt::Write as _;

use crossterm::style::Stylize;
use fadila_lib::Language;
use fadila_lib::Text;
use fadila_ui::toast::ToastLevel;
use fadila_ui::widgets::Alignment;
use fadila_ui::widgets::Column;
use fadila_ui::widgets::ColumnGroup;
use fadila_ui::widgets::SimpleView;
use fadila_ui::widgets::SortDirection;
use fadila_ui::widgets::TableBody;
use fadila_ui::widgets::TableView;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Pixels per terminal cell when converting column widths.
const PX_PER_CELL: u32 = 10;
const MIN_CELLS: usize = 4;
const MAX_CELLS: usize = 40;

pub fn cells_for(width_px: u32) -> usize {
    ((width_px / PX_PER_CELL) as usize).clamp(MIN_CELLS, MAX_CELLS)
}

pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let target = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

pub fn pad(s: &str, width: usize, align: Alignment) -> String {
    let text = truncate(s, width);
    let gap = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{text}{}", " ".repeat(gap)),
        Alignment::Right => format!("{}{text}", " ".repeat(gap)),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub lang: Language,
    pub color: bool,
}

impl Renderer {
    pub fn new(lang: Language, color: bool) -> Self {
        Self { lang, color }
    }

    fn bold(&self, s: String) -> String {
        if self.color { s.bold().to_string() } else { s }
    }

    fn dim(&self, s: String) -> String {
        if self.color { s.dim().to_string() } else { s }
    }

    fn line(&self, cells: Vec<String>) -> String {
        let mut cells = cells;
        if self.lang.is_rtl() {
            cells.reverse();
        }
        cells.join(" │ ")
    }

    /// Render a DataTable view under a title.
    pub fn table(&self, title: &str, view: &TableView) -> String {
        let mut out = self.bold(title.to_string());
        out.push('\n');
        let text = |t| self.lang.text(t);
        match view {
            TableView::Loading => out.push_str(text(Text::Loading)),
            TableView::Error { message } => {
                let _ = write!(out, "{}: {message}\n[{}] → `retry`", text(Text::LoadFailed), text(Text::Retry));
            }
            TableView::NoVisibleColumns { can_reset } => {
                out.push_str(text(Text::NoVisibleColumns));
                if *can_reset {
                    let _ = write!(out, "\n[{}] → `reset`", text(Text::ResetColumns));
                }
            }
            TableView::Empty { total } => {
                out.push_str(text(if *total == 0 { Text::NoData } else { Text::NoResults }));
                let _ = write!(out, "\n{}", self.lang.shown_of(0, *total));
            }
            TableView::Rows(body) => self.body(&mut out, body),
        }
        out
    }

    fn body(&self, out: &mut String, body: &TableBody) {
        let widths: Vec<usize> = body.headers.iter().map(|h| cells_for(h.width)).collect();

        let mut header: Vec<String> = Vec::new();
        if body.selectable {
            header.push(checkbox(body.all_selected).to_string());
        }
        for (h, width) in body.headers.iter().zip(&widths) {
            let marker = match h.sort {
                Some(SortDirection::Ascending) => " ▲",
                Some(SortDirection::Descending) => " ▼",
                None => "",
            };
            let label = pad(&format!("{}{marker}", h.label), *width, h.align);
            header.push(self.bold(label));
        }
        out.push_str(&self.line(header));
        out.push('\n');

        let rule: Vec<String> = body
            .selectable
            .then(|| "─".repeat(3))
            .into_iter()
            .chain(widths.iter().map(|w| "─".repeat(*w)))
            .collect();
        out.push_str(&rule.join("─┼─"));
        out.push('\n');

        for row in &body.rows {
            let mut cells = Vec::with_capacity(row.cells.len() + 1);
            if body.selectable {
                cells.push(checkbox(row.selected).to_string());
            }
            for ((cell, h), width) in row.cells.iter().zip(&body.headers).zip(&widths) {
                cells.push(pad(cell, *width, h.align));
            }
            let line = self.line(cells);
            out.push_str(&if row.striped { self.dim(line) } else { line });
            out.push('\n');
        }
        out.push_str(&self.lang.shown_of(body.shown, body.total));
    }

    pub fn simple(&self, title: &str, view: &SimpleView) -> String {
        let mut out = self.bold(title.to_string());
        out.push('\n');
        let (headers, rows): (&[(String, Alignment)], Vec<Vec<String>>) = match view {
            SimpleView::Rows { headers, rows } => (headers.as_slice(), rows.clone()),
            SimpleView::Empty { headers, message } => {
                let header: Vec<String> = headers.iter().map(|(h, _)| h.clone()).collect();
                out.push_str(&self.line(header));
                let _ = write!(out, "\n{message}");
                return out;
            }
        };

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, (h, _))| {
                rows.iter()
                    .map(|r| r.get(i).map_or(0, |c| c.width()))
                    .chain([h.width()])
                    .max()
                    .unwrap_or(0)
                    .min(MAX_CELLS)
            })
            .collect();

        let header = headers
            .iter()
            .zip(&widths)
            .map(|((h, align), w)| self.bold(pad(h, *w, *align)))
            .collect();
        out.push_str(&self.line(header));
        for row in &rows {
            let cells = row
                .iter()
                .zip(headers)
                .zip(&widths)
                .map(|((cell, (_, align)), w)| pad(cell, *w, *align))
                .collect();
            out.push('\n');
            out.push_str(&self.line(cells));
        }
        out
    }

    /// Active column list: position, key, visibility, width.
    pub fn columns(&self, columns: &[Column], removable: impl Fn(&str) -> bool) -> String {
        columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    "{:>2}. {} {:<16} {:<24} {}px{}",
                    i + 1,
                    if c.visible { "●" } else { "○" },
                    c.key,
                    truncate(&c.label, 24),
                    c.width,
                    if removable(&c.key) { "  (removable)" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn pool(&self, groups: &[ColumnGroup]) -> String {
        let mut out = self.bold(self.lang.text(Text::AddColumn).to_string());
        for group in groups {
            let _ = write!(out, "\n{}", group.category);
            for c in &group.columns {
                let _ = write!(out, "\n  {:<16} {}", c.key, c.label);
            }
        }
        out
    }

    pub fn toast(&self, level: ToastLevel, message: &str) -> String {
        let text = format!("» {message}");
        if !self.color {
            return text;
        }
        match level {
            ToastLevel::Info => text.blue().to_string(),
            ToastLevel::Success => text.green().to_string(),
            ToastLevel::Warning => text.yellow().to_string(),
            ToastLevel::Error => text.red().to_string(),
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}
