//! Absolute-position page layout with automatic page breaks.
//!
//! Coordinates are points from the top-left corner of an A4 page.

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 40.0;
pub const LINE_HEIGHT: f32 = 14.0;
pub const BODY_SIZE: f32 = 9.0;
pub const FOOTER_SIZE: f32 = 8.0;

/// Reserved strip at the bottom of every page for the page number.
const FOOTER_SPACE: f32 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub items: Vec<TextItem>,
}

impl Page {
    pub fn contains_text(&self, needle: &str) -> bool {
        self.items.iter().any(|i| i.text.contains(needle))
    }
}

/// A table column: fixed x offset and a character budget for its cells.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub title: &'static str,
    pub x: f32,
    pub width: usize,
}

/// Cut `value` to at most `width` characters.
pub fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

#[derive(Debug)]
pub struct PageLayout {
    pages: Vec<Page>,
    cursor: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: MARGIN,
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Vertical space left above the footer strip.
    pub fn remaining(&self) -> f32 {
        PAGE_HEIGHT - MARGIN - FOOTER_SPACE - self.cursor
    }

    /// Place text on the current line without moving the cursor.
    pub fn text_at(&mut self, x: f32, size: f32, bold: bool, text: impl Into<String>) {
        let y = self.cursor;
        if let Some(page) = self.pages.last_mut() {
            page.items.push(TextItem {
                x,
                y,
                size,
                bold,
                text: text.into(),
            });
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Single line of text at the left margin, then move down.
    pub fn line(&mut self, size: f32, bold: bool, text: impl Into<String>) {
        self.ensure_space(size + 4.0, None);
        self.text_at(MARGIN, size, bold, text);
        self.advance(size + 4.0);
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = MARGIN;
    }

    /// Start a new page when fewer than `needed` points remain. When a
    /// `header` is given it is repeated at the top of the new page. Returns
    /// whether a break happened.
    pub fn ensure_space(&mut self, needed: f32, header: Option<&[Column]>) -> bool {
        if self.remaining() >= needed {
            return false;
        }
        self.new_page();
        if let Some(columns) = header {
            self.header_row(columns);
        }
        true
    }

    pub fn header_row(&mut self, columns: &[Column]) {
        for column in columns {
            self.text_at(column.x, BODY_SIZE, true, column.title);
        }
        self.advance(LINE_HEIGHT);
    }

    /// One table row; each cell is cut to its column's width.
    pub fn row(&mut self, columns: &[Column], cells: &[String]) {
        self.ensure_space(LINE_HEIGHT, Some(columns));
        for (column, cell) in columns.iter().zip(cells) {
            self.text_at(column.x, BODY_SIZE, false, truncate(cell, column.width));
        }
        self.advance(LINE_HEIGHT);
    }

    /// A whole table: header, then rows, breaking pages as needed.
    pub fn table(&mut self, columns: &[Column], rows: &[Vec<String>]) {
        self.ensure_space(LINE_HEIGHT * 2.0, None);
        self.header_row(columns);
        for cells in rows {
            self.row(columns, cells);
        }
    }

    /// Stamp "Page i of n" on every page and hand the pages over. Runs
    /// after all content is placed so the total is known.
    pub fn finish(mut self) -> Vec<Page> {
        let total = self.pages.len();
        for (idx, page) in self.pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", idx + 1, total);
            page.items.push(TextItem {
                x: PAGE_WIDTH / 2.0 - 20.0,
                y: PAGE_HEIGHT - MARGIN / 2.0 - FOOTER_SIZE,
                size: FOOTER_SIZE,
                bold: false,
                text: label,
            });
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [Column; 2] = [
        Column { title: "Name", x: MARGIN, width: 5 },
        Column { title: "Amount", x: 300.0, width: 10 },
    ];

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate("Abdullah Rahman", 5), "Abdul");
        assert_eq!(truncate("Zoë", 10), "Zoë");
    }

    #[test]
    fn long_tables_break_and_repeat_header() {
        let mut layout = PageLayout::new();
        let rows: Vec<Vec<String>> = (0..120)
            .map(|i| vec![format!("Person {i}"), format!("{i}.00")])
            .collect();
        layout.table(&COLUMNS, &rows);

        let pages = layout.finish();
        assert!(pages.len() > 1);
        for page in &pages {
            let headers = page.items.iter().filter(|i| i.bold && i.text == "Name").count();
            assert_eq!(headers, 1);
            assert!(page
                .items
                .iter()
                .all(|i| i.y <= PAGE_HEIGHT - MARGIN / 2.0));
        }
    }

    #[test]
    fn footer_counts_all_pages() {
        let mut layout = PageLayout::new();
        layout.line(12.0, true, "Title");
        layout.new_page();
        layout.line(12.0, false, "Second");

        let pages = layout.finish();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains_text("Page 1 of 2"));
        assert!(pages[1].contains_text("Page 2 of 2"));
    }

    #[test]
    fn cells_are_cut_to_column_width() {
        let mut layout = PageLayout::new();
        layout.row(&COLUMNS, &["Abdullah Rahman".to_string(), "12.00".to_string()]);
        let pages = layout.finish();
        assert!(pages[0].contains_text("Abdul"));
        assert!(!pages[0].contains_text("Abdullah"));
    }
}
