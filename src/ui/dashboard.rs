//! List/Table View

use crate::app::Notice;
use crate::models::{Book, BookId};
use crate::services::BookList;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const ERROR_MESSAGE: &str = "Loading error";
pub const EMPTY_MESSAGE: &str = "There are no books in list";

const HEADERS: [&str; 5] = ["ID", "Book title", "Author Name", "Category", "ISBN"];

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub isbn: String,
}

impl From<&Book> for Row {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.to_string(),
            isbn: book.isbn.to_string(),
        }
    }
}

impl Row {
    fn cells(&self) -> [String; 5] {
        [
            self.id.to_string(),
            self.title.clone(),
            self.author.clone(),
            self.category.clone(),
            self.isbn.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Loading,
    Error(&'static str),
    Empty(&'static str),
    Table(Vec<Row>),
}

/// Loading wins over error, error over empty, empty over the table.
pub fn dashboard_view(books: &BookList, is_loading: bool, has_error: bool) -> DashboardView {
    if is_loading {
        DashboardView::Loading
    } else if has_error {
        DashboardView::Error(ERROR_MESSAGE)
    } else if books.is_empty() {
        DashboardView::Empty(EMPTY_MESSAGE)
    } else {
        DashboardView::Table(books.books().iter().map(Row::from).collect())
    }
}

pub fn render_dashboard(view: &DashboardView, notices: &[Notice]) -> String {
    let mut out = String::from("Dashboard\n");
    for notice in notices {
        out.push_str(&format!("! {}\n", notice));
    }

    match view {
        DashboardView::Loading => out.push_str(LOADING_MESSAGE),
        DashboardView::Error(msg) | DashboardView::Empty(msg) => out.push_str(msg),
        DashboardView::Table(rows) => out.push_str(&render_table(rows)),
    }
    out.push('\n');
    out
}

fn render_table(rows: &[Row]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (i, cell) in row.cells().iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(&HEADERS.map(String::from)));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(line(&row.cells()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Isbn;

    fn list(n: i64) -> BookList {
        let mut list = BookList::new();
        list.replace(
            (1..=n)
                .map(|id| Book {
                    id,
                    title: format!("Book {}", id),
                    author: "Someone".to_string(),
                    category: "Fiction".into(),
                    isbn: Isbn::Number((9_780_000_000_000 + id as u64).into()),
                })
                .collect(),
        );
        list
    }

    #[test]
    fn test_precedence() {
        let books = list(2);
        assert_eq!(dashboard_view(&books, true, true), DashboardView::Loading);
        assert_eq!(
            dashboard_view(&books, false, true),
            DashboardView::Error(ERROR_MESSAGE)
        );
        assert_eq!(
            dashboard_view(&BookList::new(), false, false),
            DashboardView::Empty(EMPTY_MESSAGE)
        );
    }

    #[test]
    fn test_table_has_one_row_per_book_in_order() {
        let DashboardView::Table(rows) = dashboard_view(&list(3), false, false) else {
            panic!("Expected table");
        };

        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[2].isbn, "9780000000003");
    }

    #[test]
    fn test_render_shows_notices_and_rows() {
        let view = dashboard_view(&list(2), false, false);
        let text = render_dashboard(&view, &[Notice::DeleteFailed { id: 2 }]);

        assert!(text.contains("Could not delete book #2"));
        assert!(text.contains("Book title"));
        assert!(text.contains("Book 1"));
        assert!(text.contains("Book 2"));
        // header + rule + 2 rows + title + notice
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_render_error_hides_table() {
        let text = render_dashboard(&DashboardView::Error(ERROR_MESSAGE), &[]);
        assert!(text.contains("Loading error"));
        assert!(!text.contains("Book title"));
    }
}
