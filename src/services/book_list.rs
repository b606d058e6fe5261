//! Book List State
//!
//! The session's in-memory copy of the remote catalog. It is only ever
//! mutated through the named operations below, which keep ids unique.
//! Every operation is total: an id that matches nothing is a silent no-op.

use crate::models::{Book, BookId, Category};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookList {
    books: Vec<Book>,
}

impl BookList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wholesale replacement after a fetch. Duplicate ids keep their first
    /// occurrence.
    pub fn replace(&mut self, new_list: Vec<Book>) {
        let incoming = new_list.len();
        self.books.clear();
        for book in new_list {
            if self.position(book.id).is_none() {
                self.books.push(book);
            }
        }

        if self.books.len() != incoming {
            tracing::warn!(
                "Dropped {} books with duplicate ids",
                incoming - self.books.len()
            );
        }
    }

    /// Add one record after a create. An id already present is overwritten
    /// in place instead.
    pub fn append(&mut self, book: Book) {
        match self.position(book.id) {
            Some(idx) => self.books[idx] = book,
            None => self.books.push(book),
        }
    }

    /// Overwrite the record sharing `book.id`.
    pub fn replace_by_id(&mut self, book: Book) {
        let id = book.id;
        self.replace_entry(id, book);
    }

    /// Overwrite the record holding `id` with `book`, which may carry a new
    /// id. Any other record already holding `book.id` is dropped.
    pub fn replace_entry(&mut self, id: BookId, book: Book) {
        let Some(idx) = self.position(id) else {
            return;
        };

        let new_id = book.id;
        self.books[idx] = book;

        if new_id != id {
            // retain visits in order, so `i` tracks the original index
            let mut i = 0;
            self.books.retain(|b| {
                let keep = b.id != new_id || i == idx;
                i += 1;
                keep
            });
        }
    }

    /// Drop the record holding `id`.
    pub fn remove_by_id(&mut self, id: BookId) {
        self.books.retain(|b| b.id != id);
    }

    /// Distinct category values, first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for book in &self.books {
            if !out.contains(&book.category) {
                out.push(book.category.clone());
            }
        }
        out
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn ids(&self) -> Vec<BookId> {
        self.books.iter().map(|b| b.id).collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Isbn;

    fn book(id: BookId, title: &str, category: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "Author".to_string(),
            category: category.into(),
            isbn: Isbn::Text(format!("978{}", id)),
        }
    }

    fn list_of(ids: &[BookId]) -> BookList {
        let mut list = BookList::new();
        list.replace(ids.iter().map(|id| book(*id, "T", "Fiction")).collect());
        list
    }

    #[test]
    fn test_replace_keeps_fetch_order() {
        let list = list_of(&[9, 1, 7]);
        assert_eq!(list.ids(), vec![9, 1, 7]);
    }

    #[test]
    fn test_replace_collapses_duplicate_ids() {
        let mut list = BookList::new();
        list.replace(vec![book(1, "First", "A"), book(1, "Second", "B"), book(2, "Other", "A")]);

        assert_eq!(list.ids(), vec![1, 2]);
        assert_eq!(list.get(1).unwrap().title, "First");
    }

    #[test]
    fn test_append_adds_at_end() {
        let mut list = list_of(&[1, 7]);
        list.append(book(12, "New", "History"));
        assert_eq!(list.ids(), vec![1, 7, 12]);
    }

    #[test]
    fn test_append_existing_id_overwrites() {
        let mut list = list_of(&[1, 7]);
        list.append(book(1, "Changed", "History"));

        assert_eq!(list.ids(), vec![1, 7]);
        assert_eq!(list.get(1).unwrap().title, "Changed");
    }

    #[test]
    fn test_replace_by_id_leaves_others_untouched() {
        let mut list = list_of(&[1, 7, 9]);
        let before = list.clone();

        list.replace_by_id(book(7, "Updated", "Poetry"));

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(7).unwrap().title, "Updated");
        assert_eq!(list.get(1), before.get(1));
        assert_eq!(list.get(9), before.get(9));
    }

    #[test]
    fn test_replace_by_id_missing_is_noop() {
        let mut list = list_of(&[1, 7, 9]);
        let before = list.clone();
        list.replace_by_id(book(42, "Ghost", "Fiction"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_replace_entry_with_new_id_keeps_position() {
        let mut list = list_of(&[1, 7, 9]);
        list.replace_entry(7, book(15, "Reissued", "Fiction"));
        assert_eq!(list.ids(), vec![1, 15, 9]);
    }

    #[test]
    fn test_replace_entry_keeps_ids_unique() {
        let mut list = list_of(&[1, 7, 9]);
        list.replace_entry(7, book(9, "Merged", "Fiction"));

        assert_eq!(list.ids(), vec![1, 9]);
        assert_eq!(list.get(9).unwrap().title, "Merged");

        let mut list = list_of(&[1, 7, 9]);
        list.replace_entry(9, book(1, "Moved", "Fiction"));

        assert_eq!(list.ids(), vec![7, 1]);
        assert_eq!(list.get(1).unwrap().title, "Moved");
    }

    #[test]
    fn test_remove_by_id() {
        let mut list = list_of(&[1, 7, 9]);
        list.remove_by_id(7);
        assert_eq!(list.ids(), vec![1, 9]);

        list.remove_by_id(7);
        assert_eq!(list.ids(), vec![1, 9]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let mut list = BookList::new();
        list.replace(vec![
            book(1, "A", "Fiction"),
            book(2, "B", "History"),
            book(3, "C", "Fiction"),
        ]);

        assert_eq!(
            list.categories(),
            vec![Category::from("Fiction"), Category::from("History")]
        );
    }
}
