//! Form Workflow
//!
//! Collects and validates the four fields of one book. The form knows
//! nothing about the network: a successful [`BookForm::submit`] hands back a
//! [`Submission`] and the caller decides how to send and reconcile it.

use crate::domain::{FormError, FormField};
use crate::models::{Book, BookId, Category, CreateBookFragment, Isbn};
use crate::services::book_list::BookList;

/// Which record a submission targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Book),
}

/// How the server's answer must be folded back into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Append,
    Replace(BookId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub fragment: CreateBookFragment,
    pub target: SubmitTarget,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MissingFlags {
    title: bool,
    author: bool,
    category: bool,
    isbn: bool,
}

impl MissingFlags {
    fn get(&self, field: FormField) -> bool {
        match field {
            FormField::Title => self.title,
            FormField::Author => self.author,
            FormField::Category => self.category,
            FormField::Isbn => self.isbn,
        }
    }

    fn set(&mut self, field: FormField, value: bool) {
        match field {
            FormField::Title => self.title = value,
            FormField::Author => self.author = value,
            FormField::Category => self.category = value,
            FormField::Isbn => self.isbn = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookForm {
    mode: FormMode,
    title: Option<String>,
    author: Option<String>,
    category: Option<Category>,
    isbn: Option<String>,
    missing: MissingFlags,
}

impl Default for BookForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BookForm {
    /// Empty form in Create mode.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            title: None,
            author: None,
            category: None,
            isbn: None,
            missing: MissingFlags::default(),
        }
    }

    /// Edit mode, pre-populated from the selected book.
    pub fn edit(book: &Book) -> Self {
        Self {
            mode: FormMode::Edit(book.clone()),
            title: non_empty(&book.title),
            author: non_empty(&book.author),
            category: Some(book.category.clone()),
            isbn: non_empty(&book.isbn.to_string()),
            missing: MissingFlags::default(),
        }
    }

    pub fn for_selection(selected: Option<&Book>) -> Self {
        match selected {
            Some(book) => Self::edit(book),
            None => Self::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    pub fn set_title(&mut self, value: &str) {
        self.missing.title = false;
        self.title = non_empty(value);
    }

    pub fn set_author(&mut self, value: &str) {
        self.missing.author = false;
        self.author = non_empty(value);
    }

    /// Choose a category. Only values offered by the selector are accepted,
    /// plus the edited book's own category.
    pub fn set_category(&mut self, value: Category, options: &[Category]) -> Result<(), FormError> {
        let own = match &self.mode {
            FormMode::Edit(book) => book.category == value,
            FormMode::Create => false,
        };
        if !own && !options.contains(&value) {
            return Err(FormError::UnknownCategory(value));
        }

        self.missing.category = false;
        self.category = Some(value);
        Ok(())
    }

    /// Choose a category by its displayed label, so numeric categories can
    /// be picked from text input.
    pub fn set_category_label(&mut self, label: &str, options: &[Category]) -> Result<(), FormError> {
        let label = label.trim();
        let found = options
            .iter()
            .find(|c| c.to_string() == label)
            .cloned()
            .unwrap_or_else(|| Category::from(label));
        self.set_category(found, options)
    }

    /// Replace the ISBN with typed input; anything but ASCII digits is
    /// dropped.
    pub fn set_isbn(&mut self, value: &str) {
        self.missing.isbn = false;
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
        self.isbn = non_empty(&digits);
    }

    /// Keystroke filter of the ISBN input. Returns whether the key was taken.
    pub fn push_isbn_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.missing.isbn = false;
        self.isbn.get_or_insert_with(String::new).push(c);
        true
    }

    /// Distinct categories of the current list, first-seen order. In Edit
    /// mode the edited book's category is always offered.
    pub fn category_options(&self, books: &BookList) -> Vec<Category> {
        let mut options = books.categories();
        if let FormMode::Edit(book) = &self.mode
            && !options.contains(&book.category)
        {
            options.push(book.category.clone());
        }
        options
    }

    pub fn is_missing(&self, field: FormField) -> bool {
        self.missing.get(field)
    }

    /// Fields currently flagged as missing.
    pub fn flagged_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.missing.get(*f))
            .collect()
    }

    fn unset_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| match f {
                FormField::Title => self.title.is_none(),
                FormField::Author => self.author.is_none(),
                FormField::Category => self.category.is_none(),
                FormField::Isbn => self.isbn.is_none(),
            })
            .collect()
    }

    /// Submit-valid iff every field is set.
    pub fn validate(&self) -> bool {
        self.unset_fields().is_empty()
    }

    /// Attempt a submission. Every unset field gets flagged, not just the
    /// first one.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let unset = self.unset_fields();
        for field in &unset {
            self.missing.set(*field, true);
        }

        let (Some(title), Some(author), Some(category), Some(isbn)) = (
            self.title.clone(),
            self.author.clone(),
            self.category.clone(),
            self.isbn.clone(),
        ) else {
            tracing::debug!(missing = ?unset, "Form submission rejected");
            return Err(FormError::Incomplete(unset));
        };

        let (target, isbn) = match &self.mode {
            FormMode::Create => (SubmitTarget::Append, Isbn::Text(isbn)),
            // An untouched ISBN goes back exactly as stored
            FormMode::Edit(book) if book.isbn.to_string() == isbn => {
                (SubmitTarget::Replace(book.id), book.isbn.clone())
            }
            FormMode::Edit(book) => (SubmitTarget::Replace(book.id), Isbn::Text(isbn)),
        };

        Ok(Submission {
            fragment: CreateBookFragment {
                title,
                author,
                category,
                isbn,
            },
            target,
        })
    }

    /// Back to an empty Create form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_pristine(&self) -> bool {
        *self == Self::new()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
