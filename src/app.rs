//! Root controller.
//!
//! `App` owns the book list, the selection, the current screen, the form and
//! every in-flight request. Network calls run as spawned tasks and report
//! back as [`AppEvent`]s; state only changes inside [`App::apply`], one event
//! at a time, so nothing here needs a lock.

use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::domain::{BookRepository, FormError, RequestError};
use crate::infrastructure::{RequestId, Tasks};
use crate::models::{Book, BookId, Category};
use crate::services::{BookForm, BookList, SubmitTarget};
use crate::ui::dashboard::{self, DashboardView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Form,
}

/// Completion of a spawned request.
#[derive(Debug)]
pub enum AppEvent {
    Loaded {
        request: RequestId,
        result: Result<Vec<Book>, RequestError>,
    },
    Saved {
        request: RequestId,
        target: SubmitTarget,
        title: String,
        result: Result<Book, RequestError>,
    },
    Deleted {
        request: RequestId,
        id: BookId,
        result: Result<(), RequestError>,
    },
}

impl AppEvent {
    pub fn request(&self) -> RequestId {
        match self {
            AppEvent::Loaded { request, .. }
            | AppEvent::Saved { request, .. }
            | AppEvent::Deleted { request, .. } => *request,
        }
    }
}

/// User-visible banner for a failed save or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SaveFailed { title: String },
    DeleteFailed { id: BookId },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::SaveFailed { title } => write!(f, "Could not save \"{}\"", title),
            Notice::DeleteFailed { id } => write!(f, "Could not delete book #{}", id),
        }
    }
}

pub struct App {
    repo: Arc<dyn BookRepository>,
    books: BookList,
    selected: Option<Book>,
    screen: Screen,
    form: BookForm,
    is_loading: bool,
    has_error: bool,
    notices: Vec<Notice>,
    tasks: Tasks,
    load_request: Option<RequestId>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            repo,
            books: BookList::new(),
            selected: None,
            screen: Screen::Dashboard,
            form: BookForm::new(),
            is_loading: false,
            has_error: false,
            notices: Vec::new(),
            tasks: Tasks::new(),
            load_request: None,
            events_tx,
            events_rx,
        }
    }

    /// Start the initial list fetch.
    pub fn mount(&mut self) {
        self.refresh();
    }

    /// Refetch the whole list. A fetch still in flight is superseded.
    pub fn refresh(&mut self) {
        if let Some(previous) = self.load_request.take() {
            self.tasks.abort(previous);
        }

        self.is_loading = true;
        self.has_error = false;

        let repo = self.repo.clone();
        let tx = self.events_tx.clone();
        let request = self.tasks.spawn(move |request| async move {
            let result = repo.list().await;
            let _ = tx.send(AppEvent::Loaded { request, result });
        });
        self.load_request = Some(request);
        tracing::debug!(?request, "List fetch started");
    }

    /// Open an empty form in Create mode.
    pub fn add(&mut self) {
        self.selected = None;
        self.open_form();
    }

    /// Select a book and open the form in Edit mode. Returns false when the
    /// id is not in the list.
    pub fn edit(&mut self, id: BookId) -> bool {
        let Some(book) = self.books.get(id).cloned() else {
            return false;
        };
        self.selected = Some(book);
        self.open_form();
        true
    }

    /// Route to the form, pre-populated from the selection if any.
    pub fn open_form(&mut self) {
        self.form = BookForm::for_selection(self.selected.as_ref());
        self.screen = Screen::Form;
    }

    /// "Go to table" without submitting. The selection is kept.
    pub fn back_to_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
    }

    pub fn category_options(&self) -> Vec<Category> {
        self.form.category_options(&self.books)
    }

    pub fn set_category(&mut self, label: &str) -> Result<(), FormError> {
        let options = self.category_options();
        self.form.set_category_label(label, &options)
    }

    /// Validate the form and, if valid, send it and return to the dashboard
    /// right away. The list is reconciled when the save completes.
    pub fn submit_form(&mut self) -> Result<RequestId, FormError> {
        let submission = self.form.submit()?;
        let target = submission.target;
        let fragment = submission.fragment;
        let title = fragment.title.clone();

        let repo = self.repo.clone();
        let tx = self.events_tx.clone();
        let request = self.tasks.spawn(move |request| async move {
            let result = repo.create_or_update(fragment).await;
            let _ = tx.send(AppEvent::Saved {
                request,
                target,
                title,
                result,
            });
        });

        tracing::debug!(?request, ?target, "Book submission started");
        self.screen = Screen::Dashboard;
        Ok(request)
    }

    /// Delete a row. It disappears only once the server confirms.
    pub fn delete(&mut self, id: BookId) -> RequestId {
        let repo = self.repo.clone();
        let tx = self.events_tx.clone();
        let request = self.tasks.spawn(move |request| async move {
            let result = repo.delete(id).await.map(|_| ());
            let _ = tx.send(AppEvent::Deleted {
                request,
                id,
                result,
            });
        });
        tracing::debug!(?request, id, "Book deletion started");
        request
    }

    /// Wait for the next completed request.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    /// Fold a completed request into state. Events from aborted or
    /// superseded requests are dropped.
    pub fn apply(&mut self, event: AppEvent) {
        let request = event.request();
        if !self.tasks.finish(request) {
            tracing::debug!(?request, "Discarding result of cancelled request");
            return;
        }

        match event {
            AppEvent::Loaded { result, .. } => {
                self.load_request = None;
                self.is_loading = false;
                match result {
                    Ok(books) => {
                        tracing::info!("Loaded {} books", books.len());
                        self.books.replace(books);
                    }
                    Err(_) => {
                        tracing::warn!("Failed to load books");
                        self.has_error = true;
                    }
                }
            }
            AppEvent::Saved {
                target,
                title,
                result,
                ..
            } => match result {
                Ok(book) => {
                    tracing::info!(id = book.id, ?target, "Book saved");
                    match target {
                        SubmitTarget::Append => self.books.append(book),
                        SubmitTarget::Replace(id) => self.books.replace_entry(id, book),
                    }

                    let selection_saved = match (target, &self.selected) {
                        (SubmitTarget::Replace(id), Some(selected)) => selected.id == id,
                        (SubmitTarget::Append, None) => true,
                        _ => false,
                    };
                    // Don't wipe a form the user has reopened since.
                    if selection_saved && self.screen == Screen::Dashboard {
                        self.form.reset();
                        self.selected = None;
                    }
                }
                Err(_) => {
                    tracing::warn!(?target, "Failed to save book");
                    self.notices.push(Notice::SaveFailed { title });
                }
            },
            AppEvent::Deleted { id, result, .. } => match result {
                Ok(()) => {
                    tracing::info!(id, "Book deleted");
                    self.books.remove_by_id(id);
                    if self.selected.as_ref().is_some_and(|b| b.id == id) {
                        self.selected = None;
                    }
                }
                Err(_) => {
                    tracing::warn!(id, "Failed to delete book");
                    self.notices.push(Notice::DeleteFailed { id });
                }
            },
        }
    }

    /// Wait for one event and apply it. Returns false if nothing is in
    /// flight.
    pub async fn process_next(&mut self) -> bool {
        if self.tasks.in_flight() == 0 {
            return false;
        }
        match self.next_event().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Apply events until no request is in flight.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    /// Abort everything in flight and drop any queued results.
    pub fn shutdown(&mut self) {
        self.tasks.abort_all();
        self.load_request = None;
        self.is_loading = false;
        while self.events_rx.try_recv().is_ok() {}
    }

    pub fn dashboard(&self) -> DashboardView {
        dashboard::dashboard_view(&self.books, self.is_loading, self.has_error)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn books(&self) -> &BookList {
        &self.books
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.in_flight()
    }
}
