//! Terminal presentation. Everything here is a pure function of state.

pub mod dashboard;
pub mod form_view;

pub use dashboard::{DashboardView, Row, render_dashboard};
pub use form_view::render_form;
