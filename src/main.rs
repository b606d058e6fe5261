use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_catalog::app::{App, AppEvent, Screen};
use book_catalog::book_repository::HttpBookRepository;
use book_catalog::config::Config;
use book_catalog::domain::FormError;
use book_catalog::models::BookId;
use book_catalog::ui;

#[derive(Parser, Debug)]
#[command(name = "book-catalog", version, about = "Manage a remote book catalog")]
struct Cli {
    /// Base URL of the books API (overrides BOOK_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds, 0 for none (overrides BOOK_API_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

enum Input {
    Line(Option<String>),
    Event(Option<AppEvent>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the screens
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if cli.api_url.is_some() || cli.timeout_secs.is_some() {
        let api_url = cli.api_url.unwrap_or(config.api_url.clone());
        let timeout = cli
            .timeout_secs
            .or(config.request_timeout.map(|t| t.as_secs()));
        config = Config::new(&api_url, timeout).context("invalid command-line arguments")?;
    }

    tracing::info!(api = %config.api_url, timeout = ?config.request_timeout, "Starting book catalog");

    let repo = HttpBookRepository::new(config).context("failed to build HTTP client")?;
    let mut app = App::new(Arc::new(repo));
    app.mount();
    render(&mut app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line.context("failed to read stdin")?),
            event = app.next_event() => Input::Event(event),
        };

        match input {
            Input::Line(None) => break,
            Input::Line(Some(line)) => {
                if !handle_command(&mut app, line.trim()) {
                    break;
                }
            }
            Input::Event(Some(event)) => app.apply(event),
            Input::Event(None) => break,
        }
        render(&mut app);
    }

    app.shutdown();
    Ok(())
}

/// Returns false when the user asked to quit.
fn handle_command(app: &mut App, line: &str) -> bool {
    let (cmd, arg) = match line.split_once(' ') {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    match (app.screen(), cmd) {
        (_, "quit" | "exit") => return false,
        (_, "") => {}

        (Screen::Dashboard, "list") => {}
        (Screen::Dashboard, "refresh") => app.refresh(),
        (Screen::Dashboard, "add") => app.add(),
        (Screen::Dashboard, "edit") => match arg.parse::<BookId>() {
            Ok(id) if app.edit(id) => {}
            _ => println!("No book with id '{}'", arg),
        },
        (Screen::Dashboard, "delete") => match arg.parse::<BookId>() {
            Ok(id) if app.books().get(id).is_some() => {
                app.delete(id);
            }
            _ => println!("No book with id '{}'", arg),
        },

        (Screen::Form, "title") => app.form_mut().set_title(arg),
        (Screen::Form, "author") => app.form_mut().set_author(arg),
        (Screen::Form, "isbn") => app.form_mut().set_isbn(arg),
        (Screen::Form, "category") => {
            if let Err(FormError::UnknownCategory(category)) = app.set_category(arg) {
                println!("'{}' is not one of the existing categories", category);
            }
        }
        (Screen::Form, "submit") => {
            // Missing fields are flagged on the form itself
            let _ = app.submit_form();
        }
        (Screen::Form, "back") => app.back_to_dashboard(),

        (Screen::Dashboard, _) => {
            println!("Commands: list, add, edit <id>, delete <id>, refresh, quit")
        }
        (Screen::Form, _) => println!(
            "Commands: title <text>, author <text>, category <value>, isbn <digits>, submit, back, quit"
        ),
    }
    true
}

fn render(app: &mut App) {
    match app.screen() {
        Screen::Dashboard => {
            let notices = app.take_notices();
            print!("{}", ui::render_dashboard(&app.dashboard(), &notices));
        }
        Screen::Form => {
            let options = app.category_options();
            print!("{}", ui::render_form(app.form(), &options));
        }
    }
}
