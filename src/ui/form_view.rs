use crate::domain::FormField;
use crate::models::Category;
use crate::services::BookForm;

fn label(field: FormField) -> &'static str {
    match field {
        FormField::Title => "Book title",
        FormField::Author => "Author name",
        FormField::Category => "Book category",
        FormField::Isbn => "ISBN",
    }
}

pub fn render_form(form: &BookForm, options: &[Category]) -> String {
    let heading = if form.is_edit() {
        "Edit book form"
    } else {
        "Add new book form"
    };
    let mut out = format!("{}\n", heading);

    for field in FormField::ALL {
        let value = match field {
            FormField::Title => form.title().map(str::to_string),
            FormField::Author => form.author().map(str::to_string),
            FormField::Category => form.category().map(|c| c.to_string()),
            FormField::Isbn => form.isbn().map(str::to_string),
        };
        let placeholder = match field {
            FormField::Category => "<choose a category>",
            FormField::Isbn => "<enter a number>",
            _ => "<empty>",
        };
        out.push_str(&format!(
            "  {:<14} {}\n",
            format!("{}:", label(field)),
            value.as_deref().unwrap_or(placeholder)
        ));
        if form.is_missing(field) {
            out.push_str(&format!("    {}\n", field.missing_message()));
        }
    }

    let options = options
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("  categories: {}\n", options));
    out
}
