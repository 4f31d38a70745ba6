//! Pure state-to-view mapping for the record list and the record form.
//!
//! Nothing here mutates the store. Views are plain values with a byte-stable
//! `to_html` rendering; a host mounts them wherever it likes.

use roster_config::{FormConfig, FormFieldConfig};
use roster_protocol::{FIELD_NAME, FormSnapshot, Record, RecordId, ValidationErrors};
use std::fmt;

/// One rendered line in the record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: Option<RecordId>,
    pub label: String,
}

impl ListItem {
    pub fn to_html(&self) -> String {
        format!("<li>{}</li>", escape_html(&self.label))
    }
}

/// Ordered list items, one per record, in collection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListView {
    items: Vec<ListItem>,
}

impl ListView {
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert the item for a freshly created record at the front.
    ///
    /// Equivalent to a full redraw after the store prepends that record.
    pub fn prepend(&mut self, item: ListItem) {
        self.items.insert(0, item);
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<ul>")?;
        for item in &self.items {
            writeln!(f, "  {}", item.to_html())?;
        }
        writeln!(f, "</ul>")
    }
}

/// A single bound input within a [`FormView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub name: String,
    pub label: String,
    pub value: String,
    pub error: Option<String>,
}

/// The record form bound to values and inline error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    fields: Vec<FormFieldView>,
    submit_label: String,
}

impl FormView {
    pub fn fields(&self) -> &[FormFieldView] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormFieldView> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Whether any field carries an error message.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|field| field.error.is_some())
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<form>")?;
        for field in &self.fields {
            writeln!(f, "  <div>")?;
            writeln!(f, "    <label>{}</label>", escape_html(&field.label))?;
            writeln!(
                f,
                "    <input name=\"{}\" value=\"{}\">",
                escape_html(&field.name),
                escape_html(&field.value)
            )?;
            if let Some(error) = &field.error {
                writeln!(f, "    <span class=\"error\">{}</span>", escape_html(error))?;
            }
            writeln!(f, "  </div>")?;
        }
        writeln!(
            f,
            "  <input type=\"submit\" value=\"{}\">",
            escape_html(&self.submit_label)
        )?;
        writeln!(f, "</form>")
    }
}

/// Maps records and form state to views.
#[derive(Debug, Clone)]
pub struct ViewRenderer {
    fields: Vec<FormFieldConfig>,
    submit_label: String,
}

impl ViewRenderer {
    pub fn new(fields: Vec<FormFieldConfig>, submit_label: impl Into<String>) -> Self {
        Self {
            fields,
            submit_label: submit_label.into(),
        }
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.fields.clone(), config.submit_label.clone())
    }

    /// Full redraw of the list from the collection.
    pub fn list_view(&self, records: &[Record]) -> ListView {
        ListView {
            items: records.iter().map(|record| self.list_item(record)).collect(),
        }
    }

    /// Item for a single record, labelled with its name.
    pub fn list_item(&self, record: &Record) -> ListItem {
        ListItem {
            id: record.id.clone(),
            label: record.field(FIELD_NAME).unwrap_or_default().to_string(),
        }
    }

    /// Bind `values` to the configured inputs and attach each field's error.
    ///
    /// Missing values bind as empty strings; fields without an error render
    /// no message.
    pub fn form_view(&self, values: &FormSnapshot, errors: &ValidationErrors) -> FormView {
        let fields = self
            .fields
            .iter()
            .map(|field| FormFieldView {
                name: field.name.clone(),
                label: field.label.clone(),
                value: values.value(&field.name).unwrap_or_default().to_string(),
                error: errors.get(&field.name).map(str::to_string),
            })
            .collect();
        FormView {
            fields,
            submit_label: self.submit_label.clone(),
        }
    }
}

impl Default for ViewRenderer {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

/// Full HTML document with the form above the list.
pub fn render_page(form: &FormView, list: &ListView) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<body>\n{}{}</body>\n</html>\n",
        form.to_html(),
        list.to_html()
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{ViewRenderer, render_page};
    use pretty_assertions::assert_eq;
    use roster_protocol::{FormSnapshot, Record, RecordId, ValidationErrors};

    fn snapshot(name: &str, email: &str) -> FormSnapshot {
        [("name", name), ("email", email)].into_iter().collect()
    }

    /// Markup between `<div>` and `</div>` for the named input.
    fn field_block<'a>(html: &'a str, name: &str) -> &'a str {
        let input = format!("<input name=\"{name}\"");
        let at = html.find(&input).expect("input present");
        let start = html[..at].rfind("<div>").expect("div open");
        let end = at + html[at..].find("</div>").expect("div close");
        &html[start..end]
    }

    #[test]
    fn list_view_keeps_collection_order() {
        let mut first = Record::new("Leanne", "l@example.com");
        first.id = Some(RecordId::Number(1));
        let records = vec![first, Record::new("Ervin", "e@example.com")];

        let view = ViewRenderer::default().list_view(&records);
        let labels: Vec<_> = view.items().iter().map(|item| item.label.as_str()).collect();

        assert_eq!(labels, vec!["Leanne", "Ervin"]);
        assert_eq!(view.items()[0].id, Some(RecordId::Number(1)));
        assert_eq!(
            view.to_html(),
            "<ul>\n  <li>Leanne</li>\n  <li>Ervin</li>\n</ul>\n"
        );
    }

    #[test]
    fn prepend_matches_full_redraw() {
        let renderer = ViewRenderer::default();
        let mut records = vec![Record::new("B", "b@x"), Record::new("C", "c@x")];
        let mut incremental = renderer.list_view(&records);

        let created = Record::new("A", "a@x");
        records.insert(0, created.clone());
        incremental.prepend(renderer.list_item(&created));

        assert_eq!(incremental, renderer.list_view(&records));
    }

    #[test]
    fn empty_collection_renders_empty_list() {
        let view = ViewRenderer::default().list_view(&[]);
        assert!(view.is_empty());
        assert_eq!(view.to_html(), "<ul>\n</ul>\n");
    }

    #[test]
    fn form_view_places_error_next_to_its_input() {
        let mut errors = ValidationErrors::new();
        errors.insert("email", "email is required");

        let form = ViewRenderer::default().form_view(&snapshot("Jo", ""), &errors);
        let html = form.to_html();

        let email = field_block(&html, "email");
        assert!(email.contains("<input name=\"email\" value=\"\">"));
        assert!(email.contains("email is required"));

        let name = field_block(&html, "name");
        assert!(name.contains("value=\"Jo\""));
        assert!(!name.contains("required"));
        assert!(!name.contains("class=\"error\""));
        assert!(form.has_errors());
    }

    #[test]
    fn initial_form_has_no_messages() {
        let form = ViewRenderer::default().form_view(&snapshot("", ""), &ValidationErrors::new());
        assert!(!form.has_errors());
        assert_eq!(
            form.to_html(),
            concat!(
                "<form>\n",
                "  <div>\n",
                "    <label>Name:</label>\n",
                "    <input name=\"name\" value=\"\">\n",
                "  </div>\n",
                "  <div>\n",
                "    <label>Email:</label>\n",
                "    <input name=\"email\" value=\"\">\n",
                "  </div>\n",
                "  <input type=\"submit\" value=\"Submit\">\n",
                "</form>\n",
            )
        );
    }

    #[test]
    fn form_view_is_byte_stable() {
        let renderer = ViewRenderer::default();
        let mut errors = ValidationErrors::new();
        errors.insert("name", "name is required");
        let values = snapshot("", "a@b.com");

        assert_eq!(
            renderer.form_view(&values, &errors).to_html(),
            renderer.form_view(&values, &errors).to_html()
        );
    }

    #[test]
    fn values_are_escaped() {
        let form = ViewRenderer::default()
            .form_view(&snapshot("\"><script>", "a&b"), &ValidationErrors::new());
        let html = form.to_html();

        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(html.contains("value=\"a&amp;b\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn page_puts_form_before_list() {
        let renderer = ViewRenderer::default();
        let page = render_page(
            &renderer.form_view(&FormSnapshot::new(), &ValidationErrors::new()),
            &renderer.list_view(&[Record::new("A", "a@x")]),
        );
        let form_at = page.find("<form>").expect("form");
        let list_at = page.find("<ul>").expect("list");
        assert!(form_at < list_at);
    }
}
