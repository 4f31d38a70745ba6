//! Form serialization: turns a form-like structure into a [`FormSnapshot`].

use roster_protocol::FormSnapshot;

/// A single input-like control inside a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormElement {
    /// Control name; unnamed controls (buttons, decorations) carry no data.
    pub name: Option<String>,
    /// Current string value.
    pub value: String,
}

impl FormElement {
    /// A named control.
    pub fn named(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// A control without a name, such as a submit button.
    pub fn unnamed(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }
}

/// Anything that exposes its controls in document order.
pub trait FormLike {
    fn elements(&self) -> &[FormElement];
}

impl FormLike for [FormElement] {
    fn elements(&self) -> &[FormElement] {
        self
    }
}

impl FormLike for Vec<FormElement> {
    fn elements(&self) -> &[FormElement] {
        self
    }
}

/// Collect named control values into a snapshot.
///
/// Controls with a missing or empty name are skipped. When several controls
/// share a name, the one appearing last wins.
pub fn serialize<F>(form: &F) -> FormSnapshot
where
    F: FormLike + ?Sized,
{
    form.elements()
        .iter()
        .filter_map(|element| match element.name.as_deref() {
            Some(name) if !name.is_empty() => Some((name, element.value.as_str())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{FormElement, serialize};
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_unnamed_controls() {
        let form = vec![
            FormElement::named("name", "Ada"),
            FormElement::unnamed("Submit"),
            FormElement::named("", "blank name"),
            FormElement::named("email", "ada@example.com"),
        ];
        let snapshot = serialize(&form);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.value("name"), Some("Ada"));
        assert_eq!(snapshot.value("email"), Some("ada@example.com"));
        assert_eq!(snapshot.value(""), None);
    }

    #[test]
    fn last_duplicate_wins() {
        let form = [
            FormElement::named("email", "first@example.com"),
            FormElement::named("name", "Ada"),
            FormElement::named("email", "second@example.com"),
        ];
        let snapshot = serialize(&form[..]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.value("email"), Some("second@example.com"));
    }

    #[test]
    fn distinct_names_are_order_independent() {
        let forward = vec![
            FormElement::named("name", "Ada"),
            FormElement::named("email", "ada@example.com"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(serialize(&forward), serialize(&reversed));
    }

    #[test]
    fn empty_form_yields_empty_snapshot() {
        let form: Vec<FormElement> = Vec::new();
        assert!(serialize(&form).is_empty());
    }
}
