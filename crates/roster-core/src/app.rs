//! Controller wiring the store and renderer to initialization and submit events.

use crate::error::{CreateError, LoadFailure};
use crate::form::{FormLike, serialize};
use crate::remote::RemoteResource;
use crate::store::RecordStore;
use crate::validate::RecordValidator;
use crate::view::{FormView, ListView, ViewRenderer, render_page};
use log::{info, warn};
use roster_config::RosterConfig;
use roster_protocol::{FormSnapshot, Record, ValidationErrors};
use std::sync::Arc;

/// Result of [`RecordApp::init`].
#[derive(Debug)]
pub struct InitReport {
    /// Records in the collection after the load.
    pub loaded: usize,
    /// Set when the fetch failed and the list rendered empty.
    pub failure: Option<LoadFailure>,
}

/// Terminal state of one form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The server confirmed the record; it now heads the list.
    Created(Record),
    /// Validation failed; the form shows the submitted data with messages.
    Invalid(ValidationErrors),
    /// The server did not confirm; the form keeps the submitted data.
    PersistFailed(String),
}

/// Owns the record store plus the currently mounted list and form views.
///
/// Handlers run one at a time: both `init` and `submit` borrow the app
/// mutably for their whole duration.
#[derive(Debug)]
pub struct RecordApp {
    store: RecordStore,
    renderer: ViewRenderer,
    initial_values: FormSnapshot,
    list: ListView,
    form: FormView,
}

impl RecordApp {
    /// Build an app with an empty list and the form bound to `initial_values`.
    pub fn new(store: RecordStore, renderer: ViewRenderer, initial_values: FormSnapshot) -> Self {
        let list = renderer.list_view(store.records());
        let form = renderer.form_view(&initial_values, &ValidationErrors::new());
        Self {
            store,
            renderer,
            initial_values,
            list,
            form,
        }
    }

    /// Build an app from config around the given remote resource.
    pub fn from_config(config: &RosterConfig, remote: Arc<dyn RemoteResource>) -> Self {
        let store = RecordStore::new(remote, RecordValidator::from_config(&config.validation))
            .with_form_fields(config.form.fields.iter().map(|field| field.name.as_str()));
        let initial_values = config
            .form
            .initial_values
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();
        Self::new(store, ViewRenderer::from_config(&config.form), initial_values)
    }

    /// Load every record and mount fresh list and form views.
    ///
    /// A failed load is logged and degrades to an empty list; it is never fatal.
    pub async fn init(&mut self) -> InitReport {
        let failure = match self.store.load_all().await {
            Ok(records) => {
                info!("initial load complete (count={})", records.len());
                None
            }
            Err(failure) => {
                warn!("initial load failed, rendering empty list: {failure}");
                Some(failure)
            }
        };
        self.list = self.renderer.list_view(self.store.records());
        self.form = self.initial_form();
        InitReport {
            loaded: self.store.len(),
            failure,
        }
    }

    /// Handle a form submission.
    pub async fn submit<F>(&mut self, form: &F) -> SubmitOutcome
    where
        F: FormLike + ?Sized,
    {
        let snapshot = serialize(form);
        match self.store.create(snapshot).await {
            Ok(record) => {
                self.list.prepend(self.renderer.list_item(&record));
                self.form = self.initial_form();
                SubmitOutcome::Created(record)
            }
            Err(CreateError::Invalid(failure)) => {
                self.form = self.renderer.form_view(&failure.data, &failure.errors);
                SubmitOutcome::Invalid(failure.errors)
            }
            Err(CreateError::Persist(failure)) => {
                self.form = self
                    .renderer
                    .form_view(&failure.data, &ValidationErrors::new());
                SubmitOutcome::PersistFailed(failure.to_string())
            }
        }
    }

    /// Clear the collection and remount empty views.
    pub fn reset(&mut self) {
        self.store.reset();
        self.list = self.renderer.list_view(self.store.records());
        self.form = self.initial_form();
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    /// The currently mounted list.
    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// The currently mounted form.
    pub fn form(&self) -> &FormView {
        &self.form
    }

    /// Full HTML page for the current state.
    pub fn page(&self) -> String {
        render_page(&self.form, &self.list)
    }

    fn initial_form(&self) -> FormView {
        self.renderer
            .form_view(&self.initial_values, &ValidationErrors::new())
    }
}
