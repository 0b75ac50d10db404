//! Contact form
//!
//! Intercepts submission and simulates a successful send: the browser
//! navigation is cancelled, a confirmation is shown and the fields are
//! emptied. Nothing leaves the page.

use tracing::info;
use vitrine_dom::forms::{self, FormData};
use vitrine_dom::{Document, DomResult, Event, EventType, ListenerId, ListenerRegistry, NodeId};

use crate::config::ContactConfig;
use crate::page::Action;

/// What a submission would have sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub fields: FormData,
    /// Virtual time of the submission (ms)
    pub submitted_at: u64,
}

/// Wired contact form
#[derive(Debug)]
pub struct ContactForm {
    form: NodeId,
    result: Option<NodeId>,
    confirmation: String,
    listener: ListenerId,
}

impl ContactForm {
    /// Hook the submit event of the configured form, if the page has one
    pub fn mount(
        doc: &Document,
        listeners: &mut ListenerRegistry<Action>,
        config: &ContactConfig,
    ) -> Option<Self> {
        let form = doc.get_element_by_id(&config.form_id)?;
        let result = doc.get_element_by_id(&config.result_id);
        let listener = listeners.add(form, EventType::Submit, Action::ContactSubmit);

        Some(Self {
            form,
            result,
            confirmation: config.confirmation.clone(),
            listener,
        })
    }

    /// Handle a submit event aimed at the form
    pub fn handle_submit(
        &self,
        doc: &mut Document,
        event: &mut Event,
        now: u64,
    ) -> DomResult<ContactSubmission> {
        event.prevent_default();

        let fields = FormData::collect(doc.tree(), self.form);
        let tree = doc.tree_mut();
        if let Some(result) = self.result {
            tree.set_text_content(result, &self.confirmation)?;
        }
        forms::reset_form(tree, self.form)?;

        info!("Contact form submitted ({} fields), simulated success", fields.len());
        Ok(ContactSubmission {
            fields,
            submitted_at: now,
        })
    }

    /// Detach the submit listener
    pub fn dispose(&self, listeners: &mut ListenerRegistry<Action>) {
        listeners.remove(self.listener);
    }

    pub fn form(&self) -> NodeId {
        self.form
    }
}
