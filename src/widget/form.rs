//! The alternatives form: show handler and selection reporter.

use tokio::sync::mpsc;

use crate::models::Question;
use crate::protocol::ClientMessage;

use super::WidgetError;
use super::document::{Document, FORM_ID, TEMPLATE_ID, WORDING_ID};
use super::template::{self, AlternativeEntry};

/// A multiple-choice widget bound to an outbound message channel.
///
/// The change reporter is wired when the form is built; showing further
/// questions only appends entries and never registers another reporter, so
/// each change produces exactly one outbound message.
pub struct AlternativesForm {
    document: Document,
    outbound: mpsc::UnboundedSender<ClientMessage>,
}

impl AlternativesForm {
    pub fn new(document: Document, outbound: mpsc::UnboundedSender<ClientMessage>) -> Self {
        Self { document, outbound }
    }

    /// Replace the document, as a page reload would.
    pub fn reset(&mut self, document: Document) {
        self.document = document;
    }

    pub fn wording(&self) -> Result<&str, WidgetError> {
        self.document.text(WORDING_ID)
    }

    pub fn entries(&self) -> Result<&[AlternativeEntry], WidgetError> {
        self.document.container(FORM_ID)
    }

    /// Handle an `alternatives.show` message: set the prompt, then render and
    /// append one entry per answer in the order received.
    ///
    /// Entries from earlier questions stay in place.
    pub fn show(&mut self, question: &Question) -> Result<(), WidgetError> {
        self.document.set_text(WORDING_ID, question.wording.as_str())?;

        for (index, text) in question.answers.iter().enumerate() {
            self.render(index, text)?;
        }

        tracing::debug!(
            wording = %question.wording,
            answers = question.answers.len(),
            "rendered alternatives"
        );
        Ok(())
    }

    /// Instantiate the template for one alternative and append it to the form.
    pub fn render(&mut self, index: usize, text: &str) -> Result<(), WidgetError> {
        let entry = template::render(self.document.template(TEMPLATE_ID)?, index, text)?;
        self.document.container_mut(FORM_ID)?.push(entry);
        Ok(())
    }

    /// Check the radio at `position` in the form, as a user click would.
    ///
    /// Returns the reported alternative when this changed the selection, or
    /// `None` when the radio was already checked.
    pub fn check(&mut self, position: usize) -> Result<Option<usize>, WidgetError> {
        let entries = self.document.container_mut(FORM_ID)?;
        let len = entries.len();
        let target = entries
            .get(position)
            .ok_or(WidgetError::NoSuchEntry { position, len })?;

        if target.is_checked() {
            return Ok(None);
        }

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.set_checked(i == position);
        }

        self.on_change().map(Some)
    }

    /// Read the checked value and report it upstream.
    fn on_change(&self) -> Result<usize, WidgetError> {
        let alternative = self.selection()?.ok_or(WidgetError::NoSelection)?;

        if self
            .outbound
            .send(ClientMessage::AlternativesAnswer { alternative })
            .is_err()
        {
            tracing::warn!(alternative, "outbound channel closed, answer dropped");
        }

        Ok(alternative)
    }

    /// The alternative currently checked, if any.
    pub fn selection(&self) -> Result<Option<usize>, WidgetError> {
        self.entries()?
            .iter()
            .find(|entry| entry.is_checked())
            .map(AlternativeEntry::index)
            .transpose()
    }
}
