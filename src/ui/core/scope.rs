use std::ops::{Deref, DerefMut};

use super::error::Result;
use super::runtime::Ui;
use super::tree::ControlId;

/// An open construction scope. Controls created through it become children of `this()`.
///
/// Closing (explicitly or by drop) lays the children out and pops the scope, so scopes
/// always nest.
pub struct Scope<'a> {
    ui: &'a mut Ui,
    owner: ControlId,
    closed: bool,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(ui: &'a mut Ui, owner: ControlId) -> Self {
        Self {
            ui,
            owner,
            closed: false,
        }
    }

    /// The control this scope is building.
    pub fn this(&self) -> ControlId {
        self.owner
    }

    /// Closes the scope, surfacing any layout error that drop would only log.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.ui.exit_context()
    }
}

impl Deref for Scope<'_> {
    type Target = Ui;

    fn deref(&self) -> &Ui {
        self.ui
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Ui {
        self.ui
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.ui.exit_context() {
            tracing::warn!(error = %err, "layout on scope exit failed");
        }
    }
}
