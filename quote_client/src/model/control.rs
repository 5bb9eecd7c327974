//! Control names and the event-handler table.
//!
//! Each user-facing control (`newQuote`, `categoryFilter`, `addQuote`,
//! `exportQuotes`, `importFile`) is registered in a [`HandlerTable`] under its
//! name. Handlers receive the store by mutable reference together with the
//! control's input and return the text to show. An `Err` is an alert.
use std::collections::HashMap;
use std::path::PathBuf;

use quote_common::{QuoteError, QuoteStore, Result};
use strum_macros::{Display, EnumIter, EnumString};

/// Names of the controls a front end can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Control {
    /// "Show new quote" button.
    NewQuote,
    /// Category selection control.
    CategoryFilter,
    /// Add-quote form submission.
    AddQuote,
    /// Export button.
    ExportQuotes,
    /// Import file picker.
    ImportFile,
}

/// Payload carried by a control event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlInput {
    /// Plain button press.
    Click,
    /// Option value picked in a selection control.
    Select(String),
    /// Add-quote form fields.
    Submit {
        /// Quote text field.
        text: String,
        /// Category field.
        category: String,
    },
    /// File chosen for import or export.
    File(PathBuf),
}

/// Handler invoked for a control event.
pub type Handler = Box<dyn Fn(&mut QuoteStore, ControlInput) -> Result<String> + Send + Sync>;

/// Registration table mapping control names to handlers.
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<Control, Handler>,
}

impl HandlerTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `control`, replacing any previous one.
    pub fn register<F>(&mut self, control: Control, handler: F)
    where
        F: Fn(&mut QuoteStore, ControlInput) -> Result<String> + Send + Sync + 'static,
    {
        self.handlers.insert(control, Box::new(handler));
    }

    /// Runs the handler registered for `control`.
    pub fn dispatch(
        &self,
        control: Control,
        store: &mut QuoteStore,
        input: ControlInput,
    ) -> Result<String> {
        let handler = self
            .handlers
            .get(&control)
            .ok_or_else(|| QuoteError::UnknownControl(control.to_string()))?;
        handler(store, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::storage::MemoryStorage;
    use std::str::FromStr;
    use std::sync::Arc;
    use strum::IntoEnumIterator;

    #[test]
    fn control_names_are_camel_case() {
        let names: Vec<String> = Control::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec!["newQuote", "categoryFilter", "addQuote", "exportQuotes", "importFile"]
        );
        assert_eq!(Control::from_str("importFile").unwrap(), Control::ImportFile);
    }

    #[test]
    fn unregistered_control_is_an_error() {
        let mut store = QuoteStore::load(Arc::new(MemoryStorage::new()));
        let mut table = HandlerTable::new();
        table.register(Control::NewQuote, |store, _| Ok(store.len().to_string()));

        assert_eq!(
            table.dispatch(Control::NewQuote, &mut store, ControlInput::Click).unwrap(),
            "5"
        );
        let err = table
            .dispatch(Control::ExportQuotes, &mut store, ControlInput::Click)
            .unwrap_err();
        assert!(matches!(err, QuoteError::UnknownControl(ref name) if name == "exportQuotes"));
        assert!(Control::from_str("submitButton").is_err());
    }
}
