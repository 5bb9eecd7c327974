//! Default handlers for every quote control.
use std::sync::Arc;

use log::info;
use quote_common::category::CategoryFilter;
use quote_common::{Quote, QuoteError, QuoteStore, Result};

use crate::model::control::{Control, ControlInput, HandlerTable};
use crate::sender::QuotePublisher;

const NO_QUOTES: &str = "No quotes available for this category.";
const EMPTY_LIST: &str = "No quotes available.";

/// Builds the table wiring each control to its store operation.
pub fn default_handlers(publisher: Arc<dyn QuotePublisher>) -> HandlerTable {
    let mut table = HandlerTable::new();
    table.register(Control::NewQuote, show_random_quote);
    table.register(Control::CategoryFilter, filter_quotes);
    table.register(Control::AddQuote, move |store, input| {
        add_quote(store, input, publisher.as_ref())
    });
    table.register(Control::ExportQuotes, export_quotes);
    table.register(Control::ImportFile, import_quotes);
    table
}

fn unexpected(control: Control, input: &ControlInput) -> QuoteError {
    QuoteError::Validation(format!("Unexpected input for {}: {:?}", control, input))
}

fn render_random(store: &QuoteStore, filter: &CategoryFilter) -> String {
    if store.is_empty() {
        return EMPTY_LIST.to_string();
    }
    store
        .random_quote(filter)
        .map(ToString::to_string)
        .unwrap_or_else(|| NO_QUOTES.to_string())
}

fn show_random_quote(store: &mut QuoteStore, input: ControlInput) -> Result<String> {
    match input {
        ControlInput::Click => Ok(render_random(store, &store.selected_category())),
        other => Err(unexpected(Control::NewQuote, &other)),
    }
}

fn filter_quotes(store: &mut QuoteStore, input: ControlInput) -> Result<String> {
    let value = match input {
        ControlInput::Select(value) => value,
        other => return Err(unexpected(Control::CategoryFilter, &other)),
    };
    let filter = CategoryFilter::from_value(&value);
    store.set_selected_category(&filter)?;
    Ok(render_random(store, &filter))
}

fn add_quote(
    store: &mut QuoteStore,
    input: ControlInput,
    publisher: &dyn QuotePublisher,
) -> Result<String> {
    let (text, category) = match input {
        ControlInput::Submit { text, category } => (text, category),
        other => return Err(unexpected(Control::AddQuote, &other)),
    };
    let quote = Quote::new(text, category);
    store.add(quote.clone())?;
    publisher.publish(&quote);
    Ok("Quote added successfully".to_string())
}

fn export_quotes(store: &mut QuoteStore, input: ControlInput) -> Result<String> {
    let path = match input {
        ControlInput::File(path) => path,
        other => return Err(unexpected(Control::ExportQuotes, &other)),
    };
    store.export_to_file(&path)?;
    info!("Exported {} quotes to {}", store.len(), path.display());
    Ok(format!("Exported {} quotes to {}", store.len(), path.display()))
}

fn import_quotes(store: &mut QuoteStore, input: ControlInput) -> Result<String> {
    let path = match input {
        ControlInput::File(path) => path,
        other => return Err(unexpected(Control::ImportFile, &other)),
    };
    store.import_from_file(&path)?;
    Ok("Quotes imported successfully!".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::error::{INVALID_FILE_FORMAT, MISSING_FIELDS};
    use quote_common::storage::{KeyValueStore, MemoryStorage};
    use std::sync::Mutex;
    use strum::IntoEnumIterator;

    #[derive(Default)]
    struct RecordingPublisher {
        sent: Mutex<Vec<Quote>>,
    }

    impl QuotePublisher for RecordingPublisher {
        fn publish(&self, quote: &Quote) {
            self.sent.lock().unwrap().push(quote.clone());
        }
    }

    fn setup() -> (QuoteStore, Arc<RecordingPublisher>, HandlerTable) {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let table = default_handlers(publisher.clone());
        (QuoteStore::load(storage), publisher, table)
    }

    #[test]
    fn every_control_is_registered() {
        let (mut store, _, table) = setup();
        for control in Control::iter() {
            let input = ControlInput::Select("all".into());
            let result = table.dispatch(control, &mut store, input);
            assert!(!matches!(result, Err(QuoteError::UnknownControl(_))), "{}", control);
        }
    }

    #[test]
    fn add_quote_stores_and_publishes() {
        let (mut store, publisher, table) = setup();
        let input = ControlInput::Submit {
            text: "Less is more.".to_string(),
            category: "Design".to_string(),
        };

        let message = table.dispatch(Control::AddQuote, &mut store, input).unwrap();

        assert_eq!(message, "Quote added successfully");
        assert_eq!(store.len(), 6);
        assert!(store.filter_options().contains(&CategoryFilter::Only("Design".into())));
        assert_eq!(
            *publisher.sent.lock().unwrap(),
            vec![Quote::new("Less is more.", "Design")]
        );
    }

    #[test]
    fn add_quote_with_empty_field_alerts_without_publishing() {
        let (mut store, publisher, table) = setup();
        let input = ControlInput::Submit {
            text: "Orphan".to_string(),
            category: String::new(),
        };

        let err = table.dispatch(Control::AddQuote, &mut store, input).unwrap_err();

        assert_eq!(err.to_string(), MISSING_FIELDS);
        assert_eq!(store.len(), 5);
        assert!(publisher.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn filter_persists_choice_and_shows_matching_quote() {
        let (mut store, _, table) = setup();

        let shown = table
            .dispatch(Control::CategoryFilter, &mut store, ControlInput::Select("Life".into()))
            .unwrap();

        assert_eq!(
            shown,
            "\"Life is what happens when you're busy making other plans.\" - Category: Life"
        );
        assert_eq!(store.selected_category(), CategoryFilter::Only("Life".into()));
        let again = table
            .dispatch(Control::NewQuote, &mut store, ControlInput::Click)
            .unwrap();
        assert_eq!(again, shown);
    }

    #[test]
    fn filter_with_no_match_says_so() {
        let (mut store, _, table) = setup();
        let shown = table
            .dispatch(Control::CategoryFilter, &mut store, ControlInput::Select("Nope".into()))
            .unwrap();
        assert_eq!(shown, NO_QUOTES);
    }

    #[test]
    fn export_then_import_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        let (mut store, _, table) = setup();

        table
            .dispatch(Control::ExportQuotes, &mut store, ControlInput::File(path.clone()))
            .unwrap();
        let message = table
            .dispatch(Control::ImportFile, &mut store, ControlInput::File(path))
            .unwrap();

        assert_eq!(message, "Quotes imported successfully!");
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn import_of_object_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"quotes": []}"#).unwrap();
        let (mut store, _, table) = setup();

        let err = table
            .dispatch(Control::ImportFile, &mut store, ControlInput::File(path))
            .unwrap_err();

        assert_eq!(err.to_string(), INVALID_FILE_FORMAT);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn empty_list_has_its_own_message() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        storage.set_item("quotes", "[]").unwrap();
        let mut store = QuoteStore::load(storage);
        let table = default_handlers(Arc::new(RecordingPublisher::default()));

        let shown = table
            .dispatch(Control::NewQuote, &mut store, ControlInput::Click)
            .unwrap();

        assert_eq!(shown, EMPTY_LIST);
    }

    #[test]
    fn wrong_input_kind_is_rejected() {
        let (mut store, _, table) = setup();
        assert!(table
            .dispatch(Control::ExportQuotes, &mut store, ControlInput::Click)
            .is_err());
    }
}
