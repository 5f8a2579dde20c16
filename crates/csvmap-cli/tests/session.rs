use std::cell::Cell;

use csvmap_cli::session::{ColumnMapper, MappingEdit};
use csvmap_map::{MappingError, MappingState};
use csvmap_model::{FieldKey, UploadPayload};
use csvmap_submit::{Result, SubmitError, SubmitSettings, Transport, TransportResponse, Url};
use tracing_test::traced_test;

/// Counts posts and answers 200, or fails like an unreachable backend.
#[derive(Default)]
struct CountingTransport {
    posts: Cell<usize>,
    offline: bool,
}

impl Transport for CountingTransport {
    fn post_json(&self, _url: &Url, _payload: &UploadPayload) -> Result<TransportResponse> {
        self.posts.set(self.posts.get() + 1);
        if self.offline {
            return Err(SubmitError::Network("connection refused".to_string()));
        }
        Ok(TransportResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }
}

fn loaded(text: &str) -> ColumnMapper {
    let mut mapper = ColumnMapper::new();
    mapper.load_csv_text(text).expect("load csv");
    mapper
}

#[test]
#[traced_test]
fn failed_load_keeps_the_previous_table() {
    let mut mapper = loaded("Name,Mail\nAnn,a@x.com\n");
    assert!(mapper.load_csv_text("").is_err());
    assert_eq!(mapper.table().headers, vec!["Name", "Mail"]);
    assert_eq!(mapper.table().row_count(), 1);
    assert!(logs_contain("CSV data is not formatted as expected"));
}

#[test]
fn reparse_keeps_the_mapping() {
    let mut mapper = loaded("Name,Mail\nAnn,a@x.com\n");
    mapper
        .apply(&MappingEdit::Select {
            field: FieldKey::Email,
            header: "Mail".to_string(),
        })
        .unwrap();

    mapper.load_csv_text("Mail,Name\nb@y.com,Bob\n").unwrap();
    assert_eq!(mapper.mapping().selection(FieldKey::Email), Some("Mail"));
    let records = mapper.records();
    assert_eq!(records[0].get("Email").map(String::as_str), Some("b@y.com"));

    mapper.load_csv_text("Other\nz\n").unwrap();
    assert_eq!(mapper.mapping().selection(FieldKey::Email), Some("Mail"));
    assert_eq!(mapper.summary().stale_selections.len(), 1);
    assert_eq!(mapper.records()[0].get("Email").map(String::as_str), Some(""));
}

#[test]
#[traced_test]
fn submit_without_selection_never_reaches_the_transport() {
    let mapper = loaded("Name\nAnn\n");
    let transport = CountingTransport::default();

    let err = mapper
        .submit(&transport, &SubmitSettings::default())
        .unwrap_err();

    assert!(matches!(err, SubmitError::NoSelection));
    assert_eq!(transport.posts.get(), 0);
    assert!(matches!(mapper.payload(), Err(SubmitError::NoSelection)));
    assert!(logs_contain("No columns selected"));
}

#[test]
#[traced_test]
fn transport_failure_is_logged_and_returned() {
    let mut mapper = loaded("Name\nAnn\n");
    mapper
        .apply(&MappingEdit::Select {
            field: FieldKey::FirstName,
            header: "Name".to_string(),
        })
        .unwrap();
    let transport = CountingTransport {
        offline: true,
        ..CountingTransport::default()
    };

    let err = mapper
        .submit(&transport, &SubmitSettings::default())
        .unwrap_err();

    assert!(matches!(err, SubmitError::Network(_)));
    assert_eq!(transport.posts.get(), 1);
    assert!(logs_contain("Error uploading data"));
    assert!(logs_contain("connection refused"));
}

#[test]
#[traced_test]
fn stale_selection_is_warned_once() {
    let mut mapper = loaded("Mail\na@x.com\n").with_mapping(
        MappingState::new().select_header_for(FieldKey::Email, "Mail"),
    );
    mapper.load_csv_text("Other\nz\n").unwrap();
    mapper.load_csv_text("Other,More\nz,y\n").unwrap();
    mapper.warn_stale_selections();

    logs_assert(|lines: &[&str]| {
        let warnings = lines
            .iter()
            .filter(|line| line.contains("selected header not found in loaded file"))
            .count();
        match warnings {
            1 => Ok(()),
            n => Err(format!("expected one stale warning, got {n}")),
        }
    });
}

#[test]
fn submit_posts_once_per_call() {
    let mut mapper = loaded("Name\nAnn\nBob\n");
    mapper
        .apply(&MappingEdit::Select {
            field: FieldKey::FirstName,
            header: "Name".to_string(),
        })
        .unwrap();
    let transport = CountingTransport::default();

    let receipt = mapper
        .submit(&transport, &SubmitSettings::default())
        .unwrap();
    mapper
        .submit(&transport, &SubmitSettings::default())
        .unwrap();

    assert_eq!(receipt.records, 2);
    assert_eq!(transport.posts.get(), 2);
}

#[test]
fn rejected_edit_leaves_mapping_unchanged() {
    let mut mapper = loaded("Name,Comment\nAnn,hi\n");
    mapper
        .apply(&MappingEdit::AddCustom {
            name: "Notes".to_string(),
            source: "Comment".to_string(),
        })
        .unwrap();
    let before = mapper.mapping().clone();

    let err = mapper
        .apply(&MappingEdit::RenameCustom {
            index: 3,
            name: "Other".to_string(),
        })
        .unwrap_err();

    assert!(matches!(
        err,
        MappingError::CustomFieldOutOfRange { index: 3, len: 1 }
    ));
    assert_eq!(mapper.mapping(), &before);
}

#[test]
fn custom_field_lifecycle() {
    let mut mapper = loaded("Name,Comment,Phone\nAnn,hi,555\n");
    let edits = [
        MappingEdit::AddCustom {
            name: "Notes".to_string(),
            source: "Comment".to_string(),
        },
        MappingEdit::AddCustom {
            name: "Tel".to_string(),
            source: "Phone".to_string(),
        },
        MappingEdit::RenameCustom {
            index: 0,
            name: "Remarks".to_string(),
        },
        MappingEdit::RetargetCustom {
            index: 1,
            source: "Name".to_string(),
        },
    ];
    mapper.apply_all(&edits).unwrap();
    assert_eq!(mapper.mapping().custom_field_names(), vec!["Remarks", "Tel"]);

    let record = &mapper.records()[0];
    assert_eq!(record.get("Remarks").map(String::as_str), Some("hi"));
    assert_eq!(record.get("Tel").map(String::as_str), Some("Ann"));

    mapper.apply(&MappingEdit::RemoveCustom { index: 0 }).unwrap();
    assert_eq!(mapper.mapping().custom_field_names(), vec!["Tel"]);
    assert!(!mapper.records()[0].contains_key("Remarks"));
}

#[test]
fn empty_header_clears_a_selection() {
    let mut mapper = loaded("Name\nAnn\n").with_mapping(
        MappingState::new().select_header_for(FieldKey::FirstName, "Name"),
    );
    mapper
        .apply(&MappingEdit::Select {
            field: FieldKey::FirstName,
            header: String::new(),
        })
        .unwrap();
    assert!(!mapper.mapping().has_selection());
}
