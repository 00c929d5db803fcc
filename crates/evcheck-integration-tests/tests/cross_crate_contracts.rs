//! Contracts between crates: schema errors map onto the record taxonomy,
//! violations render into the aggregator's line format.

use evcheck_core::{EventType, FailureEntry, RecordError, Stage};
use evcheck_pipeline::flatten_entry;
use evcheck_schema::{SchemaResolver, Violation};

#[test]
fn violation_path_rendering() {
    let v = Violation::new(
        "is not of type 'string'",
        vec!["items".to_string(), "0".to_string(), "name".to_string()],
    );
    assert_eq!(
        v.render(),
        "is not of type 'string', обратите внимание на ключ items 0 name"
    );
    assert_eq!(Violation::new("root problem", Vec::new()).render(), "root problem");
}

#[test]
fn rendered_violations_flatten_to_one_line() {
    let messages = vec![
        Violation::new("a", vec!["x".to_string()]).render(),
        Violation::new("b", Vec::new()).render(),
    ];
    let line = flatten_entry(FailureEntry::many("f.json", messages)).unwrap();
    assert_eq!(line.to_string(), "f.json: a, обратите внимание на ключ x; b");
}

#[test]
fn unresolved_schema_maps_to_record_error() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = SchemaResolver::new(dir.path());
    let err: RecordError = resolver
        .resolve(&EventType::new("unknown"))
        .unwrap_err()
        .into();
    assert_eq!(err, RecordError::UnresolvedSchema);
    assert_eq!(err.stage(), Stage::Resolving);
}
