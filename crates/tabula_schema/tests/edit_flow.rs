//! End-to-end edit scenarios: open a row, change fields, submit, and check
//! how the engine merges the result back.

use tabula_schema::{
    CellValue, ColumnDescriptor, ColumnType, EditSession, FieldInput, ListEngine, RawRow,
    RowSelection, Strictness, SubmitOutcome,
};

fn raw(entries: &[(&str, CellValue)]) -> RawRow {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn toggling_a_boolean_updates_only_that_row() {
    let columns = vec![ColumnDescriptor::new("approved", ColumnType::Boolean)];
    let mut engine = ListEngine::new(
        columns.clone(),
        vec![
            raw(&[("approved", CellValue::Bool(false))]),
            raw(&[("approved", CellValue::Bool(true))]),
        ],
        Strictness::Lenient,
    )
    .unwrap();

    let mut session = match engine.select_row(0) {
        RowSelection::Edit(session) => session,
        RowSelection::Handled => panic!("expected the built-in edit form to open"),
    };

    session.field_changed(&columns, "approved", FieldInput::Toggle(true));
    let (dirty, row) = match session.submit(&columns) {
        SubmitOutcome::Commit { dirty, row } => (dirty, row),
        SubmitOutcome::Invalid { missing } => panic!("unexpected validation failure: {missing:?}"),
    };

    engine.commit(dirty, row).unwrap();

    let approved: Vec<(i64, &CellValue)> = engine
        .rows()
        .iter()
        .map(|r| (r.row_id, r.get("approved").unwrap()))
        .collect();
    assert_eq!(
        approved,
        vec![(0, &CellValue::Bool(true)), (1, &CellValue::Bool(true))]
    );
}

#[test]
fn empty_required_field_blocks_the_commit() {
    let columns = vec![ColumnDescriptor::new("firstName", ColumnType::String).required()];
    let mut engine = ListEngine::new(
        columns.clone(),
        vec![raw(&[("firstName", CellValue::Str("Ada".into()))])],
        Strictness::Lenient,
    )
    .unwrap();
    let before = engine.rows().to_vec();

    let mut session = match engine.select_row(0) {
        RowSelection::Edit(session) => session,
        RowSelection::Handled => panic!("expected edit session"),
    };
    session.field_changed(&columns, "firstName", FieldInput::Text(String::new()));

    match session.submit(&columns) {
        SubmitOutcome::Invalid { missing } => assert_eq!(missing, vec!["firstName"]),
        SubmitOutcome::Commit { .. } => panic!("submit must be suppressed"),
    }

    // nothing was handed to the engine; the owned set is unchanged
    assert_eq!(engine.rows(), &before[..]);
}

#[test]
fn cancel_discards_the_working_copy() {
    let columns = vec![ColumnDescriptor::new("firstName", ColumnType::String)];
    let mut engine = ListEngine::new(
        columns.clone(),
        vec![raw(&[("firstName", CellValue::Str("Ada".into()))])],
        Strictness::Lenient,
    )
    .unwrap();

    let session = match engine.select_row(0) {
        RowSelection::Edit(mut session) => {
            session.field_changed(&columns, "firstName", FieldInput::Text("Grace".into()));
            session
        }
        RowSelection::Handled => panic!("expected edit session"),
    };

    // cancel: the host simply drops the session
    drop(session);
    assert_eq!(
        engine.rows()[0].get("firstName"),
        Some(&CellValue::Str("Ada".into()))
    );
}

#[test]
fn dirty_session_survives_a_round_of_edits() {
    let columns = vec![
        ColumnDescriptor::new("firstName", ColumnType::String).required(),
        ColumnDescriptor::new("lastName", ColumnType::String),
    ];
    let row = tabula_schema::ingest(vec![raw(&[
        ("firstName", CellValue::Str("Ada".into())),
        ("lastName", CellValue::Str("Lovelace".into())),
    ])])
    .remove(0);

    let mut session = EditSession::open(&row);
    session.field_changed(&columns, "lastName", FieldInput::Text("Byron".into()));
    assert!(session.dirty());

    // an unrelated change that writes the same value back cannot reset dirty
    session.field_changed(&columns, "firstName", FieldInput::Text("Ada".into()));
    assert!(session.dirty());
}
