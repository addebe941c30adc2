//! Tests for TreeModel navigation, mutation and notifications

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use nextjob::domain::{Company, Interview, Person, Role, RowKind, Value};
use nextjob::model::flatten::{record_id, row_kind, TITLE_COLUMN};
use nextjob::model::{
    company_tree, reload_company_tree, EventLog, ItemRole, ModelEvent, ModelIndex, TreeModel,
};
use nextjob::util::testing::init_test_setup;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn person(name: &str) -> Person {
    Person {
        uuid: format!("person-{}", name.to_lowercase()),
        name: name.into(),
        title: Default::default(),
        role: None,
        email: None,
        description: None,
    }
}

fn acme() -> Company {
    Company {
        uuid: "company-acme".into(),
        name: "Acme".into(),
        website: None,
        recruiters: vec![person("Ann")],
        roles: vec![Role {
            uuid: "role-engineer".into(),
            title: "Engineer".into(),
            applied_date: date(2024, 1, 1),
            employment_type: Default::default(),
            work_location: Default::default(),
            description: None,
            interviews: vec![Interview {
                uuid: "interview-screen".into(),
                sequence: 1,
                title: "Screen".into(),
                kind: Default::default(),
                date: date(2024, 1, 5),
                interviewers: vec![person("Bob")],
                description: None,
            }],
        }],
    }
}

fn globex() -> Company {
    Company {
        uuid: "company-globex".into(),
        name: "Globex".into(),
        website: None,
        recruiters: vec![],
        roles: vec![],
    }
}

#[fixture]
fn model() -> TreeModel {
    init_test_setup();
    company_tree(&["Title", "Details", "People"], &[acme()], Default::default())
}

fn title(model: &TreeModel, index: &ModelIndex) -> String {
    model
        .data(&index.sibling_column(TITLE_COLUMN), ItemRole::Display)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

/// Every valid index below `parent`, depth first.
fn all_indices(model: &TreeModel, parent: Option<&ModelIndex>, out: &mut Vec<(Option<ModelIndex>, ModelIndex)>) {
    for row in 0..model.index_count_rows(parent) {
        for column in 0..model.index_count_columns(parent) {
            let idx = model
                .index(row, column, parent)
                .expect("valid row/column resolves");
            out.push((parent.copied(), idx));
        }
        let first = model.index(row, 0, parent).unwrap();
        all_indices(model, Some(&first), out);
    }
}

// ============================================================
// Scenario: company → role → interview
// ============================================================

#[rstest]
fn given_one_company_when_building_tree_then_hierarchy_is_navigable(model: TreeModel) {
    assert_eq!(model.index_count_rows(None), 1);

    let company = model.index(0, 0, None).unwrap();
    assert_eq!(
        model.data(&company, ItemRole::Display),
        Some(Value::from("Acme"))
    );

    assert_eq!(model.index_count_rows(Some(&company)), 1);
    let role = model.index(0, 0, Some(&company)).unwrap();
    assert_eq!(model.data(&role, ItemRole::Display), Some(Value::from("Engineer")));

    assert_eq!(model.index_count_rows(Some(&role)), 1);
    let interview = model.index(0, 0, Some(&role)).unwrap();
    let label = title(&model, &interview);
    assert!(label.contains('1'));
    assert!(label.contains("Screen"));

    assert_eq!(row_kind(&model, &interview), Some(RowKind::Interview));
    assert_eq!(record_id(&model, &interview), Some("interview-screen"));
}

#[rstest]
fn given_header_when_counting_columns_then_hidden_columns_are_included(model: TreeModel) {
    assert_eq!(model.index_count_columns(None), 5);
    let company = model.index(0, 0, None).unwrap();
    assert_eq!(model.index_count_columns(Some(&company)), 5);
}

// ============================================================
// Round trip: parent_of(index(row, 0, parent)) == parent
// ============================================================

#[rstest]
fn given_any_valid_index_when_resolving_parent_then_round_trips(model: TreeModel) {
    let mut indices = Vec::new();
    all_indices(&model, None, &mut indices);
    assert_eq!(indices.len(), 3 * 5);

    for (parent, idx) in indices {
        let first_column = idx.sibling_column(0);
        assert_eq!(model.parent_of(&first_column), parent);
        assert_eq!(model.parent_of(&idx), parent);
    }
}

#[rstest]
fn given_non_first_column_parent_when_indexing_then_not_found(model: TreeModel) {
    let company_details = model.index(0, 1, None).unwrap();
    assert_eq!(model.index_count_rows(Some(&company_details)), 0);
    assert_eq!(model.index(0, 0, Some(&company_details)), None);
}

#[rstest]
#[case(1, 0)]
#[case(0, 5)]
#[case(usize::MAX, 0)]
fn given_out_of_range_address_when_indexing_then_not_found(
    model: TreeModel,
    #[case] row: usize,
    #[case] column: usize,
) {
    assert_eq!(model.index(row, column, None), None);
}

// ============================================================
// Data roles
// ============================================================

#[rstest]
fn given_edit_role_when_setting_data_then_value_and_event_change(mut model: TreeModel) {
    let log = EventLog::new();
    model.add_observer(Box::new(log.clone()));
    let company = model.index(0, 0, None).unwrap();

    assert!(model.set_data(&company, Value::from("Acme Corp"), ItemRole::Edit));
    assert_eq!(model.data(&company, ItemRole::Display), Some(Value::from("Acme Corp")));
    assert_eq!(log.len(), 1);

    assert!(!model.set_data(&company, Value::from("ignored"), ItemRole::Display));
    assert_eq!(model.data(&company, ItemRole::Edit), Some(Value::from("Acme Corp")));
    assert_eq!(log.len(), 1);
}

#[rstest]
fn given_nested_rows_when_search_term_changes_then_every_sibling_block_is_reported(mut model: TreeModel) {
    let log = EventLog::new();
    model.add_observer(Box::new(log.clone()));
    let company = model.index(0, 0, None).unwrap();
    let role = model.index(0, 0, Some(&company)).unwrap();
    let interview = model.index(0, 0, Some(&role)).unwrap();

    model.set_search_term(Some("bob"));

    let changed: Vec<(ModelIndex, ModelIndex)> = log
        .events()
        .into_iter()
        .filter_map(|event| match event {
            ModelEvent::DataChanged { top_left, bottom_right, roles } => {
                assert_eq!(roles, vec![ItemRole::Highlight]);
                Some((top_left, bottom_right))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        changed,
        vec![
            (company, company.sibling_column(4)),
            (role, role.sibling_column(4)),
            (interview, interview.sibling_column(4)),
        ]
    );
}

#[rstest]
fn given_no_search_term_when_asking_highlight_then_not_found(model: TreeModel) {
    let company = model.index(0, 0, None).unwrap();
    assert_eq!(model.data(&company, ItemRole::Highlight), None);
}

#[rstest]
fn given_search_term_when_asking_highlight_then_matching_cells_flagged(mut model: TreeModel) {
    model.set_search_term(Some("  BOB "));

    let matches = model.matches();
    assert_eq!(matches.len(), 1);
    let hit = matches[0];
    assert_eq!(model.data(&hit, ItemRole::Highlight), Some(Value::Bool(true)));
    assert_eq!(row_kind(&model, &hit), Some(RowKind::Interview));

    let company = model.index(0, 0, None).unwrap();
    assert_eq!(model.data(&company, ItemRole::Highlight), Some(Value::Bool(false)));

    model.set_search_term(None);
    assert!(model.matches().is_empty());
}

// ============================================================
// Structural changes and notifications
// ============================================================

#[rstest]
fn given_insert_rows_when_observed_then_begin_and_end_bracket_the_change(mut model: TreeModel) {
    let log = EventLog::new();
    model.add_observer(Box::new(log.clone()));

    assert!(model.insert_rows(1, 2, None));
    assert_eq!(model.index_count_rows(None), 3);
    assert_eq!(
        log.events(),
        vec![
            ModelEvent::RowsAboutToBeInserted { parent: None, first: 1, last: 2 },
            ModelEvent::RowsInserted { parent: None, first: 1, last: 2 },
        ]
    );
}

#[rstest]
fn given_observer_when_rows_removed_then_it_sees_old_shape_before_new_shape(mut model: TreeModel) {
    use std::cell::RefCell;
    use std::rc::Rc;

    // Counts are not visible from inside the callback, so record event order only
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    model.add_observer(Box::new(move |event: &ModelEvent| {
        sink.borrow_mut().push(event.is_begin());
    }));

    assert!(model.remove_rows(0, 1, None));
    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[rstest]
fn given_insert_then_remove_at_same_position_then_row_count_unchanged(mut model: TreeModel) {
    let company = model.index(0, 0, None).unwrap();
    let before = model.index_count_rows(Some(&company));

    assert!(model.insert_rows(0, 3, Some(&company)));
    assert_eq!(model.index_count_rows(Some(&company)), before + 3);
    assert!(model.remove_rows(0, 3, Some(&company)));
    assert_eq!(model.index_count_rows(Some(&company)), before);

    let role = model.index(0, 0, Some(&company)).unwrap();
    assert_eq!(model.data(&role, ItemRole::Display), Some(Value::from("Engineer")));
}

#[rstest]
fn given_inserted_column_when_inspecting_rows_then_every_row_widened(mut model: TreeModel) {
    assert!(model.insert_columns(1, 2, None));
    assert_eq!(model.index_count_columns(None), 7);

    let mut indices = Vec::new();
    all_indices(&model, None, &mut indices);
    for (_, idx) in indices {
        assert_eq!(model.item(&idx).unwrap().column_count(), 7);
    }
    let company = model.index(0, 0, None).unwrap();
    assert_eq!(model.data(&company.sibling_column(1), ItemRole::Display), Some(Value::Empty));
    assert_eq!(
        model.data(&company.sibling_column(3), ItemRole::Display),
        Some(Value::from("1 role, 1 interview"))
    );
}

#[rstest]
fn given_widened_tree_when_inserting_rows_then_new_rows_match_width(mut model: TreeModel) {
    assert!(model.insert_columns(5, 1, None));
    assert!(model.insert_rows(0, 1, None));
    let new_row = model.index(0, 5, None).unwrap();
    assert_eq!(model.item(&new_row).unwrap().column_count(), 6);
}

// ============================================================
// Stale indices
// ============================================================

#[rstest]
fn given_removed_company_when_using_old_role_index_then_not_reachable(mut model: TreeModel) {
    let company = model.index(0, 0, None).unwrap();
    let role = model.index(0, 0, Some(&company)).unwrap();

    assert!(model.remove_rows(0, 1, None));
    assert_eq!(model.index_count_rows(None), 0);

    assert_eq!(model.parent_of(&role), None);
    assert_eq!(model.data(&role, ItemRole::Display), None);
    assert_eq!(model.index_count_rows(Some(&company)), 0);
    assert!(!model.set_data(&role, Value::from("x"), ItemRole::Edit));
    assert!(!model.insert_rows(0, 1, Some(&company)));
}

#[rstest]
fn given_reload_when_records_change_then_tree_is_rebuilt_and_reset_reported(mut model: TreeModel) {
    let log = EventLog::new();
    model.add_observer(Box::new(log.clone()));
    let old_company = model.index(0, 0, None).unwrap();

    reload_company_tree(&mut model, &[globex(), acme()], Default::default());

    assert_eq!(model.index_count_rows(None), 2);
    let first = model.index(0, 0, None).unwrap();
    assert_eq!(model.data(&first, ItemRole::Display), Some(Value::from("Globex")));
    assert_eq!(model.item(&old_company), None);
    assert_eq!(
        log.events(),
        vec![ModelEvent::ModelAboutToBeReset, ModelEvent::ModelReset]
    );
}

#[test]
fn given_companies_when_building_tree_then_storage_order_is_kept() {
    let model = company_tree(&["Title"], &[globex(), acme()], Default::default());
    let names: Vec<String> = (0..model.index_count_rows(None))
        .map(|row| title(&model, &model.index(row, 0, None).unwrap()))
        .collect();
    assert_eq!(names, vec!["Globex", "Acme"]);
}
