//! Flat table models for the edit screens
//!
//! Each table is a one-level [`TreeModel`] whose last column holds the record id.

use generational_arena::Index;
use itertools::Itertools;

use crate::domain::{html_text, Interview, ItemArena, Person, Role, Value};
use crate::model::tree_model::TreeModel;

pub const ROLE_HEADERS: [&str; 5] = ["Title", "Applied", "Employment", "Location", "Description"];
pub const INTERVIEW_HEADERS: [&str; 5] = ["#", "Title", "Type", "Date", "Interviewers"];
pub const PERSON_HEADERS: [&str; 5] = ["Title", "Name", "Role", "Email", "Description"];

/// Column holding the record id in every table.
pub const TABLE_ID_COLUMN: usize = 5;

fn table_headers(visible: &[&str]) -> Vec<String> {
    visible
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once("Id".to_string()))
        .collect()
}

fn append_table_row(items: &mut ItemArena, root: Index, values: Vec<Value>) {
    let columns = items.column_count(root);
    if let Some(row) = items.append_child(root, columns) {
        items.set_row(row, values);
    }
}

fn optional_text(value: &Option<String>) -> Value {
    Value::from(value.clone().unwrap_or_default())
}

pub fn roles_table(roles: &[Role]) -> TreeModel {
    TreeModel::from_records(table_headers(&ROLE_HEADERS), roles, |items, root, role| {
        append_table_row(
            items,
            root,
            vec![
                Value::from(role.title.as_str()),
                Value::from(role.applied_date),
                Value::from(role.employment_type.label()),
                Value::from(role.work_location.label()),
                Value::from(html_text(role.description.as_deref().unwrap_or_default())),
                Value::from(role.uuid.as_str()),
            ],
        )
    })
}

pub fn interviews_table(interviews: &[Interview]) -> TreeModel {
    TreeModel::from_records(
        table_headers(&INTERVIEW_HEADERS),
        interviews,
        |items, root, interview| {
            append_table_row(
                items,
                root,
                vec![
                    Value::from(interview.sequence),
                    Value::from(interview.title.as_str()),
                    Value::from(interview.kind.label()),
                    Value::from(interview.date),
                    Value::from(interview.interviewers.iter().map(|p| &p.name).join(", ")),
                    Value::from(interview.uuid.as_str()),
                ],
            )
        },
    )
}

pub fn persons_table(persons: &[Person]) -> TreeModel {
    TreeModel::from_records(
        table_headers(&PERSON_HEADERS),
        persons,
        |items, root, person| {
            append_table_row(
                items,
                root,
                vec![
                    Value::from(person.title.label()),
                    Value::from(person.name.as_str()),
                    optional_text(&person.role),
                    optional_text(&person.email),
                    optional_text(&person.description),
                    Value::from(person.uuid.as_str()),
                ],
            )
        },
    )
}
