//! Flattening of the company → role → interview hierarchy into tree rows
//!
//! Every row of the company tree has the same five columns: a label, a detail
//! summary, a people summary, and two hidden columns carrying the record id and
//! the row kind. Rows are appended in record order; ordering is the caller's job.

use generational_arena::Index;
use itertools::Itertools;
use tracing::instrument;

use crate::domain::{Company, Interview, ItemArena, Person, Role, RowKind, Value};
use crate::model::index::ModelIndex;
use crate::model::tree_model::TreeModel;

pub const TITLE_COLUMN: usize = 0;
pub const DETAILS_COLUMN: usize = 1;
pub const PEOPLE_COLUMN: usize = 2;
pub const ID_COLUMN: usize = 3;
pub const KIND_COLUMN: usize = 4;

/// Number of columns the caller sees; the id and kind columns are hidden.
pub const VISIBLE_COLUMNS: usize = 3;

const HIDDEN_HEADERS: [&str; 2] = ["Id", "Type"];

/// Knobs of the company tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlattenOptions {
    /// Append each interviewer's role label: `Bob (CTO)`
    pub interviewer_roles: bool,
    /// Add interviewers as PERSON rows under their interview
    pub person_rows: bool,
}

/// Full header row for the company tree from the caller's visible labels.
///
/// Missing visible labels are left blank, extra ones are dropped, and the hidden
/// id and kind headers are appended.
pub fn company_tree_headers<S: AsRef<str>>(visible: &[S]) -> Vec<String> {
    let mut headers: Vec<String> = visible
        .iter()
        .take(VISIBLE_COLUMNS)
        .map(|s| s.as_ref().to_string())
        .collect();
    headers.resize(VISIBLE_COLUMNS, String::new());
    headers.extend(HIDDEN_HEADERS.iter().map(|s| s.to_string()));
    headers
}

/// Builds the company tree model.
#[instrument(level = "debug", skip(headers, companies))]
pub fn company_tree<S: AsRef<str>>(
    headers: &[S],
    companies: &[Company],
    options: FlattenOptions,
) -> TreeModel {
    TreeModel::from_records(
        company_tree_headers(headers),
        companies,
        |items, root, company| {
            insert_company(items, root, company, options);
        },
    )
}

/// Rebuilds an existing company tree from fresh records.
pub fn reload_company_tree(model: &mut TreeModel, companies: &[Company], options: FlattenOptions) {
    model.reset_with(|items, root| {
        for company in companies {
            insert_company(items, root, company, options);
        }
    });
}

fn append_row(items: &mut ItemArena, parent: Index, values: Vec<Value>) -> Option<Index> {
    let columns = items.column_count(items.root());
    let row = items.append_child(parent, columns)?;
    items.set_row(row, values);
    Some(row)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn person_label(person: &Person, with_role: bool) -> String {
    match (&person.role, with_role) {
        (Some(role), true) if !role.is_empty() => format!("{} ({})", person.name, role),
        _ => person.name.clone(),
    }
}

fn join_people(people: &[Person], with_role: bool) -> String {
    people.iter().map(|p| person_label(p, with_role)).join(", ")
}

pub fn insert_company(
    items: &mut ItemArena,
    parent: Index,
    company: &Company,
    options: FlattenOptions,
) -> Option<Index> {
    let details = format!(
        "{}, {}",
        plural(company.roles.len(), "role"),
        plural(company.interview_count(), "interview")
    );
    let row = append_row(
        items,
        parent,
        vec![
            Value::from(company.name.as_str()),
            Value::from(details),
            Value::from(join_people(&company.recruiters, false)),
            Value::from(company.uuid.as_str()),
            Value::from(RowKind::Company),
        ],
    )?;
    for role in &company.roles {
        insert_role(items, row, role, options);
    }
    Some(row)
}

pub fn insert_role(
    items: &mut ItemArena,
    parent: Index,
    role: &Role,
    options: FlattenOptions,
) -> Option<Index> {
    let descriptors = format!("{}, {}", role.employment_type, role.work_location);
    let details = format!(
        "Applied {} ({})",
        role.applied_date.format("%Y-%m-%d"),
        descriptors
    );
    let row = append_row(
        items,
        parent,
        vec![
            Value::from(role.title.as_str()),
            Value::from(details),
            Value::from(descriptors),
            Value::from(role.uuid.as_str()),
            Value::from(RowKind::Role),
        ],
    )?;
    for interview in &role.interviews {
        insert_interview(items, row, interview, options);
    }
    Some(row)
}

pub fn insert_interview(
    items: &mut ItemArena,
    parent: Index,
    interview: &Interview,
    options: FlattenOptions,
) -> Option<Index> {
    let row = append_row(
        items,
        parent,
        vec![
            Value::from(format!("{}. {}", interview.sequence, interview.title)),
            Value::from(format!(
                "{} {}",
                interview.date.format("%Y-%m-%d"),
                interview.kind
            )),
            Value::from(join_people(&interview.interviewers, options.interviewer_roles)),
            Value::from(interview.uuid.as_str()),
            Value::from(RowKind::Interview),
        ],
    )?;
    if options.person_rows {
        for person in &interview.interviewers {
            insert_person(items, row, person);
        }
    }
    Some(row)
}

pub fn insert_person(items: &mut ItemArena, parent: Index, person: &Person) -> Option<Index> {
    append_row(
        items,
        parent,
        vec![
            Value::from(person.name.as_str()),
            Value::from(person.role.clone().unwrap_or_default()),
            Value::from(person.email.clone().unwrap_or_default()),
            Value::from(person.uuid.as_str()),
            Value::from(RowKind::Person),
        ],
    )
}

/// Kind of the row an index points at.
pub fn row_kind(model: &TreeModel, index: &ModelIndex) -> Option<RowKind> {
    model.item(index)?.data(KIND_COLUMN)?.as_tag()
}

/// Record id of the row an index points at.
pub fn record_id<'a>(model: &'a TreeModel, index: &ModelIndex) -> Option<&'a str> {
    model.item(index)?.data(ID_COLUMN)?.as_text()
}
