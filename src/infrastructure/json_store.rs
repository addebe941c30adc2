//! JSON document store
//!
//! The store file holds one table of company documents keyed by document id:
//!
//! ```json
//! { "companies": { "1": { "uuid": "...", "name": "Acme", "roles": [] } } }
//! ```
//!
//! Documents are returned in ascending numeric key order. Records stored
//! without a `uuid` get an id derived from their position in the document
//! (document key plus array path), so the same record keeps the same id on
//! every load. Writing a document back persists those ids.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as Json};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::{ApplicationError, ApplicationResult, ResultExt};
use crate::domain::{Company, DomainError};
use crate::infrastructure::traits::CompanyRepository;

const COMPANIES_TABLE: &str = "companies";

/// Nested record arrays that carry their own ids.
const CHILD_ARRAYS: [&str; 5] = ["recruiters", "roles", "interviews", "steps", "interviewers"];

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> ApplicationResult<Json> {
        if !self.path.exists() {
            return Err(ApplicationError::StoreNotFound(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path).with_path_context("read store", &self.path)?;
        serde_json::from_str(&content).with_path_context("parse store", &self.path)
    }

    fn write_document(&self, document: &Json) -> ApplicationResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_path_context("create store directory", parent)?;
        }
        let content =
            serde_json::to_string_pretty(document).with_path_context("serialize store", &self.path)?;
        fs::write(&self.path, content).with_path_context("write store", &self.path)
    }

    /// The companies table of `document`, created when absent.
    fn table_mut<'a>(&self, document: &'a mut Json) -> ApplicationResult<&'a mut Map<String, Json>> {
        let not_a_table = || ApplicationError::OperationFailed {
            context: format!("parse store: {}", self.path.display()),
            source: format!("'{}' is not a table", COMPANIES_TABLE).into(),
        };
        let Json::Object(root) = document else {
            return Err(not_a_table());
        };
        let table = root
            .entry(COMPANIES_TABLE)
            .or_insert_with(|| Json::Object(Map::new()));
        if table.is_null() {
            *table = Json::Object(Map::new());
        }
        table.as_object_mut().ok_or_else(not_a_table)
    }

    /// Company documents sorted by key, with ids filled in.
    fn read_entries(&self) -> ApplicationResult<Vec<(String, Json)>> {
        let mut document = self.read_document()?;
        let mut entries: Vec<(String, Json)> = self
            .table_mut(&mut document)?
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        entries.sort_by_key(|(key, _)| document_order(key));
        for (key, record) in entries.iter_mut() {
            assign_missing_ids(record, key);
        }
        Ok(entries)
    }

    fn to_document(&self, company: &Company) -> ApplicationResult<Json> {
        serde_json::to_value(company).with_path_context("serialize company", &self.path)
    }
}

/// Sort key of a document id: numeric ids in numeric order, others after them.
fn document_order(key: &str) -> (u64, String) {
    (key.parse().unwrap_or(u64::MAX), key.to_string())
}

/// Key for a document appended to `table`: one past the largest numeric key.
fn next_document_key(table: &Map<String, Json>) -> String {
    let last = table.keys().filter_map(|k| k.parse::<u64>().ok()).max();
    last.map_or(1, |n| n + 1).to_string()
}

/// Id of a record stored without one, stable for a given location in the store.
fn derived_id(location: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("nextjob:{}", location).as_bytes()).to_string()
}

/// Fills missing `uuid` fields of the record at `location` and all nested records.
fn assign_missing_ids(record: &mut Json, location: &str) {
    let Json::Object(fields) = record else {
        return;
    };
    let missing = fields
        .get("uuid")
        .and_then(Json::as_str)
        .map_or(true, str::is_empty);
    if missing {
        fields.insert("uuid".into(), Json::String(derived_id(location)));
    }
    for key in CHILD_ARRAYS {
        if let Some(Json::Array(children)) = fields.get_mut(key) {
            for (position, child) in children.iter_mut().enumerate() {
                assign_missing_ids(child, &format!("{}/{}/{}", location, key, position));
            }
        }
    }
}

impl CompanyRepository for JsonStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn companies(&self) -> ApplicationResult<Vec<Company>> {
        let companies = self
            .read_entries()?
            .into_iter()
            .map(|(key, document)| {
                serde_json::from_value::<Company>(document)
                    .with_path_context(&format!("parse company document {}", key), &self.path)
            })
            .collect::<ApplicationResult<Vec<_>>>()?;
        debug!("loaded {} companies", companies.len());
        Ok(companies)
    }

    /// Appends the company under the next numeric key; a missing store file is created.
    #[instrument(level = "debug", skip(self, company), fields(name = %company.name))]
    fn save_company(&mut self, company: &Company) -> ApplicationResult<Company> {
        let mut document = match self.read_document() {
            Err(ApplicationError::StoreNotFound(_)) => Json::Object(Map::new()),
            other => other?,
        };
        let mut stored = company.clone();
        if stored.uuid.is_empty() {
            stored.uuid = Uuid::new_v4().to_string();
        }
        let record = self.to_document(&stored)?;

        let table = self.table_mut(&mut document)?;
        let key = next_document_key(table);
        table.insert(key.clone(), record);
        self.write_document(&document)?;
        debug!("saved company {} as document {}", stored.uuid, key);
        Ok(stored)
    }

    #[instrument(level = "debug", skip(self, company), fields(uuid = %company.uuid))]
    fn update_company(&mut self, company: &Company) -> ApplicationResult<()> {
        let key = self
            .read_entries()?
            .into_iter()
            .find(|(_, record)| record.get("uuid").and_then(Json::as_str) == Some(company.uuid.as_str()))
            .map(|(key, _)| key)
            .ok_or_else(|| DomainError::CompanyNotFound(company.uuid.clone()))?;

        let record = self.to_document(company)?;
        let mut document = self.read_document()?;
        self.table_mut(&mut document)?.insert(key.clone(), record);
        self.write_document(&document)?;
        debug!("updated document {}", key);
        Ok(())
    }
}
