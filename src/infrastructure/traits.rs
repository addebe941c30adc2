//! Record source boundary
//!
//! The tree model never reads storage itself; services receive records through
//! this trait, so tests can hand in plain vectors.

use crate::application::ApplicationResult;
use crate::domain::{Company, DomainError};

/// Access to stored companies.
pub trait CompanyRepository {
    /// All companies in storage order.
    fn companies(&self) -> ApplicationResult<Vec<Company>>;

    /// Company with the given id, if any.
    fn company_by_id(&self, id: &str) -> ApplicationResult<Option<Company>> {
        Ok(self.companies()?.into_iter().find(|c| c.uuid == id))
    }

    /// Stores a new company after the existing ones and returns it as stored.
    ///
    /// An empty `uuid` is replaced by a fresh id.
    fn save_company(&mut self, company: &Company) -> ApplicationResult<Company>;

    /// Replaces the stored company that has the same `uuid`.
    fn update_company(&mut self, company: &Company) -> ApplicationResult<()>;

    /// Removes one recruiter from a company.
    fn delete_recruiter(&mut self, person_id: &str, company_id: &str) -> ApplicationResult<()> {
        let mut company = self
            .company_by_id(company_id)?
            .ok_or_else(|| DomainError::CompanyNotFound(company_id.to_string()))?;
        let before = company.recruiters.len();
        company.recruiters.retain(|p| p.uuid != person_id);
        if company.recruiters.len() == before {
            return Err(DomainError::PersonNotFound(person_id.to_string()).into());
        }
        self.update_company(&company)
    }
}

impl CompanyRepository for Vec<Company> {
    fn companies(&self) -> ApplicationResult<Vec<Company>> {
        Ok(self.clone())
    }

    fn save_company(&mut self, company: &Company) -> ApplicationResult<Company> {
        let mut stored = company.clone();
        if stored.uuid.is_empty() {
            stored.uuid = uuid::Uuid::new_v4().to_string();
        }
        self.push(stored.clone());
        Ok(stored)
    }

    fn update_company(&mut self, company: &Company) -> ApplicationResult<()> {
        let slot = self
            .iter_mut()
            .find(|c| c.uuid == company.uuid)
            .ok_or_else(|| DomainError::CompanyNotFound(company.uuid.clone()))?;
        *slot = company.clone();
        Ok(())
    }
}
