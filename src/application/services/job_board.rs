//! Job board service: records from the repository, shaped into view models

use tracing::{debug, instrument};

use crate::application::ordering::sort_recent_first;
use crate::application::ApplicationResult;
use crate::domain::{Company, DomainError, Interview, Role};
use crate::infrastructure::CompanyRepository;
use crate::model::{
    company_tree, interviews_table, persons_table, reload_company_tree, roles_table,
    FlattenOptions, ModelIndex, TreeModel,
};

/// Presentation-independent options of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardOptions {
    pub flatten: FlattenOptions,
    pub sort_recent_first: bool,
}

/// Builds tree and table models from stored records.
///
/// Models are rebuilt from the repository on every call; nothing is cached.
pub struct JobBoard<R: CompanyRepository> {
    repository: R,
    options: BoardOptions,
}

impl<R: CompanyRepository> JobBoard<R> {
    pub fn new(repository: R, options: BoardOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    pub fn options(&self) -> BoardOptions {
        self.options
    }

    /// All companies, ordered per the board options.
    #[instrument(level = "debug", skip(self))]
    pub fn companies(&self) -> ApplicationResult<Vec<Company>> {
        let mut companies = self.repository.companies()?;
        if self.options.sort_recent_first {
            sort_recent_first(&mut companies);
        }
        Ok(companies)
    }

    pub fn company_tree<S: AsRef<str>>(&self, headers: &[S]) -> ApplicationResult<TreeModel> {
        let companies = self.companies()?;
        Ok(company_tree(headers, &companies, self.options.flatten))
    }

    /// Rebuilds `model` from the current repository contents.
    pub fn reload(&self, model: &mut TreeModel) -> ApplicationResult<()> {
        let companies = self.companies()?;
        reload_company_tree(model, &companies, self.options.flatten);
        Ok(())
    }

    fn company(&self, company_id: &str) -> ApplicationResult<Company> {
        self.repository
            .company_by_id(company_id)?
            .ok_or_else(|| DomainError::CompanyNotFound(company_id.to_string()).into())
    }

    fn role(&self, role_id: &str) -> ApplicationResult<Role> {
        self.companies()?
            .into_iter()
            .flat_map(|c| c.roles)
            .find(|r| r.uuid == role_id)
            .ok_or_else(|| DomainError::RoleNotFound(role_id.to_string()).into())
    }

    fn interview(&self, interview_id: &str) -> ApplicationResult<Interview> {
        self.companies()?
            .into_iter()
            .flat_map(|c| c.roles)
            .flat_map(|r| r.interviews)
            .find(|i| i.uuid == interview_id)
            .ok_or_else(|| DomainError::InterviewNotFound(interview_id.to_string()).into())
    }

    pub fn roles(&self, company_id: &str) -> ApplicationResult<TreeModel> {
        let mut company = self.company(company_id)?;
        if self.options.sort_recent_first {
            sort_recent_first(std::slice::from_mut(&mut company));
        }
        Ok(roles_table(&company.roles))
    }

    pub fn recruiters(&self, company_id: &str) -> ApplicationResult<TreeModel> {
        Ok(persons_table(&self.company(company_id)?.recruiters))
    }

    pub fn interviews(&self, role_id: &str) -> ApplicationResult<TreeModel> {
        Ok(interviews_table(&self.role(role_id)?.interviews))
    }

    pub fn interviewers(&self, interview_id: &str) -> ApplicationResult<TreeModel> {
        Ok(persons_table(&self.interview(interview_id)?.interviewers))
    }

    #[instrument(level = "debug", skip(self, company), fields(name = %company.name))]
    pub fn save_company(&mut self, company: &Company) -> ApplicationResult<Company> {
        self.repository.save_company(company)
    }

    #[instrument(level = "debug", skip(self, company), fields(uuid = %company.uuid))]
    pub fn update_company(&mut self, company: &Company) -> ApplicationResult<()> {
        self.repository.update_company(company)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_recruiter(&mut self, person_id: &str, company_id: &str) -> ApplicationResult<()> {
        self.repository.delete_recruiter(person_id, company_id)
    }

    /// Company tree with `term` highlighted, plus every matching cell.
    #[instrument(level = "debug", skip(self, headers))]
    pub fn search<S: AsRef<str>>(
        &self,
        headers: &[S],
        term: &str,
    ) -> ApplicationResult<(TreeModel, Vec<ModelIndex>)> {
        let mut model = self.company_tree(headers)?;
        model.set_search_term(Some(term));
        let matches = model.matches();
        debug!("search '{}': {} matching cells", term, matches.len());
        Ok((model, matches))
    }
}
