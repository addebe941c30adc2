//! Domain entities: the job-application records handed to the tree model

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Form of address of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PersonTitle {
    #[serde(rename = "Mr")]
    Mr,
    #[serde(rename = "Ms")]
    Ms,
    #[default]
    #[serde(rename = "na", alias = "NA")]
    NotApplicable,
}

impl PersonTitle {
    pub fn label(&self) -> &'static str {
        match self {
            PersonTitle::Mr => "Mr",
            PersonTitle::Ms => "Ms",
            PersonTitle::NotApplicable => "na",
        }
    }
}

/// Kind of interview step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterviewType {
    #[default]
    #[serde(rename = "Recruiter", alias = "recruiter")]
    Recruiter,
    #[serde(rename = "Code technical", alias = "tech_code")]
    TechCode,
    #[serde(rename = "Design technical", alias = "tech_design")]
    TechDesign,
    #[serde(rename = "Recruiting manager", alias = "rec_manager")]
    RecruitingManager,
    #[serde(rename = "Team", alias = "team")]
    Team,
}

impl InterviewType {
    pub fn label(&self) -> &'static str {
        match self {
            InterviewType::Recruiter => "Recruiter",
            InterviewType::TechCode => "Code technical",
            InterviewType::TechDesign => "Design technical",
            InterviewType::RecruitingManager => "Recruiting manager",
            InterviewType::Team => "Team",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkLocation {
    #[serde(rename = "On site", alias = "on_site")]
    OnSite,
    #[default]
    #[serde(rename = "Hybrid", alias = "hybrid")]
    Hybrid,
    #[serde(rename = "Remote", alias = "remote")]
    Remote,
}

impl WorkLocation {
    pub fn label(&self) -> &'static str {
        match self {
            WorkLocation::OnSite => "On site",
            WorkLocation::Hybrid => "Hybrid",
            WorkLocation::Remote => "Remote",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full time", alias = "full_time")]
    FullTime,
    #[serde(rename = "Part time", alias = "part_time")]
    PartTime,
    #[serde(rename = "Contract", alias = "contract")]
    Contract,
}

impl EmploymentType {
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full time",
            EmploymentType::PartTime => "Part time",
            EmploymentType::Contract => "Contract",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(PersonTitle, InterviewType, WorkLocation, EmploymentType);

/// A recruiter or interviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub title: PersonTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One step of the hiring process for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub uuid: String,
    pub sequence: u32,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: InterviewType,
    pub date: NaiveDate,
    #[serde(default)]
    pub interviewers: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A position applied to at a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub uuid: String,
    pub title: String,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub work_location: WorkLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "steps")]
    pub interviews: Vec<Interview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub recruiters: Vec<Person>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Company {
    pub fn interview_count(&self) -> usize {
        self.roles.iter().map(|r| r.interviews.len()).sum()
    }

    /// Most recent applied date across all roles.
    pub fn latest_applied(&self) -> Option<NaiveDate> {
        self.roles.iter().map(|r| r.applied_date).max()
    }
}
