//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Job application tracker: companies, roles, interviews and the people involved
#[derive(Parser, Debug)]
#[command(name = "nextjob")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Record store (default: from settings)
    #[arg(long, global = true, env = "NEXTJOB_DB", value_hint = ValueHint::FilePath)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show companies, roles and interviews as a tree
    Tree {
        /// Also show the hidden id and type columns
        #[arg(long)]
        ids: bool,
    },

    /// List the roles applied to at a company
    Roles {
        /// Company id
        company_id: String,
    },

    /// List the recruiters of a company
    Recruiters {
        /// Company id
        company_id: String,
    },

    /// List the interviews of a role
    Interviews {
        /// Role id
        role_id: String,
    },

    /// List the interviewers of an interview
    People {
        /// Interview id
        interview_id: String,
    },

    /// Add a company to the record store
    AddCompany {
        /// Company name
        name: String,

        /// Company website
        #[arg(long)]
        website: Option<String>,
    },

    /// Remove a recruiter from a company
    RemoveRecruiter {
        /// Company id
        company_id: String,
        /// Recruiter id
        person_id: String,
    },

    /// Find rows containing a term
    Search {
        /// Case-insensitive search term
        term: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file location
    Path,
}
