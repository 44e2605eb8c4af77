use super::{message, output, require_admin, require_login, CommandResult};
use crate::state::AppState;
use crate::types::{
    ApplicationStatus, ApplicationSubmission, CompanyUpdate, JobInput, JobType, StatusUpdate,
    TeamMemberInput, Upload, UserUpdate,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

pub(super) fn read_upload(path: &Path) -> anyhow::Result<Upload> {
    Upload::from_path(path).with_context(|| format!("cannot read {}", path.display()))
}

#[derive(Args, Debug, Default)]
pub struct JobArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// full-time, part-time, contract or internship
    #[arg(long)]
    pub job_type: Option<JobType>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub requirements: Option<String>,
    #[arg(long)]
    pub responsibilities: Option<String>,
    #[arg(long)]
    pub salary_range: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
}

impl From<JobArgs> for JobInput {
    fn from(args: JobArgs) -> Self {
        Self {
            title: args.title,
            department: args.department,
            location: args.location,
            job_type: args.job_type,
            description: args.description,
            requirements: args.requirements,
            responsibilities: args.responsibilities,
            salary_range: args.salary_range,
            is_active: args.active,
            application_deadline: args.deadline,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum JobsCommand {
    List,
    Create(JobArgs),
    Update {
        id: i64,
        #[command(flatten)]
        job: JobArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct TeamArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub linkedin: Option<String>,
    #[arg(long)]
    pub twitter: Option<String>,
    #[arg(long)]
    pub github: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub order: Option<i32>,
    /// Portrait to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl TeamArgs {
    fn into_input(self) -> anyhow::Result<TeamMemberInput> {
        let image = self.image.as_deref().map(read_upload).transpose()?;
        Ok(TeamMemberInput {
            name: self.name,
            position: self.position,
            bio: self.bio,
            email: self.email,
            linkedin: self.linkedin,
            twitter: self.twitter,
            github: self.github,
            is_active: self.active,
            order: self.order,
            image,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    List,
    Create(TeamArgs),
    Update {
        id: i64,
        #[command(flatten)]
        member: TeamArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ApplicationsCommand {
    /// Every application for administrators, your own otherwise
    List,
    /// Apply for a job
    Apply {
        job: i64,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        cover_letter: String,
        /// PDF, DOC or DOCX, at most 5MB
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Move an application to pending, reviewing, shortlisted, rejected or accepted
    Status {
        id: i64,
        status: String,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        staff: Option<bool>,
        #[arg(long)]
        superuser: Option<bool>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommand {
    Show,
    Update {
        /// Defaults to the record returned by `company show`
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        about: Option<String>,
        #[arg(long)]
        mission: Option<String>,
        #[arg(long)]
        vision: Option<String>,
    },
}

pub async fn jobs(state: &AppState, cmd: JobsCommand) -> CommandResult {
    let jobs = &state.cms.jobs;
    match cmd {
        JobsCommand::List => output(&jobs.list().await?),
        JobsCommand::Create(args) => {
            require_admin(state).await?;
            output(&jobs.create(&args.into()).await?)
        }
        JobsCommand::Update { id, job } => {
            require_admin(state).await?;
            output(&jobs.update(id, &job.into()).await?)
        }
        JobsCommand::Delete { id } => {
            require_admin(state).await?;
            jobs.delete(id).await?;
            message("Job deleted")
        }
    }
}

pub async fn team(state: &AppState, cmd: TeamCommand) -> CommandResult {
    let team = &state.cms.team;
    match cmd {
        TeamCommand::List => output(&team.list().await?),
        TeamCommand::Create(args) => {
            require_admin(state).await?;
            output(&team.create(&args.into_input()?).await?)
        }
        TeamCommand::Update { id, member } => {
            require_admin(state).await?;
            output(&team.update(id, &member.into_input()?).await?)
        }
        TeamCommand::Delete { id } => {
            require_admin(state).await?;
            team.delete(id).await?;
            message("Team member deleted")
        }
    }
}

pub async fn applications(state: &AppState, cmd: ApplicationsCommand) -> CommandResult {
    let applications = &state.cms.applications;
    match cmd {
        ApplicationsCommand::List => {
            require_login(state).await?;
            output(&applications.list().await?)
        }
        ApplicationsCommand::Apply {
            job,
            first_name,
            last_name,
            email,
            phone,
            cover_letter,
            resume,
        } => {
            require_login(state).await?;
            let submission = ApplicationSubmission {
                job,
                first_name,
                last_name,
                email,
                phone,
                cover_letter,
                resume: resume.as_deref().map(read_upload).transpose()?,
            };
            output(&applications.submit(&submission).await?)
        }
        ApplicationsCommand::Status { id, status, notes } => {
            let status: ApplicationStatus = status.parse().map_err(anyhow::Error::msg)?;
            require_admin(state).await?;
            let update = StatusUpdate {
                status,
                notes: notes.filter(|n| !n.trim().is_empty()),
            };
            let response = applications.update_status(id, &update).await?;
            output(&response.application)
        }
    }
}

pub async fn users(state: &AppState, cmd: UsersCommand) -> CommandResult {
    require_admin(state).await?;
    match cmd {
        UsersCommand::List => output(&state.cms.users.list().await?),
        UsersCommand::Update {
            id,
            username,
            email,
            first_name,
            last_name,
            staff,
            superuser,
        } => {
            let update = UserUpdate {
                username,
                email,
                first_name,
                last_name,
                is_staff: staff,
                is_superuser: superuser,
            };
            output(&state.cms.users.update(id, &update).await?)
        }
    }
}

pub async fn company(state: &AppState, cmd: CompanyCommand) -> CommandResult {
    let company = &state.cms.company;
    match cmd {
        CompanyCommand::Show => output(&company.get().await?),
        CompanyCommand::Update {
            id,
            name,
            email,
            phone,
            address,
            about,
            mission,
            vision,
        } => {
            require_admin(state).await?;
            let id = match id {
                Some(id) => Some(id),
                None => company.get().await.ok().and_then(|c| c.id),
            };
            let update = CompanyUpdate {
                name,
                email,
                phone,
                address,
                about,
                mission,
                vision,
            };
            output(&company.update(id, &update).await?)
        }
    }
}
