use super::cms::read_upload;
use super::{output, require_login, CommandResult};
use crate::state::AppState;
use crate::types::{ContactMessage, ProfileUpdate};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show your profile, creating an empty one if needed
    Show,
    Update {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        resume: Option<PathBuf>,
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub message: String,
}

pub async fn profile(state: &AppState, cmd: ProfileCommand) -> CommandResult {
    require_login(state).await?;
    let profiles = &state.cms.profiles;
    match cmd {
        ProfileCommand::Show => output(&profiles.mine().await?),
        ProfileCommand::Update {
            phone,
            bio,
            resume,
            avatar,
        } => {
            let update = ProfileUpdate {
                phone,
                bio,
                resume: resume.as_deref().map(read_upload).transpose()?,
                avatar: avatar.as_deref().map(read_upload).transpose()?,
            };
            let id = profiles.mine().await?.id;
            output(&profiles.update(id, &update).await?)
        }
    }
}

pub async fn contact(state: &AppState, args: ContactArgs) -> CommandResult {
    let message = ContactMessage {
        name: args.name,
        email: args.email,
        message: args.message,
    };
    output(&state.cms.site.contact(&message).await?)
}
