use super::{message, output, CommandResult};
use crate::state::AppState;
use crate::types::RegisterPayload;
use clap::Args;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "SAXANSAXO_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Repeat the password
    #[arg(long = "confirm-password")]
    pub password2: String,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
}

impl From<RegisterArgs> for RegisterPayload {
    fn from(args: RegisterArgs) -> Self {
        Self {
            username: args.username.trim().to_string(),
            email: args.email.trim().to_string(),
            password: args.password,
            password2: args.password2,
            first_name: args.first_name,
            last_name: args.last_name,
        }
    }
}

pub async fn login(state: &AppState, username: &str, password: &str) -> CommandResult {
    let user = state.auth.login(username.trim(), password).await?;
    output(&user)
}

pub async fn register(state: &AppState, args: RegisterArgs) -> CommandResult {
    let user = state.auth.register(&args.into()).await?;
    output(&user)
}

pub async fn logout(state: &AppState) -> CommandResult {
    state.auth.logout().await?;
    message("Logged out")
}

pub async fn whoami(state: &AppState) -> CommandResult {
    match state.auth.bootstrap().await {
        Some(user) => output(&user),
        None => anyhow::bail!("Not logged in."),
    }
}
