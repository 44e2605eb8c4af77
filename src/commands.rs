mod auth;
mod cms;
mod site;

use crate::guard::{self, Access};
use crate::routes::Route;
use crate::settings::{SettingsOverrides, TokenStorage};
use crate::state::AppState;
use crate::types::User;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

pub use auth::RegisterArgs;
pub use cms::{ApplicationsCommand, CompanyCommand, JobsCommand, TeamCommand, UsersCommand};
pub use site::{ContactArgs, ProfileCommand};

pub type CommandResult = anyhow::Result<Value>;

#[derive(Parser, Debug)]
#[command(
  name = "saxansaxo",
  version,
  about = "Saxansaxo Technology console: the public site and the CMS from a terminal"
)]
pub struct Cli {
  /// API base URL, e.g. https://api.saxansaxo.com/api
  #[arg(long, global = true)]
  pub api_url: Option<String>,

  /// Where the session tokens are kept: keyring, file or memory
  #[arg(long, global = true)]
  pub token_storage: Option<TokenStorage>,

  /// Directory holding the settings and session files
  #[arg(long, global = true)]
  pub config_dir: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

impl Cli {
  pub fn overrides(&self) -> SettingsOverrides {
    SettingsOverrides {
      api_url: self.api_url.clone(),
      token_storage: self.token_storage,
      config_dir: self.config_dir.clone(),
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Sign in and store the session tokens
  Login {
    username: String,
    #[arg(long, env = "SAXANSAXO_PASSWORD", hide_env_values = true)]
    password: String,
  },

  /// Create an account and sign in
  Register(RegisterArgs),

  /// Forget the stored session
  Logout,

  /// Show the signed-in user
  Whoami,

  /// Job openings (changes need an administrator)
  Jobs {
    #[command(subcommand)]
    cmd: JobsCommand,
  },

  /// Team members (changes need an administrator)
  Team {
    #[command(subcommand)]
    cmd: TeamCommand,
  },

  /// Job applications
  Applications {
    #[command(subcommand)]
    cmd: ApplicationsCommand,
  },

  /// User accounts (administrators only)
  Users {
    #[command(subcommand)]
    cmd: UsersCommand,
  },

  /// Company information
  Company {
    #[command(subcommand)]
    cmd: CompanyCommand,
  },

  /// Your own profile
  Profile {
    #[command(subcommand)]
    cmd: ProfileCommand,
  },

  /// Services offered
  Services,

  /// Send a message through the contact form
  Contact(ContactArgs),

  /// Check that the API is up
  Health,
}

pub async fn execute(state: &AppState, command: Command) -> CommandResult {
  match command {
    Command::Login { username, password } => auth::login(state, &username, &password).await,
    Command::Register(args) => auth::register(state, args).await,
    Command::Logout => auth::logout(state).await,
    Command::Whoami => auth::whoami(state).await,
    Command::Jobs { cmd } => cms::jobs(state, cmd).await,
    Command::Team { cmd } => cms::team(state, cmd).await,
    Command::Applications { cmd } => cms::applications(state, cmd).await,
    Command::Users { cmd } => cms::users(state, cmd).await,
    Command::Company { cmd } => cms::company(state, cmd).await,
    Command::Profile { cmd } => site::profile(state, cmd).await,
    Command::Services => output(&state.cms.site.services().await?),
    Command::Contact(args) => site::contact(state, args).await,
    Command::Health => output(&state.cms.site.health().await?),
  }
}

fn output<T: Serialize + ?Sized>(value: &T) -> CommandResult {
  Ok(serde_json::to_value(value)?)
}

fn message(text: &str) -> CommandResult {
  Ok(json!({ "message": text }))
}

/// Resolves the stored session and applies the page guard for `route`.
async fn require(state: &AppState, route: Route) -> anyhow::Result<User> {
  let user = state.auth.bootstrap().await;
  match (guard::check(route, user.as_ref()), user) {
    (Access::Granted, Some(user)) => Ok(user),
    (Access::Granted, None) | (Access::Redirect(Route::Login), _) => {
      anyhow::bail!("Please log in to continue.")
    }
    (Access::Redirect(_), _) => anyhow::bail!("Administrator privileges required."),
  }
}

async fn require_login(state: &AppState) -> anyhow::Result<User> {
  require(state, Route::Profile).await
}

async fn require_admin(state: &AppState) -> anyhow::Result<User> {
  require(state, Route::Cms).await
}
