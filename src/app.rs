use crate::commands::{self, Cli};
use crate::routes::Route;
use crate::settings::Settings;
use crate::state::AppState;
use crate::telemetry::init_telemetry;

const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Loads configuration, runs one command and prints its result as JSON.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
  let dotenv = dotenvy::dotenv().ok();
  let settings = Settings::load(cli.overrides())?;
  init_telemetry(settings.log_format);
  if let Some(path) = dotenv {
    tracing::debug!(path = %path.display(), "loaded .env");
  }

  let (state, mut nav) = AppState::new(settings)?;
  let result = commands::execute(&state, cli.command).await;

  while let Ok(route) = nav.try_recv() {
    if route == Route::Login {
      eprintln!("{SESSION_EXPIRED}");
    } else {
      tracing::debug!(route = route.path(), "navigation request ignored");
    }
  }

  let value = result?;
  println!("{}", serde_json::to_string_pretty(&value)?);
  Ok(())
}
