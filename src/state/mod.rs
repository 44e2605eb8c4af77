mod app_state;
mod nav_bus;
mod secret_manager;
mod session;
mod token_store;

pub use app_state::AppState;
pub use nav_bus::NavBus;
pub use secret_manager::SecretManager;
pub use session::{Session, KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN};
pub use token_store::{MemoryTokenStore, StoreError, TokenStore};
