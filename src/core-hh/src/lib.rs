pub mod common;

pub use common::auth_config::{AuthConfig, DeployMode, get_auth_config};
pub use common::db_env::{get_database_url, get_db_pool};
pub use common::env_check::check_non_empty_env_vars;
pub use common::health::{health_check, liveness};
pub use common::hostname::{HostPortError, get_api_base_url, get_cors_origin};
pub use common::logging::setup_logging;
