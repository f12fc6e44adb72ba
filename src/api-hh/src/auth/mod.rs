pub mod handlers;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

pub use handlers::{get_authenticate, post_issue_token, post_logout};
pub use middleware::require_auth;
