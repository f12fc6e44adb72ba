use std::env;

/// Where the process is deployed. Controls the session cookie's
/// Secure/SameSite flags: cross-site cookies for the hosted frontend in
/// production, strict same-site during local development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    Production,
    Development,
}

impl DeployMode {
    /// Reads APP_ENV; anything other than "production" is development.
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(v) if v.trim().eq_ignore_ascii_case("production") => DeployMode::Production,
            _ => DeployMode::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, DeployMode::Production)
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret for session tokens.
    pub token_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_seconds: u64,
    pub deploy_mode: DeployMode,
}

/// Get authentication configuration.
/// Panics if the required signing secret is missing.
pub fn get_auth_config() -> AuthConfig {
    let token_secret = env::var("ACCESS_TOKEN_SECRET").expect(
        "ACCESS_TOKEN_SECRET environment variable is required. \
         Generate a secret with: openssl rand -base64 32",
    );

    let token_ttl_seconds = env::var("TOKEN_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(3600); // Default: 1 hour

    AuthConfig {
        token_secret,
        token_ttl_seconds,
        deploy_mode: DeployMode::from_env(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Use a mutex to ensure tests that modify env vars run serially
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_deploy_mode_default_is_development() {
        let _guard = TEST_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var("APP_ENV");
        }
        assert_eq!(DeployMode::from_env(), DeployMode::Development);
    }

    #[test]
    fn test_deploy_mode_production() {
        let _guard = TEST_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("APP_ENV", "production");
        }
        assert_eq!(DeployMode::from_env(), DeployMode::Production);
        assert!(DeployMode::from_env().is_production());
        unsafe {
            env::remove_var("APP_ENV");
        }
    }

    #[test]
    fn test_deploy_mode_other_values_are_development() {
        let _guard = TEST_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("APP_ENV", "staging");
        }
        assert_eq!(DeployMode::from_env(), DeployMode::Development);
        unsafe {
            env::remove_var("APP_ENV");
        }
    }

    #[test]
    fn test_get_auth_config_defaults_ttl() {
        let _guard = TEST_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("ACCESS_TOKEN_SECRET", "test_secret");
            env::remove_var("TOKEN_TTL_SECONDS");
        }
        let config = get_auth_config();
        assert_eq!(config.token_secret, "test_secret");
        assert_eq!(config.token_ttl_seconds, 3600);
        unsafe {
            env::remove_var("ACCESS_TOKEN_SECRET");
        }
    }
}
