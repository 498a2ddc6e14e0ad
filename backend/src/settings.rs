//! Server settings loaded via OrthoConfig.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! configuration file, `GRADEBOOK_*` environment variables and command-line
//! flags (`--port 8080`).

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "students.db";
const DEFAULT_POOL_SIZE: u32 = 5;

/// Configuration values for the records server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GRADEBOOK")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// SQLite database path or URI.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_size: Option<u32>,
    /// Insert a placeholder student when the roster is empty at startup.
    #[ortho_config(default = false)]
    pub seed_example_student: bool,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 5000.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured database location.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Return the configured pool size.
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Resolve the bind address.
    ///
    /// # Errors
    ///
    /// Returns an error when the host is not an IP address literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip = self.host().parse()?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "GRADEBOOK_HOST",
        "GRADEBOOK_PORT",
        "GRADEBOOK_DATABASE_URL",
        "GRADEBOOK_POOL_SIZE",
        "GRADEBOOK_SEED_EXAMPLE_STUDENT",
    ];

    fn load(args: &[&str]) -> ServerSettings {
        let argv = std::iter::once(OsString::from("gradebook"))
            .chain(args.iter().map(OsString::from));
        ServerSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load(&[]);
        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.port(), 5000);
        assert_eq!(settings.database_url(), "students.db");
        assert_eq!(settings.pool_size(), 5);
        assert!(!settings.seed_example_student);
        assert_eq!(
            settings.bind_addr().expect("default host parses"),
            "0.0.0.0:5000".parse().expect("literal address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("GRADEBOOK_HOST", Some("127.0.0.1".to_owned())),
            ("GRADEBOOK_PORT", Some("8088".to_owned())),
            ("GRADEBOOK_DATABASE_URL", Some("/tmp/grades.db".to_owned())),
            ("GRADEBOOK_POOL_SIZE", Some("2".to_owned())),
            ("GRADEBOOK_SEED_EXAMPLE_STUDENT", Some("true".to_owned())),
        ]);

        let settings = load(&[]);
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 8088);
        assert_eq!(settings.database_url(), "/tmp/grades.db");
        assert_eq!(settings.pool_size(), 2);
        assert!(settings.seed_example_student);
    }

    #[rstest]
    fn command_line_flags_override_environment() {
        let _guard = lock_env([
            ("GRADEBOOK_HOST", None::<String>),
            ("GRADEBOOK_PORT", Some("8088".to_owned())),
            ("GRADEBOOK_DATABASE_URL", None),
            ("GRADEBOOK_POOL_SIZE", None),
            ("GRADEBOOK_SEED_EXAMPLE_STUDENT", None),
        ]);

        let settings = load(&["--port", "9000"]);
        assert_eq!(settings.port(), 9000);
    }

    #[rstest]
    fn non_literal_host_is_rejected_by_bind_addr() {
        let _guard = lock_env([("GRADEBOOK_HOST", Some("localhost".to_owned()))]);
        assert!(load(&[]).bind_addr().is_err());
    }
}
