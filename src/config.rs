use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// MySQL server hostname
    #[serde(default)]
    pub db_host: String,

    /// MySQL user
    #[serde(default)]
    pub db_user: String,

    /// MySQL password
    #[serde(default)]
    pub db_password: String,

    /// MySQL database name
    #[serde(default)]
    pub db_name: String,

    /// Outbound sender address for contact-form email
    #[serde(default = "default_email_user")]
    pub email_user: String,

    /// SMTP credential for the sender account
    #[serde(default)]
    pub email_password: String,

    /// SMTP server for the generic transport branch
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP port for the generic transport branch
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_email_user() -> String {
    "D247Online@outlook.com".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Returns the env var names of DB credentials that are absent or blank.
    ///
    /// All four of `DB_HOST`, `DB_USER`, `DB_PASSWORD` and `DB_NAME` are
    /// required before any connection attempt is made.
    pub fn missing_db_vars(&self) -> Vec<&'static str> {
        [
            ("DB_HOST", &self.db_host),
            ("DB_USER", &self.db_user),
            ("DB_PASSWORD", &self.db_password),
            ("DB_NAME", &self.db_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Fails with one error naming every missing DB variable, not just the first
    pub fn require_db(&self) -> anyhow::Result<()> {
        let missing = self.missing_db_vars();
        if missing.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "DB credentials missing in environment variables: {}",
                missing.join(", ")
            )
        }
    }
}
