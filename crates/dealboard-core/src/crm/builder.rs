//! Builder for creating and configuring Crm instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Crm;
use crate::{
    access::AccessPolicy,
    db::Database,
    error::{CrmError, Result},
};

/// Builder for creating and configuring Crm instances.
#[derive(Debug, Clone, Default)]
pub struct CrmBuilder {
    database_path: Option<PathBuf>,
    user: Option<String>,
    policy: AccessPolicy,
}

impl CrmBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/dealboard/dealboard.db` or
    /// `~/.local/share/dealboard/dealboard.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the acting team member.
    pub fn with_user(mut self, email: Option<impl Into<String>>) -> Self {
        self.user = email.map(Into::into);
        self
    }

    /// Restricts access to the given team emails. An empty team leaves the
    /// store open.
    pub fn with_team<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.policy = AccessPolicy::team(members);
        self
    }

    /// Builds the configured instance.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::Unauthorized` if a team is configured and the user
    /// is missing or not on it.
    /// Returns `CrmError::FileSystem` if the database path is invalid.
    /// Returns `CrmError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Crm> {
        let user = match (&self.user, self.policy.is_open()) {
            (Some(email), _) => Some(self.policy.authorize(email)?),
            (None, true) => None,
            (None, false) => {
                return Err(CrmError::Unauthorized {
                    email: "<none>".to_string(),
                })
            }
        };

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CrmError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CrmError>(())
        })
        .await
        .map_err(|e| CrmError::join(&e))??;

        log::debug!("Opened store at {}", db_path.display());
        Ok(Crm::new(db_path, user))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("dealboard")
            .place_data_file("dealboard.db")
            .map_err(|e| CrmError::XdgDirectory(e.to_string()))
    }
}
