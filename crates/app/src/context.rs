//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        businesses::{BusinessesService, PgBusinessesService},
        posts::{PgPostsService, PostsService},
        shopping::{PgShoppingService, ShoppingService},
        users::{PgUsersService, UsersService},
    },
    mail::Mailer,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub businesses: Arc<dyn BusinessesService>,
    pub posts: Arc<dyn PostsService>,
    pub shopping: Arc<dyn ShoppingService>,
}

impl AppContext {
    /// Build the services on top of an existing database handle.
    #[must_use]
    pub fn from_db(db: Db, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), mailer)),
            users: Arc::new(PgUsersService::new(db.clone())),
            businesses: Arc::new(PgBusinessesService::new(db.clone())),
            posts: Arc::new(PgPostsService::new(db.clone())),
            shopping: Arc::new(PgShoppingService::new(db)),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or when
    /// `run_migrations` is set and a migration cannot be applied.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        run_migrations: bool,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(Db::new(pool), mailer))
    }
}
