use std::{env, time::Duration};

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Quiz, QuizAttempt},
};

pub const DEFAULT_QUIZZES_COLLECTION: &str = "quizzes";
pub const DEFAULT_QUIZ_ATTEMPTS_COLLECTION: &str = "quiz_attempts";

const MAX_POOL_SIZE: u32 = 10;
const MIN_POOL_SIZE: u32 = 2;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Names of the collections holding quiz definitions and scored attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collections {
    pub quizzes: String,
    pub quiz_attempts: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            quizzes: DEFAULT_QUIZZES_COLLECTION.to_string(),
            quiz_attempts: DEFAULT_QUIZ_ATTEMPTS_COLLECTION.to_string(),
        }
    }
}

impl Collections {
    /// Reads `QUIZZES_COLLECTION` and `QUIZ_ATTEMPTS_COLLECTION`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            quizzes: env::var("QUIZZES_COLLECTION")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.quizzes),
            quiz_attempts: env::var("QUIZ_ATTEMPTS_COLLECTION")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.quiz_attempts),
        }
    }
}

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
    collections: Collections,
}

impl Database {
    pub async fn connect(config: &Config, collections: Collections) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(MAX_POOL_SIZE);
        client_options.min_pool_size = Some(MIN_POOL_SIZE);
        client_options.connect_timeout = Some(CONNECT_TIMEOUT);
        client_options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(client_options)?;
        let database = Self {
            client,
            db_name: config.mongo_db_name.clone(),
            collections,
        };
        database.health_check().await?;

        log::info!(
            "Connected to MongoDB database '{}' (quizzes: '{}', attempts: '{}')",
            database.db_name,
            database.collections.quizzes,
            database.collections.quiz_attempts
        );
        Ok(database)
    }

    pub fn quizzes(&self) -> Collection<Quiz> {
        self.collection(&self.collections.quizzes)
    }

    pub fn quiz_attempts(&self) -> Collection<QuizAttempt> {
        self.collection(&self.collections.quiz_attempts)
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.client.database(&self.db_name).collection(name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_structure() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Database>();
    }

    #[test]
    fn test_default_collection_names() {
        let collections = Collections::default();
        assert_eq!(collections.quizzes, "quizzes");
        assert_eq!(collections.quiz_attempts, "quiz_attempts");
    }

    #[test]
    fn test_collection_names_from_env_are_never_blank() {
        let collections = Collections::from_env();
        assert!(!collections.quizzes.trim().is_empty());
        assert!(!collections.quiz_attempts.trim().is_empty());
    }
}
