/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

//! Database Connection Management Module
//! Binds a resolved [`ConnectionSpec`] to the sea-orm engine

use async_trait::async_trait;
use futures::future::BoxFuture;
use log::{error, info};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use env_config_parse::EnvSource;
use crate::config::{resolve, ConnectionSpec};
use crate::session::{acquire, with_session, SessionFactory, SessionGuard};
use crate::DbError;

/// Creates the engine for `spec`.
///
/// The URL is handed over uninterpreted; whatever the engine rejects is logged and
/// returned as `DbError::EngineInitialization`.
pub async fn connect(spec: &ConnectionSpec) -> Result<SeaOrmSessions, DbError> {
    info!("Configuring database connection: url={}", spec.redacted());
    let mut opt = ConnectOptions::new(spec.url().to_string());
    opt.sqlx_logging(false);

    match Database::connect(opt).await {
        Ok(conn) => {
            info!("database engine created successfully");
            Ok(SeaOrmSessions::from_connection(conn))
        }
        Err(e) => {
            error!("Error creating database engine: {}", e);
            Err(DbError::EngineInitialization(e.to_string()))
        }
    }
}

/// Session factory over a sea-orm connection pool.
///
/// Each session is a transaction; work that is not committed is rolled back on close.
pub struct SeaOrmSessions {
    conn: DatabaseConnection,
}

impl SeaOrmSessions {
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        self.conn.ping().await.map_err(DbError::from)
    }

    /// Closes the underlying pool.
    pub async fn shutdown(self) -> Result<(), DbError> {
        self.conn.close().await.map_err(DbError::from)
    }
}

#[async_trait]
impl SessionFactory for SeaOrmSessions {
    type Session = DbSession;

    async fn open(&self) -> Result<DbSession, DbError> {
        let txn = self.conn.begin().await.map_err(|e| {
            error!("Failed to open database session: {}", e);
            DbError::SessionAcquire(e.to_string())
        })?;
        Ok(DbSession { txn: Some(txn) })
    }

    fn close(&self, session: DbSession) {
        // dropping an uncommitted transaction rolls it back
        drop(session);
    }
}

/// One unit of work against the engine.
pub struct DbSession {
    txn: Option<DatabaseTransaction>,
}

impl DbSession {
    /// The open transaction, for use with sea-orm's `ConnectionTrait` APIs.
    pub fn transaction(&self) -> Result<&DatabaseTransaction, DbError> {
        self.txn.as_ref().ok_or(DbError::SessionClosed)
    }

    pub fn is_open(&self) -> bool {
        self.txn.is_some()
    }

    /// Commits the unit of work. The session cannot be used for queries afterwards.
    pub async fn commit(&mut self) -> Result<(), DbError> {
        let txn = self.txn.take().ok_or(DbError::SessionClosed)?;
        txn.commit().await.map_err(DbError::from)
    }

    /// Discards the unit of work explicitly.
    pub async fn rollback(&mut self) -> Result<(), DbError> {
        let txn = self.txn.take().ok_or(DbError::SessionClosed)?;
        txn.rollback().await.map_err(DbError::from)
    }
}

/// Process-wide database state, built once by [`init`] and passed by reference.
pub struct DbContext {
    spec: ConnectionSpec,
    sessions: SeaOrmSessions,
}

impl DbContext {
    pub fn new(spec: ConnectionSpec, sessions: SeaOrmSessions) -> Self {
        Self { spec, sessions }
    }

    pub fn spec(&self) -> &ConnectionSpec {
        &self.spec
    }

    pub fn sessions(&self) -> &SeaOrmSessions {
        &self.sessions
    }

    pub async fn session(&self) -> Result<SessionGuard<'_, SeaOrmSessions>, DbError> {
        acquire(&self.sessions).await
    }

    pub async fn with_session<W, T, E>(&self, work: W) -> Result<T, E>
    where
        W: for<'s> FnOnce(&'s mut DbSession) -> BoxFuture<'s, Result<T, E>>,
        E: From<DbError>,
    {
        with_session(&self.sessions, work).await
    }

    /// Closes the engine. Sessions still open keep their own connection until dropped.
    pub async fn shutdown(self) -> Result<(), DbError> {
        info!("Closing database connection: url={}", self.spec.redacted());
        self.sessions.shutdown().await
    }
}

/// Resolves the configuration from `env` and creates the engine.
///
/// Any error is fatal for startup; nothing is retried.
pub async fn init<E: EnvSource + ?Sized>(env: &E) -> Result<DbContext, DbError> {
    info!("Initializing database connection...");
    let spec = resolve(env)?;
    let sessions = connect(&spec).await?;
    Ok(DbContext::new(spec, sessions))
}
