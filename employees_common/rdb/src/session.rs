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

//! Scoped session acquisition
//!
//! A session is opened from a [`SessionFactory`] and handed back to it exactly once,
//! whether the unit of work returns, fails, panics or is cancelled.

use std::ops::{Deref, DerefMut};
use async_trait::async_trait;
use futures::future::BoxFuture;
use log::debug;
use crate::DbError;

/// Source of per-unit-of-work sessions, usually backed by the engine's pool.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: Send;

    /// Borrow a session from the engine
    async fn open(&self) -> Result<Self::Session, DbError>;

    /// Return a session. Called exactly once for every successful `open`.
    fn close(&self, session: Self::Session);
}

/// Owns an open session and closes it on drop.
pub struct SessionGuard<'a, F: SessionFactory + ?Sized> {
    factory: &'a F,
    session: Option<F::Session>,
}

impl<'a, F: SessionFactory + ?Sized> SessionGuard<'a, F> {
    /// Closes the session now instead of at the end of the scope.
    pub fn release(mut self) {
        self.close_inner();
    }

    fn close_inner(&mut self) {
        if let Some(session) = self.session.take() {
            self.factory.close(session);
            debug!("database session closed");
        }
    }
}

impl<F: SessionFactory + ?Sized> Deref for SessionGuard<'_, F> {
    type Target = F::Session;

    fn deref(&self) -> &Self::Target {
        // only `release` and `drop` empty the slot, and both consume the guard
        self.session.as_ref().unwrap_or_else(|| unreachable!("session already closed"))
    }
}

impl<F: SessionFactory + ?Sized> DerefMut for SessionGuard<'_, F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.session.as_mut().unwrap_or_else(|| unreachable!("session already closed"))
    }
}

impl<F: SessionFactory + ?Sized> Drop for SessionGuard<'_, F> {
    fn drop(&mut self) {
        self.close_inner();
    }
}

/// Opens a session bound to `factory`.
///
/// Nothing is opened (and nothing needs closing) when this returns an error.
pub async fn acquire<F: SessionFactory + ?Sized>(factory: &F) -> Result<SessionGuard<'_, F>, DbError> {
    let session = factory.open().await?;
    debug!("database session opened");
    Ok(SessionGuard {
        factory,
        session: Some(session),
    })
}

/// Runs `work` with a freshly opened session and closes it afterwards.
///
/// # Example
/// ```ignore
/// let count = with_session(&sessions, |session| Box::pin(async move {
///     let txn = session.transaction()?;
///     // ... queries against txn ...
///     session.commit().await?;
///     Ok::<_, DbError>(1)
/// })).await?;
/// ```
pub async fn with_session<F, W, T, E>(factory: &F, work: W) -> Result<T, E>
where
    F: SessionFactory + ?Sized,
    W: for<'s> FnOnce(&'s mut F::Session) -> BoxFuture<'s, Result<T, E>>,
    E: From<DbError>,
{
    let mut guard = acquire(factory).await?;
    work(&mut *guard).await
}
