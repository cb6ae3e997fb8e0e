//! Deferred values for single-threaded execution.
//!
//! A resolver either produces its result right away or hands back a [`Deferred`] that settles
//! later. [`MaybeDeferred`] is the closed set of both cases, so the executor can keep a
//! synchronous fast path and only allocate futures when something actually suspends.
//!
//! Deferred values are boxed local futures: they are `!Send` and are meant to be polled by a
//! single task. Host futures are adopted explicitly through [`Deferred::new`].

mod combinators;

use std::{
    future::{Future, IntoFuture},
    pin::Pin,
    task::{Context, Poll},
};

use futures_util::future::{self, Either, FutureExt, LocalBoxFuture, TryFutureExt};

pub use combinators::{for_list, for_map, reject_after_settled};

/// A value that settles later, either fulfilled with `T` or rejected with `E`.
#[must_use = "deferred values do nothing unless polled"]
pub struct Deferred<'a, T, E>(LocalBoxFuture<'a, Result<T, E>>);

/// Either an already settled result or a deferred one.
#[must_use]
pub enum MaybeDeferred<'a, T, E> {
    Ready(Result<T, E>),
    Deferred(Deferred<'a, T, E>),
}

impl<'a, T: 'a, E: 'a> Deferred<'a, T, E> {
    pub fn new(future: impl Future<Output = Result<T, E>> + 'a) -> Self {
        Deferred(future.boxed_local())
    }

    /// Wraps a settled result into a deferred value. An already deferred value is returned as
    /// is, never nested.
    pub fn resolve(value: impl Into<MaybeDeferred<'a, T, E>>) -> Self {
        match value.into() {
            MaybeDeferred::Ready(result) => Deferred::new(future::ready(result)),
            MaybeDeferred::Deferred(deferred) => deferred,
        }
    }

    pub fn reject(error: E) -> Self {
        Deferred::new(future::ready(Err(error)))
    }

    /// Chains a continuation run once this value is fulfilled. Rejections are forwarded.
    pub fn then<U: 'a>(self, on_fulfilled: impl FnOnce(T) -> MaybeDeferred<'a, U, E> + 'a) -> Deferred<'a, U, E> {
        Deferred::new(async move {
            let value = self.0.await?;
            on_fulfilled(value).await
        })
    }

    pub fn then_or_else<U: 'a>(
        self,
        on_fulfilled: impl FnOnce(T) -> MaybeDeferred<'a, U, E> + 'a,
        on_rejected: impl FnOnce(E) -> MaybeDeferred<'a, U, E> + 'a,
    ) -> Deferred<'a, U, E> {
        Deferred::new(async move {
            match self.0.await {
                Ok(value) => on_fulfilled(value).await,
                Err(error) => on_rejected(error).await,
            }
        })
    }

    pub fn catch(self, on_rejected: impl FnOnce(E) -> MaybeDeferred<'a, T, E> + 'a) -> Self {
        self.then_or_else(MaybeDeferred::ok, on_rejected)
    }

    pub fn map<U: 'a>(self, f: impl FnOnce(T) -> U + 'a) -> Deferred<'a, U, E> {
        Deferred(self.0.map_ok(f).boxed_local())
    }

    /// Fulfills with every result in input order once all of them settled, or rejects with
    /// the first rejection in input order. A rejection never stops the other values.
    pub fn all<I>(values: I) -> Deferred<'a, Vec<T>, E>
    where
        I: IntoIterator,
        I::Item: Into<MaybeDeferred<'a, T, E>>,
    {
        let futures = values
            .into_iter()
            .map(|value| value.into().into_future())
            .collect::<Vec<_>>();
        Deferred(
            future::join_all(futures)
                .map(|results| results.into_iter().collect())
                .boxed_local(),
        )
    }

    /// Drives the value to completion on the current thread.
    pub fn block_on(self) -> Result<T, E> {
        futures::executor::block_on(self.0)
    }
}

impl<T, E> Future for Deferred<'_, T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.0.as_mut().poll(cx)
    }
}

impl<T, E> std::fmt::Debug for Deferred<'_, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Deferred(..)")
    }
}

impl<'a, T: 'a, E: 'a> MaybeDeferred<'a, T, E> {
    pub fn ok(value: T) -> Self {
        MaybeDeferred::Ready(Ok(value))
    }

    pub fn err(error: E) -> Self {
        MaybeDeferred::Ready(Err(error))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, MaybeDeferred::Deferred(_))
    }

    pub fn into_deferred(self) -> Deferred<'a, T, E> {
        Deferred::resolve(self)
    }

    /// Applies `f` right away on a fulfilled value, or once the deferred value is fulfilled.
    pub fn map<U: 'a>(self, f: impl FnOnce(T) -> U + 'a) -> MaybeDeferred<'a, U, E> {
        match self {
            MaybeDeferred::Ready(result) => MaybeDeferred::Ready(result.map(f)),
            MaybeDeferred::Deferred(deferred) => MaybeDeferred::Deferred(deferred.map(f)),
        }
    }
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for MaybeDeferred<'_, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaybeDeferred::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            MaybeDeferred::Deferred(deferred) => deferred.fmt(f),
        }
    }
}

impl<'a, T, E> From<Result<T, E>> for MaybeDeferred<'a, T, E> {
    fn from(result: Result<T, E>) -> Self {
        MaybeDeferred::Ready(result)
    }
}

impl<'a, T, E> From<Deferred<'a, T, E>> for MaybeDeferred<'a, T, E> {
    fn from(deferred: Deferred<'a, T, E>) -> Self {
        MaybeDeferred::Deferred(deferred)
    }
}

impl<'a, T, E> IntoFuture for MaybeDeferred<'a, T, E> {
    type Output = Result<T, E>;
    type IntoFuture = Either<future::Ready<Result<T, E>>, Deferred<'a, T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            MaybeDeferred::Ready(result) => Either::Left(future::ready(result)),
            MaybeDeferred::Deferred(deferred) => Either::Right(deferred),
        }
    }
}
