use std::{future::IntoFuture, hash::Hash};

use futures_util::future;
use indexmap::IndexMap;

use crate::{Deferred, MaybeDeferred};

/// Turns an ordered mapping of possibly deferred values into a single deferred mapping.
///
/// The result has the same keys in the same order, whatever the order in which the values
/// settle. Rejects with the first rejection.
pub fn for_map<'a, K, V, E>(entries: impl IntoIterator<Item = (K, MaybeDeferred<'a, V, E>)>) -> Deferred<'a, IndexMap<K, V>, E>
where
    K: Hash + Eq + 'a,
    V: 'a,
    E: 'a,
{
    let (keys, values): (Vec<K>, Vec<_>) = entries.into_iter().unzip();
    Deferred::all(values).map(move |values| keys.into_iter().zip(values).collect())
}

/// Ordered counterpart of [`for_map`] for lists.
pub fn for_list<'a, T, E>(items: impl IntoIterator<Item = MaybeDeferred<'a, T, E>>) -> Deferred<'a, Vec<T>, E>
where
    T: 'a,
    E: 'a,
{
    Deferred::all(items)
}

/// Rejects with `error` once every deferred value of `started` settled. Their outcomes are
/// discarded, so any recovery they do on their own still happens.
pub fn reject_after_settled<'a, T, U, E>(
    started: impl IntoIterator<Item = MaybeDeferred<'a, T, E>>,
    error: E,
) -> MaybeDeferred<'a, U, E>
where
    T: 'a,
    U: 'a,
    E: 'a,
{
    let pending = started
        .into_iter()
        .filter(MaybeDeferred::is_deferred)
        .map(IntoFuture::into_future)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return MaybeDeferred::err(error);
    }
    Deferred::new(async move {
        future::join_all(pending).await;
        Err::<U, E>(error)
    })
    .into()
}
