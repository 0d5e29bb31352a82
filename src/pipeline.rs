use crate::config::MapOptions;
use crate::core_spec::CoreSpec;
use crate::executor;
use ahash::AHashSet;
use anyhow::Result;
use std::collections::HashMap;
use std::hash::Hash;
use std::io::{self, Write};

/// Entry point with builder chaining over [`MapOptions`] and an optional
/// caller-supplied sink (defaults to stdout).
///
/// ```
/// # fn main() -> anyhow::Result<()> {
/// let doubled = busybee::BusyBee::new()
///     .quiet(true)
///     .workers(2)
///     .map(|x: i64| Ok(x * 2), (0..10).collect())?;
/// assert_eq!(doubled.len(), 10);
/// # Ok(())
/// # }
/// ```
pub struct BusyBee<'a> {
    opts: MapOptions,
    sink: Option<&'a mut dyn Write>,
}

impl BusyBee<'static> {
    pub fn new() -> Self {
        Self { opts: MapOptions::default(), sink: None }
    }
}

impl Default for BusyBee<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BusyBee<'a> {
    // -------- Builder methods --------
    pub fn workers(mut self, spec: impl Into<CoreSpec>) -> Self { self.opts = self.opts.with_workers(spec); self }
    pub fn tag(mut self, tag: impl Into<String>) -> Self { self.opts = self.opts.with_tag(tag); self }
    pub fn quiet(mut self, yes: bool) -> Self { self.opts = self.opts.with_quiet(yes); self }
    pub fn update_every_seconds(mut self, seconds: impl Into<Option<f64>>) -> Self { self.opts = self.opts.with_update_every_seconds(seconds); self }
    pub fn update_every_percent(mut self, percent: impl Into<Option<f64>>) -> Self { self.opts = self.opts.with_update_every_percent(percent); self }
    pub fn options(mut self, opts: MapOptions) -> Self { self.opts = opts; self }

    /// Route status lines to `sink` instead of stdout.
    pub fn sink<'b>(self, sink: &'b mut dyn Write) -> BusyBee<'b> {
        BusyBee { opts: self.opts, sink: Some(sink) }
    }

    // -------- Operations --------

    /// Apply `func` to every item in parallel; outputs come back in input
    /// order. The first failing item aborts the whole run.
    pub fn map<T, U, F>(self, func: F, items: Vec<T>) -> Result<Vec<U>>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> Result<U> + Sync,
    {
        let BusyBee { opts, sink } = self;
        match sink {
            Some(sink) => executor::run(func, items, &opts, sink),
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                executor::run(func, items, &opts, &mut lock)
            }
        }
    }

    /// Evaluate `pred` over every item in parallel and keep the items for
    /// which it returned `true`, preserving their relative order.
    pub fn filter<T, F>(self, pred: F, items: Vec<T>) -> Result<Vec<T>>
    where
        T: Send + Sync,
        F: Fn(&T) -> Result<bool> + Sync,
    {
        let flags = self.map(|item: &T| pred(item), items.iter().collect())?;
        Ok(items
            .into_iter()
            .zip(flags)
            .filter_map(|(item, keep)| keep.then_some(item))
            .collect())
    }

    /// Build a map from each unique key to `func(key)`. Keys deduplicate in
    /// first-occurrence order before any work is dispatched.
    pub fn mk_dict<K, V, F>(self, func: F, keys: Vec<K>) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash + Clone + Send + Sync,
        V: Send,
        F: Fn(&K) -> Result<V> + Sync,
    {
        let mut seen = AHashSet::with_capacity(keys.len());
        let mut unique: Vec<K> = Vec::with_capacity(keys.len());
        for key in keys {
            if seen.insert(key.clone()) {
                unique.push(key);
            }
        }

        let values = self.map(|key: &K| func(key), unique.iter().collect())?;
        Ok(unique.into_iter().zip(values).collect())
    }
}

// -------- Free-function conveniences with all defaults --------

/// [`BusyBee::map`] with default options, writing status lines to stdout.
pub fn map<T, U, F>(func: F, items: Vec<T>) -> Result<Vec<U>>
where
    T: Send,
    U: Send,
    F: Fn(T) -> Result<U> + Sync,
{
    BusyBee::new().map(func, items)
}

/// [`BusyBee::filter`] with default options, writing status lines to stdout.
pub fn filter<T, F>(pred: F, items: Vec<T>) -> Result<Vec<T>>
where
    T: Send + Sync,
    F: Fn(&T) -> Result<bool> + Sync,
{
    BusyBee::new().filter(pred, items)
}

/// [`BusyBee::mk_dict`] with default options, writing status lines to stdout.
pub fn mk_dict<K, V, F>(func: F, keys: Vec<K>) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send,
    F: Fn(&K) -> Result<V> + Sync,
{
    BusyBee::new().mk_dict(func, keys)
}
