//! Ordered parallel executor: chunked dispatch over a scoped worker pool.

use crate::config::MapOptions;
use crate::error::Error;
use crate::progress::ProgressGate;
use crate::status;
use crate::util::init_tracing_once;
use anyhow::{anyhow, Context, Result};
use crossbeam::channel::bounded;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Instant;

/// Apply `func` to every item in parallel and return the outputs in input
/// order, independent of which worker finished which chunk first. Status
/// lines go through `sink`; `opts.quiet` suppresses them entirely.
///
/// The pool lives inside a thread scope, so every worker is joined on every
/// exit path. The first task failure, observed at its in-order position,
/// aborts the whole run with [`Error::Task`] and no partial result.
pub(crate) fn run<T, U, F>(
    func: F,
    items: Vec<T>,
    opts: &MapOptions,
    sink: &mut dyn Write,
) -> Result<Vec<U>>
where
    T: Send,
    U: Send,
    F: Fn(T) -> Result<U> + Sync,
{
    init_tracing_once();

    if items.is_empty() {
        say(sink, opts.quiet, &status::skip_line(&opts.tag))?;
        return Ok(Vec::new());
    }

    // Validate the worker spec before any thread exists.
    let workers = opts.workers.resolve()?;
    if workers == 0 {
        anyhow::bail!("worker pool requires at least 1 worker (spec `{}` resolved to 0)", opts.workers);
    }

    let total = items.len();
    // Batch dispatch for large inputs; one item per dispatch below 2000.
    let chunk_size = (total / 1000).max(1);
    let total_chunks = (total + chunk_size - 1) / chunk_size;

    let started = Instant::now();
    let mut gate = ProgressGate::new(started, total, opts.update_every_time, opts.update_every_percent);

    tracing::debug!(total, workers, chunk_size, "dispatching parallel map");
    say(sink, opts.quiet, &status::start_line(&opts.tag, total, workers))?;

    // Regroup the input into indexed chunks so the collector can restore
    // input order no matter the completion order.
    let mut chunks: Vec<(usize, Vec<T>)> = Vec::with_capacity(total_chunks);
    let mut batch = Vec::with_capacity(chunk_size);
    for item in items {
        batch.push(item);
        if batch.len() == chunk_size {
            let index = chunks.len();
            chunks.push((index, std::mem::replace(&mut batch, Vec::with_capacity(chunk_size))));
        }
    }
    if !batch.is_empty() {
        let index = chunks.len();
        chunks.push((index, batch));
    }

    let func = &func;
    let outcome = crossbeam::thread::scope(|s| -> Result<Vec<U>> {
        let (chunk_tx, chunk_rx) = bounded::<(usize, Vec<T>)>(workers * 2);
        let (done_tx, done_rx) = bounded::<(usize, Result<Vec<U>>)>(workers * 2);

        for _ in 0..workers {
            let chunk_rx = chunk_rx.clone();
            let done_tx = done_tx.clone();
            s.spawn(move |_| {
                while let Ok((index, chunk)) = chunk_rx.recv() {
                    let result = chunk.into_iter().map(func).collect::<Result<Vec<U>>>();
                    if done_tx.send((index, result)).is_err() {
                        // Collector is gone (abort); stop pulling work.
                        break;
                    }
                }
            });
        }
        drop(chunk_rx);
        drop(done_tx);

        // Feeder thread: the bounded channel keeps dispatch from racing
        // unboundedly ahead of in-order consumption.
        s.spawn(move |_| {
            for indexed in chunks {
                if chunk_tx.send(indexed).is_err() {
                    break;
                }
            }
        });

        let mut results: Vec<U> = Vec::with_capacity(total);
        let mut pending: BTreeMap<usize, Result<Vec<U>>> = BTreeMap::new();
        let mut next_chunk = 0usize;
        let mut processed = 0usize;

        while next_chunk < total_chunks {
            let batch = match pending.remove(&next_chunk) {
                Some(early) => early,
                None => {
                    let (index, outcome) = done_rx
                        .recv()
                        .context("worker pool shut down before delivering all results")?;
                    if index != next_chunk {
                        pending.insert(index, outcome);
                        continue;
                    }
                    outcome
                }
            };
            next_chunk += 1;

            let values = batch.map_err(Error::Task)?;
            for value in values {
                results.push(value);
                processed += 1;
                if gate.should_emit(processed, Instant::now()) {
                    let elapsed = started.elapsed().as_secs_f64();
                    say(sink, opts.quiet, &status::progress_line(&opts.tag, processed, total, elapsed))?;
                }
            }
        }

        Ok(results)
    });

    // The scope has joined every worker by now, on success and failure
    // alike. A panic in a worker surfaces here as the scope error.
    let results = match outcome {
        Ok(inner) => inner?,
        Err(_) => return Err(Error::Task(anyhow!("worker thread panicked")).into()),
    };

    let elapsed = started.elapsed().as_secs_f64();
    say(sink, opts.quiet, &status::finish_line(&opts.tag, total, elapsed))?;
    tracing::debug!(total, elapsed, "parallel map finished");

    Ok(results)
}

fn say(sink: &mut dyn Write, quiet: bool, line: &str) -> Result<()> {
    if quiet {
        return Ok(());
    }
    writeln!(sink, "{}", line).context("writing status line")?;
    Ok(())
}
