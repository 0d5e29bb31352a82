#[path = "common/mod.rs"]
mod common;

use busybee::{BusyBee, Error};
use common::{add_one, is_even, lines_of};

// -------- map --------

#[test]
fn map_empty_input_returns_empty() {
    let mut out = Vec::new();
    let actual: Vec<i64> = BusyBee::new().sink(&mut out).map(add_one, vec![]).unwrap();
    assert!(actual.is_empty());
}

/// A single worker still produces every result in input order.
#[test]
fn map_one_worker_in_order() {
    let mut out = Vec::new();
    let actual = BusyBee::new()
        .workers(1)
        .sink(&mut out)
        .map(add_one, (0..1000).collect())
        .unwrap();
    assert_eq!(actual, (1..=1000).collect::<Vec<i64>>());
}

/// Output order matches input order even when many workers race over the
/// chunks.
#[test]
fn map_many_workers_in_order() {
    let mut out = Vec::new();
    let actual = BusyBee::new()
        .workers(8)
        .sink(&mut out)
        .map(add_one, (0..1000).collect())
        .unwrap();
    assert_eq!(actual, (1..=1000).collect::<Vec<i64>>());
}

#[test]
fn map_all_cores_in_order() {
    let mut out = Vec::new();
    let actual = BusyBee::new()
        .workers("n")
        .sink(&mut out)
        .map(add_one, (0..1000).collect())
        .unwrap();
    assert_eq!(actual, (1..=1000).collect::<Vec<i64>>());
}

#[test]
fn map_propagates_spec_errors_before_dispatch() {
    let mut out = Vec::new();
    let err = BusyBee::new()
        .workers("n+1")
        .sink(&mut out)
        .map(add_one, vec![1, 2, 3])
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidRelativeCoreSpec { .. })
    ));
    assert!(out.is_empty(), "no status line may be written for an invalid spec");
}

/// One failing item aborts the whole run; no partial result escapes.
#[test]
fn map_task_failure_aborts_batch() {
    let mut out = Vec::new();
    let err = BusyBee::new()
        .quiet(true)
        .workers(4)
        .sink(&mut out)
        .map(
            |x: i64| {
                if x == 700 {
                    anyhow::bail!("boom at {}", x);
                }
                Ok(x + 1)
            },
            (0..1000).collect(),
        )
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Task(_))));
}

// -------- filter --------

#[test]
fn filter_empty_input_returns_empty() {
    let mut out = Vec::new();
    let actual = BusyBee::new().sink(&mut out).filter(is_even, vec![]).unwrap();
    assert!(actual.is_empty());
}

#[test]
fn filter_keeps_matching_items_in_order() {
    for workers in ["1", "8", "n"] {
        let mut out = Vec::new();
        let actual = BusyBee::new()
            .workers(workers)
            .sink(&mut out)
            .filter(is_even, (0..1000).collect())
            .unwrap();
        assert_eq!(actual, (0..1000).step_by(2).collect::<Vec<i64>>());
    }
}

#[test]
fn filter_propagates_task_failures() {
    let err = BusyBee::new()
        .quiet(true)
        .filter(|x: &i64| if *x == 5 { anyhow::bail!("bad item") } else { Ok(true) }, (0..10).collect())
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Task(_))));
}

// -------- mk_dict --------

#[test]
fn mk_dict_empty_input_returns_empty() {
    let mut out = Vec::new();
    let actual = BusyBee::new().sink(&mut out).mk_dict(|k: &i64| add_one(*k), vec![]).unwrap();
    assert!(actual.is_empty());
}

#[test]
fn mk_dict_maps_each_key_to_its_value() {
    for workers in [1usize, 8] {
        let mut out = Vec::new();
        let actual = BusyBee::new()
            .workers(workers)
            .sink(&mut out)
            .mk_dict(|k: &i64| add_one(*k), vec![1, 2, 3, 4, 5])
            .unwrap();
        let expected: std::collections::HashMap<i64, i64> =
            [(1, 2), (2, 3), (3, 4), (4, 5), (5, 6)].into_iter().collect();
        assert_eq!(actual, expected);
    }
}

/// Duplicate keys are computed once and pair with their own value.
#[test]
fn mk_dict_deduplicates_keys() {
    let mut out = Vec::new();
    let actual = BusyBee::new()
        .quiet(true)
        .sink(&mut out)
        .mk_dict(|k: &i64| add_one(*k), vec![3, 1, 3, 2, 1, 3])
        .unwrap();
    let expected: std::collections::HashMap<i64, i64> =
        [(3, 4), (1, 2), (2, 3)].into_iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn mk_dict_propagates_task_failures() {
    let err = BusyBee::new()
        .quiet(true)
        .mk_dict(
            |k: &i64| if *k == 2 { anyhow::bail!("bad key") } else { Ok(*k) },
            vec![1, 2, 3],
        )
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Task(_))));
}

// -------- status output --------

#[test]
fn empty_input_writes_exactly_one_skip_notice() {
    let mut out = Vec::new();
    let _: Vec<i64> = BusyBee::new()
        .tag("t")
        .sink(&mut out)
        .map(add_one, vec![])
        .unwrap();
    assert_eq!(lines_of(&out), vec!["t: skipping because of empty input"]);
}

#[test]
fn quiet_mode_writes_nothing() {
    let mut out = Vec::new();
    let _ = BusyBee::new()
        .quiet(true)
        .sink(&mut out)
        .map(add_one, vec![1, 2, 3])
        .unwrap();
    assert!(out.is_empty(), "quiet mode must not touch the sink");

    let mut out = Vec::new();
    let _: Vec<i64> = BusyBee::new()
        .quiet(true)
        .sink(&mut out)
        .map(add_one, vec![])
        .unwrap();
    assert!(out.is_empty(), "quiet mode suppresses the skip notice too");
}

/// With the time trigger disabled, a 1000-item run deterministically writes
/// the start notice, the single 50% progress notice, and the finish notice.
#[test]
fn default_percent_trigger_yields_one_progress_line() {
    let mut out = Vec::new();
    let _ = BusyBee::new()
        .tag("t")
        .workers(4)
        .update_every_seconds(None)
        .sink(&mut out)
        .map(add_one, (0..1000).collect())
        .unwrap();

    let lines = lines_of(&out);
    assert_eq!(lines.len(), 3, "expected start/progress/finish, got: {:?}", lines);
    assert_eq!(lines[0], "t: Start processing 1000 items with 4 processes...");
    assert!(
        lines[1].starts_with("t:  500/1000, 50.0% (avg: "),
        "unexpected progress line: {}",
        lines[1]
    );
    assert!(
        lines[2].starts_with("t: Finished processing 1000 items in "),
        "unexpected finish line: {}",
        lines[2]
    );
}

/// The free functions run with all defaults (stdout sink included).
#[test]
fn free_functions_apply_defaults() {
    let mapped = busybee::map(add_one, (0..10).collect()).unwrap();
    assert_eq!(mapped, (1..=10).collect::<Vec<i64>>());

    let kept = busybee::filter(is_even, (0..10).collect()).unwrap();
    assert_eq!(kept, vec![0, 2, 4, 6, 8]);

    let dict = busybee::mk_dict(|k: &i64| add_one(*k), vec![1, 2]).unwrap();
    assert_eq!(dict.len(), 2);
}

/// A prepared options struct can be applied wholesale to the builder.
#[test]
fn options_struct_composes_with_builder() {
    let quiet = busybee::MapOptions::default().with_quiet(true).with_workers(2);
    let actual = BusyBee::new()
        .options(quiet)
        .map(add_one, (0..10).collect())
        .unwrap();
    assert_eq!(actual, (1..=10).collect::<Vec<i64>>());
}
