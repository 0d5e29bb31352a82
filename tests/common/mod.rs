/// Capture sink for status lines: collect everything the executor writes
/// and split it back into lines for assertions.
pub fn lines_of(buf: &[u8]) -> Vec<String> {
    String::from_utf8(buf.to_vec())
        .expect("status output is valid UTF-8")
        .lines()
        .map(|l| l.to_string())
        .collect()
}

/// Returns x + 1. Mirrors the kind of cheap pure function the crate is for.
pub fn add_one(x: i64) -> anyhow::Result<i64> {
    Ok(x + 1)
}

/// Returns `true` iff x is divisible by 2.
pub fn is_even(x: &i64) -> anyhow::Result<bool> {
    Ok(x % 2 == 0)
}
