//! Crate-internal macros shared by [`crate::run`] and the log-reading commands.

/// `writeln!` inside [`crate::run`]: a failed write to `out`/`err` makes `run`
/// return [`crate::exit_code::ERROR`] at once, since nothing more can be
/// reported on a broken stream.
///
/// ```ignore
/// write_or_exit!(err, "Usage: casino <command> [options]");
/// ```
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}

/// Deserializes one JSONL round-log line, or reports it on `err` as
/// `Failed to parse <context>` and `continue`s the enclosing loop.
///
/// The caller keeps its own count of skipped lines; `stats` compares it with
/// the number of non-blank lines to warn about corrupted records.
///
/// ```ignore
/// let rec: RoundRecord = parse_json_or_continue!(line, err, format!("line {}", i + 1));
/// ```
macro_rules! parse_json_or_continue {
    ($line:expr, $err:expr, $context:expr) => {
        match serde_json::from_str($line) {
            Ok(record) => record,
            Err(e) => {
                let _ = $crate::ui::write_error($err, &format!("Failed to parse {}: {}", $context, e));
                continue;
            }
        }
    };
}
