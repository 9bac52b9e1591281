//! Shared helpers: bounded command execution and menu text truncation

use anyhow::{Context, Result};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Truncate a string to at most `max_chars` Unicode characters.
///
/// If truncated, appends "..." so the total character count is ≤ `max_chars`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Run a command with a timeout. Kills the child if it exceeds the deadline.
///
/// Drains stdout/stderr in background threads to avoid pipe-buffer deadlocks
/// (a common issue when the child's output exceeds the OS pipe capacity).
pub fn run_command_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to spawn command")?;

    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_handle {
            std::io::Read::read_to_end(&mut out, &mut buf).ok();
        }
        buf
    });
    let stderr_thread = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_handle {
            std::io::Read::read_to_end(&mut err, &mut buf).ok();
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            anyhow::bail!("Command timed out after {timeout:?}");
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("Hi", 10), "Hi");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("Hello, World!", 10), "Hello, ...");
    }

    #[test]
    fn test_truncate_unicode() {
        let result = truncate("日本語テスト", 5);
        assert_eq!(result, "日本...");
    }

    #[test]
    fn test_command_with_timeout_success() {
        let output =
            run_command_with_timeout(Command::new("echo").arg("hello"), Duration::from_secs(5))
                .unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("hello"));
    }

    #[test]
    fn test_command_with_timeout_reports_failure_status() {
        let output = run_command_with_timeout(
            Command::new("sh").args(["-c", "echo oops >&2; exit 3"]),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert!(String::from_utf8_lossy(&output.stderr).contains("oops"));
    }

    #[test]
    fn test_command_with_timeout_times_out() {
        let result =
            run_command_with_timeout(Command::new("sleep").arg("10"), Duration::from_secs(1));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timed out"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_truncate_respects_max_chars(s in ".{0,100}", max in 3usize..100) {
            prop_assert!(truncate(&s, max).chars().count() <= max);
        }

        #[test]
        fn prop_truncate_short_identity(s in ".{0,10}") {
            prop_assert_eq!(truncate(&s, 100), s);
        }
    }
}
