//! AppleScript bridge
//!
//! Builds scripts for `osascript`, runs them with a deadline and turns the
//! brace-delimited property response into a string map.
//!
//! # Response format
//!
//! The property query returns every value through AppleScript's
//! `quoted form of`, which produces shell quoting:
//!
//! ```text
//! {'name': 'Don'\''t Stop', 'sound volume': '50', 'album': 'Say "Hi"'}
//! ```
//!
//! [`to_json`] rewrites this into JSON without losing any character, so that
//! `serde_json` can do the actual parsing.

use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::process::Command;
use std::time::Duration;

use crate::property::Property;
use crate::util;

/// How a literal single quote appears inside a shell-quoted string
const ESCAPED_QUOTE: &str = r"'\''";

/// AppleScript error number for "User canceled."
const USER_CANCELED: &str = "(-128)";

/// Handler turning any value into its shell-quoted text form
const QUOTED_HANDLER: &str = "\
to quoted(val)
    set val to val as text
    return quoted form of val
end quoted
";

/// Executes AppleScript source and returns its trimmed output
pub trait ScriptRunner {
    fn run(&self, script: &str) -> Result<String>;
}

/// `osascript` exited unsuccessfully
#[derive(Debug, Clone)]
pub struct ScriptError {
    pub code: Option<i32>,
    pub stderr: String,
}

impl ScriptError {
    /// The user dismissed a dialog with Cancel
    pub fn is_user_cancel(&self) -> bool {
        self.stderr.contains(USER_CANCELED)
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "osascript failed ({code}): {}", self.stderr),
            None => write!(f, "osascript terminated by signal: {}", self.stderr),
        }
    }
}

impl std::error::Error for ScriptError {}

/// Runs scripts through the `osascript` command line tool
#[derive(Debug, Clone)]
pub struct Osascript {
    timeout: Duration,
}

impl Osascript {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new(crate::SCRIPT_TIMEOUT)
    }
}

impl ScriptRunner for Osascript {
    fn run(&self, script: &str) -> Result<String> {
        let output =
            util::run_command_with_timeout(Command::new("osascript").args(["-e", script]), self.timeout)
                .context("Failed to run osascript")?;

        if !output.status.success() {
            return Err(ScriptError {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Wrap a command so it only runs while `app` is running.
///
/// When the application is not running the script produces no output.
pub fn guarded(app: &str, command: &str) -> String {
    format!(r#"if application "{app}" is running then tell application "{app}" to {command}"#)
}

/// Build one script that reads every property in a single round trip
pub fn build_query(app: &str, properties: &[Property]) -> String {
    let elements = properties
        .iter()
        .map(|p| format!(r#"quoted form of "{}" & ": " & my quoted({})"#, p.key(), p.accessor()))
        .collect::<Vec<_>>()
        .join(r#" & ", " & "#);

    let body = format!(r#""{{" & {elements} & "}}""#);
    format!("{QUOTED_HANDLER}\n{}", guarded(app, &body))
}

/// Convert a shell-quoted brace response into JSON
pub fn to_json(output: &str) -> String {
    let mut json = String::with_capacity(output.len() + 16);
    let mut in_string = false;
    let mut rest = output;

    while let Some(c) = rest.chars().next() {
        if in_string && rest.starts_with(ESCAPED_QUOTE) {
            json.push('\'');
            rest = &rest[ESCAPED_QUOTE.len()..];
            continue;
        }
        rest = &rest[c.len_utf8()..];

        match c {
            '\'' => {
                in_string = !in_string;
                json.push('"');
            }
            '"' if in_string => json.push_str("\\\""),
            '\\' if in_string => json.push_str("\\\\"),
            c if in_string && c.is_control() => {
                let _ = write!(json, "\\u{:04x}", u32::from(c));
            }
            c => json.push(c),
        }
    }

    json
}

/// Parse a property response.
///
/// Empty output means the guard skipped the query because the application
/// is not running.
pub fn parse_response(output: &str) -> Result<Option<BTreeMap<String, String>>> {
    let output = output.trim();
    if output.is_empty() {
        return Ok(None);
    }

    let json = to_json(output);
    let values = serde_json::from_str(&json)
        .with_context(|| format!("Malformed property response: {output}"))?;
    Ok(Some(values))
}

/// Escape text for use inside an AppleScript string literal
pub fn escape_string_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Ask the user for a line of text.
///
/// Returns `Ok(None)` when the dialog is cancelled.
pub fn prompt(runner: &impl ScriptRunner, title: &str, message: &str, default: &str) -> Result<Option<String>> {
    let script = format!(
        r#"text returned of (display dialog "{}" default answer "{}" with title "{}" buttons {{"Cancel", "OK"}} default button "OK" cancel button "Cancel")"#,
        escape_string_literal(message),
        escape_string_literal(default),
        escape_string_literal(title),
    );

    match runner.run(&script) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.downcast_ref::<ScriptError>().is_some_and(ScriptError::is_user_cancel) => {
            debug!("Dialog '{title}' cancelled");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
