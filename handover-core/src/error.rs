//! Error taxonomy for command execution and container inspection.

use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

/// Prefix shared by every external-command failure message.
pub const EXTERNAL_COMMAND_MARKER: &str = "Error running external command";

/// Failure of an external process started by a [`crate::exec::CommandRunner`].
#[derive(Debug, Error)]
pub enum ExecError {
    /// The process could not be launched or exited unsuccessfully.
    #[error("Error running external command: {program}, args: {args}, err: {reason}, stderr: {stderr}")]
    Failed {
        program: String,
        /// Arguments joined with single spaces.
        args: String,
        /// OS error or exit status description.
        reason: String,
        stderr: String,
    },

    /// The process outlived its deadline and was killed.
    #[error("Error running external command: {program}, args: {args}, err: timed out after {timeout:?}, stderr: {stderr}")]
    TimedOut {
        program: String,
        args: String,
        timeout: Duration,
        stderr: String,
    },
}

impl ExecError {
    pub(crate) fn failed(
        program: &str,
        args: &[&str],
        reason: impl ToString,
        stderr: impl Into<String>,
    ) -> Self {
        ExecError::Failed {
            program: program.to_string(),
            args: args.join(" "),
            reason: reason.to_string(),
            stderr: stderr.into(),
        }
    }
}

/// Failure while validating or inspecting a container.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("docker container id not set")]
    IdNotSet,

    #[error("docker container id is not running")]
    NotRunning,

    /// Passed through untouched; it already names the command and its stderr.
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("unable to decode docker inspect output")]
    Decode(#[from] serde_json::Error),

    #[error("docker container id not found: {0}")]
    NotFound(String),

    #[error("docker container id matched multiple results: {0}")]
    MultipleFound(String),

    #[error("docker container id has exposed or published ports that cannot be parsed: {0}")]
    MalformedPortSpec(String),

    #[error("invalid port number {value:?}")]
    PortNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error(
        "docker container has a public port mapped to multiple private ports for public port: {0}"
    )]
    MultiplePortsMapped(String),
}
