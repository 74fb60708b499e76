//! Runtime-independent container types.
//!
//! [`Container`] is what other runtimes (LXC, rkt, ...) would implement next
//! to [`crate::docker::DockerContainer`].

use std::fmt;

use crate::error::InspectError;

/// One published port of a container.
///
/// Field naming follows the inspection data, not the usual intuition:
/// `public_port` is the container-side port from the `"<port>/<proto>"` key
/// and `private_port` is the host port Docker bound it to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortMapping {
    /// Port number that should be published for external access.
    pub public_port: u16,
    /// Host port the runtime bridges to `public_port`.
    pub private_port: u16,
    /// Transport protocol, verbatim from the runtime (e.g. "tcp").
    pub proto: String,
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} -> {}", self.public_port, self.proto, self.private_port)
    }
}

/// A container is usable only when it runs and is not paused.
pub fn is_operationally_running(running: bool, paused: bool) -> bool {
    running && !paused
}

/// Operations every container runtime backend provides.
pub trait Container {
    /// Identifier the container was looked up by.
    fn id(&self) -> &str;

    /// Basic identifier checks before the identifier is used. No I/O.
    fn is_valid(&self) -> Result<(), InspectError>;

    /// Fails with [`InspectError::NotRunning`] unless running and not paused.
    fn is_running(&self) -> Result<(), InspectError>;

    /// Query the runtime and refresh state, address and ports.
    fn inspect(&mut self) -> Result<(), InspectError>;

    /// Internal IP address; empty when the runtime assigned none.
    fn ip_address(&self) -> &str;

    /// Published ports found by the last inspection.
    fn ports(&self) -> &[PortMapping];
}
