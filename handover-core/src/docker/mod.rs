//! Docker backend: resolves a container through `docker inspect`.
//!
//!   - `inspect` — serde model of the inspect JSON
//!   - `ports`   — pure parsing of `NetworkSettings.Ports` entries

pub mod inspect;
pub mod ports;

use log::{debug, info};

use crate::container::{is_operationally_running, Container, PortMapping};
use crate::error::InspectError;
use crate::exec::CommandRunner;
use ports::{parse_inspect_ports, PortParse};

/// Default executable used to reach the Docker daemon.
pub const DEFAULT_DOCKER: &str = "docker";

/// A Docker container looked up by id or name.
///
/// State is only meaningful after a successful [`Container::inspect`]. A
/// failed inspection leaves partial data behind; discard the value then.
pub struct DockerContainer<R> {
    id: String,
    runner: R,
    program: String,
    paused: bool,
    running: bool,
    ip_address: String,
    ports: Vec<PortMapping>,
}

impl<R: CommandRunner> DockerContainer<R> {
    /// Create an un-inspected container. Performs no I/O.
    pub fn new(id: impl Into<String>, runner: R) -> Self {
        Self {
            id: id.into(),
            runner,
            program: DEFAULT_DOCKER.to_string(),
            paused: false,
            running: false,
            ip_address: String::new(),
            ports: Vec::new(),
        }
    }

    /// Use a different docker-compatible executable (e.g. `podman`).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Validate `id`, then inspect it.
    ///
    /// An empty id fails before the runtime is ever called.
    pub fn connect(id: impl Into<String>, runner: R) -> Result<Self, InspectError> {
        let mut container = Self::new(id, runner);
        container.is_valid()?;
        container.inspect()?;
        Ok(container)
    }

    /// Access the underlying runner (useful for inspection in tests).
    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    fn reset(&mut self) {
        self.paused = false;
        self.running = false;
        self.ip_address.clear();
        self.ports.clear();
    }
}

impl<R: CommandRunner> Container for DockerContainer<R> {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_valid(&self) -> Result<(), InspectError> {
        if self.id.is_empty() {
            return Err(InspectError::IdNotSet);
        }
        Ok(())
    }

    fn is_running(&self) -> Result<(), InspectError> {
        if is_operationally_running(self.running, self.paused) {
            Ok(())
        } else {
            Err(InspectError::NotRunning)
        }
    }

    fn inspect(&mut self) -> Result<(), InspectError> {
        self.reset();

        let stdout = self.runner.run(&self.program, &["inspect", self.id.as_str()])?;
        let mut records = inspect::decode(&stdout)?;

        let record = match records.len() {
            0 => return Err(InspectError::NotFound(self.id.clone())),
            1 => records.remove(0),
            _ => return Err(InspectError::MultipleFound(self.id.clone())),
        };

        self.paused = record.state.paused;
        self.running = record.state.running;
        self.ip_address = record.network_settings.ip_address;

        for (public, private) in &record.network_settings.ports {
            match parse_inspect_ports(public, &private.0)? {
                PortParse::Mapped(mapping) => self.ports.push(mapping),
                PortParse::Unpublished => {
                    debug!("{}: port {} is not published, skipping", self.id, public);
                }
            }
        }

        info!(
            "{}: running={} paused={} ip={:?} ports={}",
            self.id,
            self.running,
            self.paused,
            self.ip_address,
            self.ports.len()
        );
        Ok(())
    }

    fn ip_address(&self) -> &str {
        &self.ip_address
    }

    fn ports(&self) -> &[PortMapping] {
        &self.ports
    }
}
