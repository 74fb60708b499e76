//! Resolve where a running container can be reached.
//!
//!   - `exec`      — external command port and the `std::process` adapter
//!   - `container` — runtime-independent `Container` trait and `PortMapping`
//!   - `docker`    — `docker inspect` backed implementation
//!   - `config`    — env / file / default configuration
//!   - `error`     — `ExecError` and `InspectError`

pub mod config;
pub mod container;
pub mod docker;
pub mod error;
pub mod exec;

pub use container::{Container, PortMapping};
pub use docker::DockerContainer;
pub use error::{ExecError, InspectError};
pub use exec::{CommandRunner, OsCommandRunner};
