//! Port-specifier parsing for `NetworkSettings.Ports` entries.
//!
//! Pure functions, no I/O. Whether an unpublished port is an error is left
//! to the caller: parsing reports it as [`PortParse::Unpublished`].

use super::inspect::HostBinding;
use crate::container::PortMapping;
use crate::error::InspectError;

/// Outcome of parsing one `"<port>/<proto>"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortParse {
    /// Published with exactly one host binding.
    Mapped(PortMapping),
    /// Configured (e.g. `EXPOSE` in the Dockerfile) but never published.
    Unpublished,
}

/// Parse one port key and its host bindings.
///
/// Fatal cases: a key that isn't exactly `port/proto`, a port number outside
/// `u16`, or more than one host binding for the same key.
pub fn parse_inspect_ports(public: &str, private: &[HostBinding]) -> Result<PortParse, InspectError> {
    let Some((port, proto)) = split_spec(public) else {
        return Err(InspectError::MalformedPortSpec(public.to_string()));
    };

    let public_port = parse_port(port)?;

    let binding = match private {
        [] => return Ok(PortParse::Unpublished),
        [one] => one,
        _ => return Err(InspectError::MultiplePortsMapped(public.to_string())),
    };

    let private_port = parse_port(&binding.host_port)?;

    Ok(PortParse::Mapped(PortMapping {
        public_port,
        private_port,
        proto: proto.to_string(),
    }))
}

/// Split `"80/tcp"` into `("80", "tcp")`; both halves must be non-empty.
fn split_spec(spec: &str) -> Option<(&str, &str)> {
    let mut parts = spec.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(port), Some(proto), None) if !port.is_empty() && !proto.is_empty() => {
            Some((port, proto))
        }
        _ => None,
    }
}

fn parse_port(value: &str) -> Result<u16, InspectError> {
    // `str::parse` tolerates a leading '+'; a lone "+" fails with InvalidDigit.
    let digits = if value.starts_with('+') { "+" } else { value };
    digits.parse::<u16>().map_err(|source| InspectError::PortNumber {
        value: value.to_string(),
        source,
    })
}
