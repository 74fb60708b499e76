use anyhow::Result;
use clap::Parser;
use handover_core::{
    config::{default_handover_dir, HandoverConfig},
    CommandRunner, Container, DockerContainer, InspectError, OsCommandRunner,
};
use log::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "handover",
    version,
    about = "Find where a running Docker container can be reached",
    long_about = "handover inspects a Docker container, checks that it is running and not paused,\nand prints its internal IP address and published ports."
)]
pub struct Cli {
    /// Container ID (or name) to inspect
    #[arg(short, long, default_value = "")]
    pub id: String,

    /// Be verbose
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let config = HandoverConfig::load(&default_handover_dir())?;
    debug!(
        "using {} (timeout: {:?})",
        config.docker, config.timeout
    );

    let runner = match config.timeout {
        Some(t) => OsCommandRunner::with_timeout(t),
        None => OsCommandRunner::new(),
    };

    let container = resolve(&cli.id, runner, &config.docker)?;
    print!("{}", format_report(&container));
    Ok(())
}

/// Validate, inspect, and require a running container, in that order.
///
/// An invalid id fails before `program` is ever run.
pub fn resolve<R: CommandRunner>(
    id: &str,
    runner: R,
    program: &str,
) -> Result<DockerContainer<R>, InspectError> {
    let mut container = DockerContainer::new(id, runner).with_program(program);
    container.is_valid()?;
    container.inspect()?;
    container.is_running()?;
    info!("{} is running at {:?}", container.id(), container.ip_address());
    Ok(container)
}

/// One `ip:` line followed by a `port:` line per published port.
pub fn format_report(container: &impl Container) -> String {
    let mut out = format!("ip: {}\n", container.ip_address());
    for port in container.ports() {
        out.push_str(&format!("port: {port}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use handover_core::ExecError;

    const RUNNING: &str = r#"[{
        "NetworkSettings": {
            "IPAddress": "172.17.0.3",
            "Ports": {"443/tcp": null, "80/tcp": [{"HostIp": "0.0.0.0", "HostPort": "49154"}]}
        },
        "State": {"Paused": false, "Running": true}
    }]"#;

    const PAUSED: &str = r#"[{"State": {"Paused": true, "Running": true}}]"#;

    fn canned(stdout: &'static str) -> impl Fn(&str, &[&str]) -> Result<String, ExecError> {
        move |_: &str, _: &[&str]| Ok(stdout.to_string())
    }

    // ── Argument parsing ─────────────────────────────────────────────────────

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["handover", "-i", "abc123", "-v"]).unwrap();
        assert_eq!(cli.id, "abc123");
        assert!(cli.verbose);
    }

    #[test]
    fn parses_long_flags() {
        let cli = Cli::try_parse_from(["handover", "--id", "web"]).unwrap();
        assert_eq!(cli.id, "web");
        assert!(!cli.verbose);
    }

    #[test]
    fn id_defaults_to_empty() {
        let cli = Cli::try_parse_from(["handover"]).unwrap();
        assert!(cli.id.is_empty());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["handover", "--json"]).is_err());
    }

    // ── resolve ──────────────────────────────────────────────────────────────

    #[test]
    fn resolve_running_container() {
        let c = resolve("web", canned(RUNNING), "docker").unwrap();
        assert_eq!(c.ip_address(), "172.17.0.3");
        assert_eq!(c.ports().len(), 1);
    }

    #[test]
    fn resolve_rejects_empty_id_before_running_docker() {
        let runner = |_: &str, _: &[&str]| -> Result<String, ExecError> {
            panic!("docker must not be called")
        };
        let err = resolve("", runner, "docker").err().unwrap();
        assert!(matches!(err, InspectError::IdNotSet));
    }

    #[test]
    fn resolve_rejects_paused_container() {
        let err = resolve("web", canned(PAUSED), "docker").err().unwrap();
        assert!(matches!(err, InspectError::NotRunning));
    }

    #[test]
    fn resolve_uses_configured_program() {
        let runner = |program: &str, args: &[&str]| -> Result<String, ExecError> {
            assert_eq!(program, "podman");
            assert_eq!(args, ["inspect", "web"]);
            Ok(RUNNING.to_string())
        };
        assert!(resolve("web", runner, "podman").is_ok());
    }

    // ── format_report ────────────────────────────────────────────────────────

    #[test]
    fn report_lists_ip_and_ports() {
        let c = resolve("web", canned(RUNNING), "docker").unwrap();
        assert_eq!(format_report(&c), "ip: 172.17.0.3\nport: 80/tcp -> 49154\n");
    }
}
