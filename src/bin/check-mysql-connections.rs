//! Check how many clients are connected to a MySQL server

use std::path::PathBuf;

use serde::Deserialize;
use structopt::clap::{self, ErrorKind};
use structopt::StructOpt;
use tracing::debug;

use mysql_plugins::connections::ConnectionCounts;
use mysql_plugins::credentials::Credentials;
use mysql_plugins::logging;
use mysql_plugins::target::{validate_port, Target};
use mysql_plugins::thresholds::{Mode, Outcome, Thresholds};
use mysql_plugins::Status;

/// Check the number of connections to a MySQL server.
///
/// Compares Threads_connected against the thresholds, either as an absolute
/// number or, with --percentage, as a percent of max_connections.
#[derive(Deserialize, Debug, StructOpt)]
#[structopt(
    name = "check-mysql-connections (part of mysql-plugins)",
    setting = structopt::clap::AppSettings::ColoredHelp,
    after_help = "Credentials:

    If --ini is given, user and password are read from the 'user' and
    'password' keys of --ini-section and --user/--password are ignored.

Examples:

    Warn at 100 connections, go critical at 128:

        check-mysql-connections -u monitor -p secret

    Use the [client] section of a my.cnf and alert at 80%/90% of
    max_connections:

        check-mysql-connections --ini /etc/mysql/debian.cnf --percentage -w 80 -c 90"
)]
struct Args {
    #[structopt(short = "u", long = "user", help = "MySQL user to connect")]
    user: Option<String>,
    #[structopt(short = "p", long = "password", help = "Password for user")]
    password: Option<String>,
    #[structopt(
        short = "i",
        long = "ini",
        parse(from_os_str),
        help = "Location of my.cnf ini file for access to MySQL"
    )]
    ini: Option<PathBuf>,
    #[structopt(
        long = "ini-section",
        default_value = "client",
        help = "Section to use from my.cnf ini file"
    )]
    ini_section: String,
    #[structopt(long = "hostname", default_value = "localhost", help = "Hostname to login to")]
    hostname: String,
    #[structopt(long = "port", default_value = "3306", help = "Port to connect to")]
    port: u32,
    #[structopt(
        short = "s",
        long = "socket",
        parse(from_os_str),
        help = "Socket to use, takes precedence over --hostname and --port"
    )]
    socket: Option<PathBuf>,
    #[structopt(
        short = "d",
        long = "database",
        default_value = "test",
        help = "Database schema to connect to"
    )]
    database: String,
    #[structopt(
        short = "w",
        long = "warning",
        default_value = "100",
        help = "Number of connections upon which we will issue a warning"
    )]
    warning: u64,
    #[structopt(
        short = "c",
        long = "critical",
        default_value = "128",
        help = "Number of connections upon which we will issue an alert"
    )]
    critical: u64,
    #[structopt(
        long = "percentage",
        help = "Use percentage of defined max connections instead of absolute value"
    )]
    percentage: bool,
    #[structopt(
        short = "v",
        long = "verbose",
        help = "Log what the check is doing to stderr"
    )]
    verbose: bool,
}

impl Args {
    fn thresholds(&self) -> Thresholds {
        Thresholds {
            warning: self.warning,
            critical: self.critical,
            mode: if self.percentage {
                Mode::Percentage
            } else {
                Mode::Absolute
            },
        }
    }

    /// Validate everything that can be checked without a server and work out
    /// where to connect
    fn target(&self) -> Result<Target, Outcome> {
        let port = validate_port(self.port)
            .map_err(|e| Outcome::new(Status::Critical, e.to_string()))?;
        let credentials = Credentials::resolve(
            self.ini.as_ref().map(PathBuf::as_path),
            &self.ini_section,
            self.user.as_ref().map_or("", String::as_str),
            self.password.as_ref().map_or("", String::as_str),
        )
        .map_err(|e| Outcome::new(Status::Critical, e.to_string()))?;
        Ok(Target::new(
            self.socket.clone(),
            &self.hostname,
            port,
            &self.database,
            credentials,
        ))
    }
}

fn do_check(args: &Args) -> Outcome {
    let target = match args.target() {
        Ok(target) => target,
        Err(outcome) => return outcome,
    };
    debug!(%target, thresholds = ?args.thresholds(), "checking connections");
    match ConnectionCounts::load(&target) {
        Ok(counts) => args.thresholds().evaluate(counts),
        Err(e) => Outcome::new(Status::Critical, e.to_string()),
    }
}

/// Bad arguments are UNKNOWN, clap's own exit code 1 would read as WARNING
fn usage_error(e: &clap::Error) -> Outcome {
    let first_line = e.message.lines().next().unwrap_or("");
    let message = first_line.trim_start_matches("error: ").trim();
    Outcome::new(Status::Unknown, format!("invalid arguments: {}", message))
}

fn report(outcome: &Outcome) -> ! {
    println!(
        "{} [check-mysql-connections]: {}",
        outcome.status, outcome.message
    );
    outcome.status.exit();
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    let args = match Args::from_args_safe() {
        Ok(args) => args,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => report(&usage_error(&e)),
        },
    };
    logging::init(args.verbose);

    report(&do_check(&args));
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use std::path::PathBuf;

    use structopt::StructOpt;
    use tempfile::NamedTempFile;

    use mysql_plugins::credentials::Credentials;
    use mysql_plugins::target::Endpoint;
    use mysql_plugins::thresholds::Mode;
    use mysql_plugins::Status;

    use super::{do_check, usage_error, Args};

    fn build_args(argv: Vec<&str>) -> Args {
        Args::from_iter(argv.into_iter())
    }

    #[test]
    fn defaults() {
        let args = build_args(vec!["check-mysql-connections"]);
        assert_eq!(args.user, None);
        assert_eq!(args.ini, None);
        assert_eq!(args.ini_section, "client");
        assert_eq!(args.hostname, "localhost");
        assert_eq!(args.port, 3306);
        assert_eq!(args.database, "test");
        assert_eq!(args.warning, 100);
        assert_eq!(args.critical, 128);
        assert_eq!(args.percentage, false);
        assert_eq!(args.thresholds().mode, Mode::Absolute);
    }

    #[test]
    fn short_flags() {
        let args = build_args(vec![
            "check-mysql-connections",
            "-u",
            "monitor",
            "-p",
            "secret",
            "-s",
            "/tmp/mysql.sock",
            "-d",
            "mysql",
            "-w",
            "70",
            "-c",
            "90",
            "--percentage",
        ]);
        assert_eq!(args.user.as_ref().map(String::as_str), Some("monitor"));
        assert_eq!(args.password.as_ref().map(String::as_str), Some("secret"));
        assert_eq!(args.socket, Some(PathBuf::from("/tmp/mysql.sock")));
        assert_eq!(args.database, "mysql");
        let thresholds = args.thresholds();
        assert_eq!(thresholds.warning, 70);
        assert_eq!(thresholds.critical, 90);
        assert_eq!(thresholds.mode, Mode::Percentage);
    }

    #[test]
    fn bad_thresholds_are_unknown() {
        for argv in vec![
            vec!["check-mysql-connections", "-w", "-1"],
            vec!["check-mysql-connections", "--critical", "lots"],
            vec!["check-mysql-connections", "--port", "-5"],
        ] {
            let err = Args::from_iter_safe(argv.clone().into_iter())
                .err()
                .unwrap_or_else(|| panic!("{:?} should not parse", argv));
            let outcome = usage_error(&err);
            assert_eq!(outcome.status, Status::Unknown);
            assert!(
                outcome.message.starts_with("invalid arguments: "),
                "unexpected message: {}",
                outcome.message
            );
            assert!(!outcome.message.contains('\n'));
        }
    }

    #[test]
    fn flags_build_a_tcp_target() {
        let args = build_args(vec![
            "check-mysql-connections",
            "-u",
            "monitor",
            "--hostname",
            "db1",
            "--port",
            "3307",
        ]);
        let target = args.target().unwrap();
        assert_eq!(
            target.endpoint,
            Endpoint::Tcp {
                host: "db1".to_owned(),
                port: 3307
            }
        );
        assert_eq!(target.credentials, Credentials::new("monitor", ""));
    }

    #[test]
    fn invalid_port_is_critical() {
        for port in ["1", "65535", "99999"].iter().cloned() {
            let args = build_args(vec!["check-mysql-connections", "--port", port]);
            let outcome = do_check(&args);
            assert_eq!(outcome.status, Status::Critical);
            assert_eq!(
                outcome.message,
                "invalid port, should be a value between 1 and 65535"
            );
        }
    }

    #[test]
    fn missing_ini_is_critical() {
        let args = build_args(vec![
            "check-mysql-connections",
            "--ini",
            "/nonexistent/my.cnf",
        ]);
        let outcome = do_check(&args);
        assert_eq!(outcome.status, Status::Critical);
        assert_eq!(
            outcome.message,
            "unable to open the supplied config file /nonexistent/my.cnf"
        );
    }

    #[test]
    fn ini_credentials_replace_flags() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[monitoring]\nuser = nagios\npassword = s3cret").unwrap();
        let path = file.path().to_str().unwrap().to_owned();
        let args = build_args(vec![
            "check-mysql-connections",
            "-u",
            "root",
            "-i",
            &path,
            "--ini-section",
            "monitoring",
        ]);
        let target = args.target().unwrap();
        assert_eq!(target.credentials, Credentials::new("nagios", "s3cret"));

        let args = build_args(vec!["check-mysql-connections", "-i", &path]);
        let outcome = do_check(&args);
        assert_eq!(outcome.status, Status::Critical);
        assert_eq!(
            outcome.message,
            format!("unable to read section client from {}", path)
        );
    }

    #[test]
    fn unreachable_server_is_critical() {
        let args = build_args(vec![
            "check-mysql-connections",
            "--socket",
            "/nonexistent/mysqld.sock",
        ]);
        let outcome = do_check(&args);
        assert_eq!(outcome.status, Status::Critical);
        assert!(
            outcome.message.starts_with("error connecting to MySQL: "),
            "unexpected message: {}",
            outcome.message
        );
    }
}
