//! Documentation about the various scripts contained herein
//!
//! - [check-mysql-connections](#check-mysql-connections)
//!
//! # check-mysql-connections
//!
//! Needs network or socket access to a MySQL-compatible server.
//!
//! ```plain
//! $ check-mysql-connections --help
//! check-mysql-connections (part of mysql-plugins) 0.1.0
//! Brandon W Maister <quodlibetor@gmail.com>
//! Check the number of connections to a MySQL server.
//!
//! Compares Threads_connected against the thresholds, either as an absolute number or, with --percentage, as a percent of
//! max_connections.
//!
//! USAGE:
//!     check-mysql-connections [FLAGS] [OPTIONS]
//!
//! FLAGS:
//!     -h, --help          Prints help information
//!         --percentage    Use percentage of defined max connections instead of absolute value
//!     -V, --version       Prints version information
//!     -v, --verbose       Log what the check is doing to stderr
//!
//! OPTIONS:
//!     -c, --critical <critical>          Number of connections upon which we will issue an alert [default: 128]
//!     -d, --database <database>          Database schema to connect to [default: test]
//!         --hostname <hostname>          Hostname to login to [default: localhost]
//!     -i, --ini <ini>                    Location of my.cnf ini file for access to MySQL
//!         --ini-section <ini-section>    Section to use from my.cnf ini file [default: client]
//!     -p, --password <password>          Password for user
//!         --port <port>                  Port to connect to [default: 3306]
//!     -s, --socket <socket>              Socket to use, takes precedence over --hostname and --port
//!     -u, --user <user>                  MySQL user to connect
//!     -w, --warning <warning>            Number of connections upon which we will issue a warning [default: 100]
//!
//! Credentials:
//!
//!     If --ini is given, user and password are read from the 'user' and
//!     'password' keys of --ini-section and --user/--password are ignored.
//!
//! Examples:
//!
//!     Warn at 100 connections, go critical at 128:
//!
//!         check-mysql-connections -u monitor -p secret
//!
//!     Use the [client] section of a my.cnf and alert at 80%/90% of
//!     max_connections:
//!
//!         check-mysql-connections --ini /etc/mysql/debian.cnf --percentage -w 80 -c 90
//! ```
