//! Resolving the user and password to connect with
//!
//! Credentials either come straight from the command line or from a section
//! of a `my.cnf` style ini file, which is what MySQL's own clients read.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use derive_more::From;
use ini::{Ini, ParseOption};
use tracing::debug;

/// Everything that can go wrong reading credentials out of an ini file
#[derive(Debug, From)]
pub enum CredentialsError {
    /// The file isn't there at all
    #[from(ignore)]
    MissingFile(PathBuf),
    /// The file exists but couldn't be read or isn't valid ini
    Unreadable(PathBuf, ini::Error),
    /// The file parsed but doesn't have the section we were told to use
    #[from(ignore)]
    MissingSection { path: PathBuf, section: String },
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::CredentialsError::*;
        match self {
            MissingFile(path) => write!(
                f,
                "unable to open the supplied config file {}",
                path.display()
            ),
            Unreadable(..) => write!(f, "failed to read inifile"),
            MissingSection { path, section } => write!(
                f,
                "unable to read section {} from {}",
                section,
                path.display()
            ),
        }
    }
}

/// A user/password pair
///
/// Missing values are empty strings, the server decides whether that's ok.
#[derive(Clone, PartialEq, Default)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new<U: Into<String>, P: Into<String>>(user: U, password: P) -> Credentials {
        Credentials {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Read the `user` and `password` keys from `section` of the ini file at
    /// `path`
    pub fn from_ini(path: &Path, section: &str) -> Result<Credentials, CredentialsError> {
        if let Err(e) = fs::metadata(path) {
            if e.kind() == io::ErrorKind::NotFound {
                return Err(CredentialsError::MissingFile(path.to_owned()));
            }
        }
        // my.cnf values are taken literally, backslashes included
        let opt = ParseOption {
            enabled_escape: false,
            ..ParseOption::default()
        };
        let file = Ini::load_from_file_opt(path, opt).map_err(|e| {
            debug!(path = %path.display(), error = %e, "couldn't parse ini file");
            (path.to_owned(), e)
        })?;
        Credentials::from_section(&file, section).ok_or_else(|| {
            CredentialsError::MissingSection {
                path: path.to_owned(),
                section: section.to_owned(),
            }
        })
    }

    fn from_section(file: &Ini, section: &str) -> Option<Credentials> {
        let props = file.section(Some(section))?;
        let creds = Credentials::new(
            props.get("user").unwrap_or(""),
            props.get("password").unwrap_or(""),
        );
        debug!(section, user = %creds.user, "read credentials from ini section");
        Some(creds)
    }

    /// Pick between an ini file and explicit flags
    ///
    /// When an ini file is given the flags are ignored entirely, even if the
    /// section lacks one of the keys.
    pub fn resolve(
        ini: Option<&Path>,
        section: &str,
        user: &str,
        password: &str,
    ) -> Result<Credentials, CredentialsError> {
        match ini {
            Some(path) => Credentials::from_ini(path, section),
            None => Ok(Credentials::new(user, password)),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use std::path::Path;

    use tempfile::NamedTempFile;

    use super::{Credentials, CredentialsError};

    fn ini_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_client_section() {
        let file = ini_file(
            "[mysqld]\nuser = mysql\n\n[client]\nuser = monitor\npassword = hunter2\n",
        );
        let creds = Credentials::from_ini(file.path(), "client").unwrap();
        assert_eq!(creds, Credentials::new("monitor", "hunter2"));
    }

    #[test]
    fn unquotes_values() {
        let file = ini_file("[client]\nuser = \"monitor\"\npassword = \"p@ss word\"\n");
        let creds = Credentials::from_ini(file.path(), "client").unwrap();
        assert_eq!(creds, Credentials::new("monitor", "p@ss word"));
    }

    #[test]
    fn backslashes_are_kept() {
        let file = ini_file("[client]\nuser = monitor\npassword = pa\\ss\\word\n");
        let creds = Credentials::from_ini(file.path(), "client").unwrap();
        assert_eq!(creds.password, "pa\\ss\\word");
    }

    #[test]
    fn unparseable_file() {
        let file = ini_file("[client\nuser = monitor\n");
        match Credentials::from_ini(file.path(), "client") {
            Err(e @ CredentialsError::Unreadable(..)) => {
                assert_eq!(e.to_string(), "failed to read inifile")
            }
            other => panic!("expected unreadable file, got {:?}", other),
        }
    }

    #[test]
    fn missing_keys_are_empty() {
        let file = ini_file("[client]\nuser = monitor\n");
        let creds = Credentials::from_ini(file.path(), "client").unwrap();
        assert_eq!(creds, Credentials::new("monitor", ""));
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/nonexistent/dir/my.cnf");
        match Credentials::from_ini(path, "client") {
            Err(e @ CredentialsError::MissingFile(_)) => assert_eq!(
                e.to_string(),
                "unable to open the supplied config file /nonexistent/dir/my.cnf"
            ),
            other => panic!("expected missing file, got {:?}", other),
        }
    }

    #[test]
    fn missing_section() {
        let file = ini_file("[mysqld]\nuser = mysql\n");
        let err = Credentials::from_ini(file.path(), "client").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("unable to read section client from {}", file.path().display())
        );
    }

    #[test]
    fn flags_used_without_ini() {
        let creds = Credentials::resolve(None, "client", "root", "pw").unwrap();
        assert_eq!(creds, Credentials::new("root", "pw"));
    }

    #[test]
    fn ini_overrides_flags() {
        let file = ini_file("[backup]\nuser = backup\npassword = b\n");
        let creds = Credentials::resolve(Some(file.path()), "backup", "root", "pw").unwrap();
        assert_eq!(creds, Credentials::new("backup", "b"));
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("root", "hunter2");
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
