//! Client for a Tracker 3 SPARQL endpoint on the session bus
//!
//! `org.freedesktop.Tracker3.Endpoint.Query` takes the query text, the write
//! end of a pipe and an (empty) argument dictionary. It replies with the
//! selected variable names and streams the rows into the pipe, which we
//! read until the endpoint closes its end.

use super::cursor::decode_rows;
use super::sparql::{build_search, SEARCH_COLUMNS};
use super::types::{Candidate, IndexError, IndexService, Kind, SearchRequest};
use dbus::arg::{OwnedFd, Variant};
use dbus::blocking::Connection;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsRawFd, FromRawFd};
use std::time::{Duration, Instant};
use url::Url;

/// Bus name of the filesystem miner's endpoint
pub const DEFAULT_BUS_NAME: &str = "org.freedesktop.Tracker3.Miner.Files";

const ENDPOINT_PATH: &str = "/org/freedesktop/Tracker3/Endpoint";
const ENDPOINT_INTERFACE: &str = "org.freedesktop.Tracker3.Endpoint";

/// Default bound on the D-Bus call and the cursor read
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Tracker endpoint reachable over the session bus
pub struct TrackerEndpoint {
    bus_name: String,
    timeout: Duration,
}

impl TrackerEndpoint {
    pub fn new(bus_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bus_name: bus_name.into(),
            timeout,
        }
    }

    /// Run a SELECT and return its rows, each with exactly `columns` values
    fn query(&self, sparql: &str, columns: usize) -> Result<Vec<Vec<String>>, IndexError> {
        let deadline = Instant::now() + self.timeout;
        let conn = Connection::new_session()?;
        let (reader, writer) = pipe()?;
        let args: HashMap<&str, Variant<u32>> = HashMap::new();

        let proxy = conn.with_proxy(self.bus_name.as_str(), ENDPOINT_PATH, self.timeout);
        let (variables,): (Vec<String>,) =
            proxy.method_call(ENDPOINT_INTERFACE, "Query", (sparql, writer, args))?;

        if variables.len() != columns {
            return Err(IndexError::Protocol(format!(
                "expected {} variables, got {}",
                columns,
                variables.len()
            )));
        }

        let buf = read_until_closed(reader, deadline)?;
        decode_rows(&buf, columns)
    }
}

impl IndexService for TrackerEndpoint {
    fn search(&self, request: &SearchRequest) -> Result<Vec<Candidate>, IndexError> {
        let sparql = build_search(request);
        tracing::debug!(bus = %self.bus_name, %sparql, "querying endpoint");

        let rows = self.query(&sparql, SEARCH_COLUMNS)?;
        Ok(rows.into_iter().filter_map(candidate_from_row).collect())
    }
}

/// Convert a `?uri ?title ?kind` row, skipping rows with an unparseable URL
fn candidate_from_row(row: Vec<String>) -> Option<Candidate> {
    let mut values = row.into_iter();
    let uri = values.next()?;
    let title = values.next().unwrap_or_default();
    let kind = Kind::from_column(&values.next().unwrap_or_default());

    let url = match Url::parse(&uri) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(%uri, error = %e, "skipping row with invalid url");
            return None;
        }
    };

    Some(Candidate::new(describe(&url, &title), kind, uri))
}

/// Human-readable label: `name: title [parent]`, omitting missing parts
pub fn describe(url: &Url, title: &str) -> String {
    let decode = |s: &str| percent_decode_str(s).decode_utf8_lossy().into_owned();

    let (name, parent) = match url.path_segments() {
        Some(mut segments) => {
            let name = segments.next_back().map(decode).filter(|n| !n.is_empty());
            let parent = segments.map(decode).collect::<Vec<_>>().join("/");
            (name, Some(format!("/{}", parent)))
        }
        None => (None, None),
    };

    let mut label = String::new();

    if let Some(name) = name {
        label.push_str(&name);
    }

    if !title.is_empty() {
        if !label.is_empty() {
            label.push_str(": ");
        }
        label.push_str(title);
    }

    if label.is_empty() {
        label.push_str(url.as_str());
    }

    if let Some(parent) = parent {
        label.push_str(&format!(" [{}]", parent));
    }

    label
}

/// Create a pipe: our read end as a `File`, the write end ready to be sent
fn pipe() -> io::Result<(File, OwnedFd)> {
    let mut fds = [0 as libc::c_int; 2];
    if unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) } == -1 {
        return Err(io::Error::last_os_error());
    }

    // Both descriptors are freshly created and owned by nobody else
    let reader = unsafe { File::from_raw_fd(fds[0]) };
    let writer = unsafe { OwnedFd::new(fds[1]) };
    Ok((reader, writer))
}

/// Read `file` to EOF, giving up once `deadline` passes
fn read_until_closed(mut file: File, deadline: Instant) -> Result<Vec<u8>, IndexError> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(IndexError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "timed out reading results",
            )));
        }

        let mut pfd = libc::pollfd {
            fd: file.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        let timeout_ms = remaining.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;

        match unsafe { libc::poll(&mut pfd, 1, timeout_ms) } {
            -1 => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err.into());
            }
            0 => continue,
            _ => {}
        }

        match file.read(&mut chunk) {
            Ok(0) => return Ok(buf),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
