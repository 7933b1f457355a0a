//! Shared helpers for the example applications.

use ap_util_bytestring::Bytestring;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by RUST_LOG.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// The leading fields of a /proc/<pid>/stat or /proc/<pid>/task/<tid>/stat file.
#[derive(Debug, PartialEq, Eq)]
pub struct Stat<'a> {
    pub pid: u64,
    /// The command name without the parentheses.
    pub comm: &'a [u8],
    pub state: u8,
    pub ppid: u64,
    /// The fields following the parent pid.
    pub more: usize,
}

impl<'a> Stat<'a> {
    /// Parse the line.
    ///
    /// The command name may contain spaces and parentheses itself, so it ends
    /// at the last closing parenthesis.
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let mut bstr = Bytestring::new(line);
        let pid = bstr.uint64()?;
        if !bstr.skip_text(b" (") {
            return None;
        }
        let rest = bstr.rest();
        let close = rest.iter().rposition(|&ch| ch == b')')?;
        let comm = &rest[..close];

        let mut bstr = Bytestring::new(&rest[close + 1..]);
        if bstr.skip_space() {
            return None;
        }
        let state = bstr.next_byte()?;
        if bstr.skip_space() {
            return None;
        }
        let ppid = bstr.uint64()?;
        Some(Self { pid, comm, state, ppid, more: bstr.num_fields() })
    }
}
