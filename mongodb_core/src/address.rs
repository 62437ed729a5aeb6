use std::fmt;

use serde::{Deserialize, Serialize};

/// Port assumed when a host is given without one.
pub const DEFAULT_PORT: u16 = 27017;

/// The network address of a server, either `host:port` or a unix socket path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `"unix"` for socket paths and `"tcp"` for everything else.
    pub fn network(&self) -> &'static str {
        if self.0.ends_with(".sock") {
            "unix"
        } else {
            "tcp"
        }
    }

    /// Normalizes the address so two spellings of the same server compare equal.
    ///
    /// The address is lowercased, a trailing `.` on a fully qualified host is
    /// dropped and the default port is appended when none is present. Socket
    /// paths are only lowercased and an empty address stays empty.
    pub fn canonicalize(&self) -> Address {
        if self.0.is_empty() {
            return Address::default();
        }

        let lowered = self.0.to_lowercase();
        if self.network() == "unix" {
            return Address(lowered);
        }

        let (host, port) = split_host_port(&lowered);
        let host = host.strip_suffix('.').unwrap_or(host);
        let port = port.map(str::to_string).unwrap_or_else(|| DEFAULT_PORT.to_string());

        if host.contains(':') && !host.starts_with('[') {
            // Bare IPv6 literal
            Address(format!("[{}]:{}", host, port))
        } else {
            Address(format!("{}:{}", host, port))
        }
    }
}

/// Splits `host[:port]`, keeping bracketed IPv6 literals intact.
fn split_host_port(address: &str) -> (&str, Option<&str>) {
    if let Some(end) = address.find(']') {
        let host = &address[..=end];
        let port = address[end + 1..].strip_prefix(':').filter(|p| !p.is_empty());
        return (host, port);
    }

    match address.rfind(':') {
        // More than one colon without brackets means an IPv6 literal with no port
        Some(idx) if address[..idx].contains(':') => (address, None),
        Some(idx) if idx + 1 < address.len() => (&address[..idx], Some(&address[idx + 1..])),
        Some(idx) => (&address[..idx], None),
        None => (address, None),
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address(value.to_string())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Address(value)
    }
}
