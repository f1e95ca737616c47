//! The endpoint address value.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use tracing::debug;

use crate::{EndpointError, Result};

/// Address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl Family {
    /// Address width in bits.
    pub fn bit_width(self) -> u32 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }
}

/// An IPv4 or IPv6 transport endpoint.
///
/// The port is held in host order. Ordering compares family first (V4 before
/// V6), then the raw address bytes, then the port, so addresses can key
/// ordered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Address {
    /// IPv4 endpoint
    V4 {
        /// Address bytes in network order
        ip: [u8; 4],
        /// UDP port
        port: u16,
    },
    /// IPv6 endpoint
    V6 {
        /// Address bytes in network order
        ip: [u8; 16],
        /// UDP port
        port: u16,
    },
}

impl Address {
    /// Create an IPv4 address
    pub fn v4(a: u8, b: u8, c: u8, d: u8, port: u16) -> Self {
        Address::V4 {
            ip: [a, b, c, d],
            port,
        }
    }

    /// Create an IPv6 address from bytes
    pub fn v6(ip: [u8; 16], port: u16) -> Self {
        Address::V6 { ip, port }
    }

    /// Parse endpoint text. See [`parse`].
    pub fn parse(text: &str, default_port: u16, numeric: bool) -> Result<Self> {
        parse(text, default_port, numeric)
    }

    /// Address family.
    pub fn family(&self) -> Family {
        match self {
            Address::V4 { .. } => Family::V4,
            Address::V6 { .. } => Family::V6,
        }
    }

    /// Raw address bytes (4 or 16).
    pub fn ip_bytes(&self) -> &[u8] {
        match self {
            Address::V4 { ip, .. } => &ip[..],
            Address::V6 { ip, .. } => &ip[..],
        }
    }

    /// Address without the port, e.g. `192.0.2.5` or `::1`.
    pub fn ip_string(&self) -> String {
        self.ip().to_string()
    }

    /// Port in host order.
    pub fn port(&self) -> u16 {
        match self {
            Address::V4 { port, .. } | Address::V6 { port, .. } => *port,
        }
    }

    /// Same address with a different port.
    #[must_use]
    pub fn with_port(self, port: u16) -> Self {
        match self {
            Address::V4 { ip, .. } => Address::V4 { ip, port },
            Address::V6 { ip, .. } => Address::V6 { ip, port },
        }
    }

    /// Check if this is an IPv4 address
    pub fn is_ipv4(&self) -> bool {
        matches!(self, Address::V4 { .. })
    }

    /// Check if this is an IPv6 address
    pub fn is_ipv6(&self) -> bool {
        matches!(self, Address::V6 { .. })
    }

    fn ip(&self) -> IpAddr {
        match self {
            Address::V4 { ip, .. } => IpAddr::V4(Ipv4Addr::from(*ip)),
            Address::V6 { ip, .. } => IpAddr::V6(Ipv6Addr::from(*ip)),
        }
    }
}

impl From<SocketAddr> for Address {
    fn from(addr: SocketAddr) -> Self {
        match addr.ip() {
            IpAddr::V4(ip) => Address::V4 {
                ip: ip.octets(),
                port: addr.port(),
            },
            IpAddr::V6(ip) => Address::V6 {
                ip: ip.octets(),
                port: addr.port(),
            },
        }
    }
}

impl From<Address> for SocketAddr {
    fn from(addr: Address) -> Self {
        SocketAddr::new(addr.ip(), addr.port())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip() {
            IpAddr::V4(ip) => write!(f, "{}:{}", ip, self.port()),
            IpAddr::V6(ip) => write!(f, "[{}]:{}", ip, self.port()),
        }
    }
}

impl FromStr for Address {
    type Err = EndpointError;

    /// Numeric parse with port 0 when none is given.
    fn from_str(s: &str) -> Result<Self> {
        parse(s, 0, true)
    }
}

/// Render as `a.b.c.d:port` or `[v6]:port`.
pub fn format(addr: &Address) -> String {
    addr.to_string()
}

/// Parse `host`, `host:port`, `[v6]`, `[v6]:port` or a bare IPv6 literal.
///
/// Without a port suffix `default_port` is used. With `numeric` set only IP
/// literals are accepted; otherwise `host` may be a name, resolved through the
/// system resolver (first result wins).
///
/// # Errors
///
/// - `InvalidArgument`: port suffix is not a number in `0..=65535`
/// - `InvalidFormat`: anything else that is not an endpoint
pub fn parse(text: &str, default_port: u16, numeric: bool) -> Result<Address> {
    let text = text.trim();
    let invalid = || EndpointError::InvalidFormat(format!("'{text}'"));

    let (host, port_text, bracketed) = if let Some(rest) = text.strip_prefix('[') {
        let (host, after) = rest.split_once(']').ok_or_else(invalid)?;
        match after {
            "" => (host, None, true),
            _ => (host, Some(after.strip_prefix(':').ok_or_else(invalid)?), true),
        }
    } else if text.matches(':').count() > 1 {
        (text, None, false)
    } else if let Some((host, port)) = text.split_once(':') {
        (host, Some(port), false)
    } else {
        (text, None, false)
    };

    if host.is_empty() {
        return Err(invalid());
    }

    let port = match port_text {
        None => default_port,
        Some(p) => p
            .parse::<u16>()
            .map_err(|_| EndpointError::InvalidArgument(format!("bad port '{p}'")))?,
    };

    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) if bracketed => Err(invalid()),
        Ok(ip) => Ok(SocketAddr::new(ip, port).into()),
        Err(_) if numeric || bracketed => Err(invalid()),
        Err(_) => resolve(host, port),
    }
}

fn resolve(host: &str, port: u16) -> Result<Address> {
    let mut addrs = (host, port).to_socket_addrs().map_err(|e| {
        debug!("Resolution of '{}' failed: {}", host, e);
        EndpointError::InvalidFormat(format!("cannot resolve '{host}': {e}"))
    })?;
    addrs
        .next()
        .map(Address::from)
        .ok_or_else(|| EndpointError::InvalidFormat(format!("'{host}' has no addresses")))
}
