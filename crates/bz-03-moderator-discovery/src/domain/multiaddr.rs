//! Textual multiaddr parsing.
//!
//! Protocols with a known arity are split into `(protocol, value)` pairs.
//! Anything else is kept as an opaque, valueless component so an embedded
//! peer identity further along the address is still found.

use super::errors::AddressError;
use std::fmt;

/// Protocols recognised in pointer record addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    Ip4,
    Ip6,
    Dns,
    Dns4,
    Dns6,
    Dnsaddr,
    Tcp,
    Udp,
    Sctp,
    /// Embedded peer identity, legacy name.
    Ipfs,
    /// Embedded peer identity.
    P2p,
    Certhash,
    Sni,
    Quic,
    QuicV1,
    Ws,
    Wss,
    Tls,
    Http,
    Https,
    Utp,
    Webtransport,
    P2pCircuit,
    /// Not in the table; carries no value as far as parsing goes.
    Other(String),
}

impl Protocol {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ip4" => Self::Ip4,
            "ip6" => Self::Ip6,
            "dns" => Self::Dns,
            "dns4" => Self::Dns4,
            "dns6" => Self::Dns6,
            "dnsaddr" => Self::Dnsaddr,
            "tcp" => Self::Tcp,
            "udp" => Self::Udp,
            "sctp" => Self::Sctp,
            "ipfs" => Self::Ipfs,
            "p2p" => Self::P2p,
            "certhash" => Self::Certhash,
            "sni" => Self::Sni,
            "quic" => Self::Quic,
            "quic-v1" => Self::QuicV1,
            "ws" => Self::Ws,
            "wss" => Self::Wss,
            "tls" => Self::Tls,
            "http" => Self::Http,
            "https" => Self::Https,
            "utp" => Self::Utp,
            "webtransport" => Self::Webtransport,
            "p2p-circuit" => Self::P2pCircuit,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Ip4 => "ip4",
            Self::Ip6 => "ip6",
            Self::Dns => "dns",
            Self::Dns4 => "dns4",
            Self::Dns6 => "dns6",
            Self::Dnsaddr => "dnsaddr",
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Sctp => "sctp",
            Self::Ipfs => "ipfs",
            Self::P2p => "p2p",
            Self::Certhash => "certhash",
            Self::Sni => "sni",
            Self::Quic => "quic",
            Self::QuicV1 => "quic-v1",
            Self::Ws => "ws",
            Self::Wss => "wss",
            Self::Tls => "tls",
            Self::Http => "http",
            Self::Https => "https",
            Self::Utp => "utp",
            Self::Webtransport => "webtransport",
            Self::P2pCircuit => "p2p-circuit",
            Self::Other(name) => name,
        }
    }

    /// Whether the protocol is followed by a value component.
    pub fn takes_value(&self) -> bool {
        matches!(
            self,
            Self::Ip4
                | Self::Ip6
                | Self::Dns
                | Self::Dns4
                | Self::Dns6
                | Self::Dnsaddr
                | Self::Tcp
                | Self::Udp
                | Self::Sctp
                | Self::Ipfs
                | Self::P2p
                | Self::Certhash
                | Self::Sni
        )
    }

    /// `/ipfs` and `/p2p` share multicodec 0x01a5.
    pub fn is_peer_identity(&self) -> bool {
        matches!(self, Self::Ipfs | Self::P2p)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub protocol: Protocol,
    pub value: Option<String>,
}

/// A parsed address, components in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiaddr {
    components: Vec<Component>,
}

impl Multiaddr {
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let rest = text
            .strip_prefix('/')
            .ok_or_else(|| AddressError::MissingLeadingSlash(text.to_string()))?;

        let mut parts = rest.split('/').filter(|p| !p.is_empty());
        let mut components = Vec::new();
        while let Some(name) = parts.next() {
            let protocol = Protocol::from_name(name);
            let value = if protocol.takes_value() {
                let value = parts
                    .next()
                    .ok_or_else(|| AddressError::MissingValue(name.to_string()))?;
                Some(value.to_string())
            } else {
                None
            };
            components.push(Component { protocol, value });
        }

        if components.is_empty() {
            return Err(AddressError::Empty);
        }
        Ok(Self { components })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Value of the first `/ipfs` or `/p2p` component.
    pub fn identity_value(&self) -> Option<&str> {
        self.components
            .iter()
            .find(|c| c.protocol.is_peer_identity())
            .and_then(|c| c.value.as_deref())
    }
}

impl fmt::Display for Multiaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.components {
            write!(f, "/{}", c.protocol.name())?;
            if let Some(v) = &c.value {
                write!(f, "/{v}")?;
            }
        }
        Ok(())
    }
}
