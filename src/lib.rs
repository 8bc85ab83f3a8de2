//! Resolves names by walking the DNS delegation tree itself
//!
//! Starting at a root server, every reply is either an answer, a referral
//! with the address of the next nameserver (glue), or a referral naming a
//! nameserver whose address is resolved first. No recursion is requested
//! from any server and nothing is cached between calls.
//!
//! ```no_run
//! use dnswalk::{QueryType, Resolver, UdpTransport};
//!
//! let mut resolver = Resolver::new(UdpTransport::new());
//! let answer = resolver.resolve("example.com", QueryType::A).unwrap();
//! println!("{}", answer);
//! ```

use std::net::Ipv4Addr;

pub mod dns_parser;
mod resolver;
mod transport;

pub use crate::dns_parser::QueryType;
pub use crate::resolver::{Answer, ResolveError, Resolver, DEFAULT_QUERY_BUDGET};
pub use crate::transport::{Transport, UdpTransport};

pub const DNS_PORT: u16 = 53;

/// a.root-servers.net
pub const ROOT_HINT: Ipv4Addr = Ipv4Addr::new(198, 41, 0, 4);

/// Replies longer than this are cut off
pub const MAX_DATAGRAM_SIZE: usize = 1024;
