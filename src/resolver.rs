use crate::dns_parser::{self, encode_query_with_id, Packet, QueryType, RRData, ResponseCode};
use log::{debug, warn};
use rand::{thread_rng, Rng};
use std::fmt;
use std::io;
use std::net::Ipv4Addr;
use thiserror::Error;

use super::transport::Transport;
use super::ROOT_HINT;

/// Queries one top-level resolution may send, glue lookups included.
pub const DEFAULT_QUERY_BUDGET: usize = 32;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not exchange query with {nameserver}")]
    Transport {
        nameserver: Ipv4Addr,
        #[source]
        source: io::Error,
    },
    #[error("malformed reply from {nameserver}")]
    Malformed {
        nameserver: Ipv4Addr,
        #[source]
        source: dns_parser::Error,
    },
    #[error("cannot encode {name:?} as a query")]
    InvalidName {
        name: String,
        #[source]
        source: dns_parser::Error,
    },
    #[error("reply from {nameserver} has id {received}, expected {expected}")]
    IdMismatch {
        nameserver: Ipv4Addr,
        expected: u16,
        received: u16,
    },
    #[error("{nameserver} gave neither an answer nor a referral for {name} ({rcode:?})")]
    NoProgress {
        name: String,
        nameserver: Ipv4Addr,
        rcode: ResponseCode,
    },
    #[error("could not resolve nameserver {nameserver_name}")]
    NameserverLookup {
        nameserver_name: String,
        #[source]
        source: Box<ResolveError>,
    },
    #[error("gave up on {name} after {budget} queries")]
    QueryBudgetExhausted { name: String, budget: usize },
}

/// The final answer of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Address(Ipv4Addr),
    Nameserver(String),
}

impl fmt::Display for Answer {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Answer::Address(ip) => fmt::Display::fmt(&ip, fmt),
            Answer::Nameserver(ref name) => fmt.write_str(name),
        }
    }
}

/// What a reply tells us to do next
#[derive(Debug, PartialEq, Eq)]
enum Step<A> {
    Answered(A),
    /// ask the nameserver at this address, taken from glue
    Referral(Ipv4Addr),
    /// ask the nameserver with this name, its address has to be resolved first
    Delegation(String),
    Stuck(ResponseCode),
}

/// Picks the answer of an A query out of a record
fn address_of(data: &RRData) -> Option<Ipv4Addr> {
    match *data {
        RRData::A(ip) => Some(ip),
        _ => None,
    }
}

/// Picks the answer of an NS query out of a record
fn nameserver_of(data: &RRData) -> Option<String> {
    match *data {
        RRData::NS(ref name) => Some(name.to_string()),
        _ => None,
    }
}

impl<A> Step<A> {
    /// Answer first, then glue, then a bare NS referral.
    fn from_packet(packet: &Packet, answer: fn(&RRData) -> Option<A>) -> Step<A> {
        if let Some(found) = packet.answers.iter().find_map(|rr| answer(&rr.data)) {
            return Step::Answered(found);
        }

        if let Some(ip) = packet.additional.iter().find_map(|rr| address_of(&rr.data)) {
            return Step::Referral(ip);
        }

        match packet.nameservers.iter().find_map(|rr| nameserver_of(&rr.data)) {
            Some(name) => Step::Delegation(name),
            None => Step::Stuck(packet.header.response_code),
        }
    }
}

/// Iterative resolver that walks referrals down from a root server
///
/// Every call to `resolve` starts over at the root, nothing is cached.
pub struct Resolver<T: Transport> {
    transport: T,
    root: Ipv4Addr,
    query_budget: usize,
}

impl<T: Transport> Resolver<T> {
    pub fn new(transport: T) -> Resolver<T> {
        Resolver::with_root(transport, ROOT_HINT)
    }

    pub fn with_root(transport: T, root: Ipv4Addr) -> Resolver<T> {
        Resolver {
            transport,
            root,
            query_budget: DEFAULT_QUERY_BUDGET,
        }
    }

    /// Limits the queries of one `resolve` call, including the ones needed
    /// to look up nameservers that came without glue.
    pub fn set_query_budget(&mut self, budget: usize) {
        self.query_budget = budget;
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resolve(&mut self, name: &str, qtype: QueryType) -> Result<Answer, ResolveError> {
        let mut remaining = self.query_budget;
        match qtype {
            QueryType::A => self
                .walk(name, qtype, address_of, &mut remaining)
                .map(Answer::Address),
            QueryType::NS => self
                .walk(name, qtype, nameserver_of, &mut remaining)
                .map(Answer::Nameserver),
        }
    }

    pub fn resolve_ipv4(&mut self, name: &str) -> Result<Ipv4Addr, ResolveError> {
        let mut remaining = self.query_budget;
        self.walk(name, QueryType::A, address_of, &mut remaining)
    }

    fn walk<A: fmt::Display>(
        &mut self,
        name: &str,
        qtype: QueryType,
        answer: fn(&RRData) -> Option<A>,
        remaining: &mut usize,
    ) -> Result<A, ResolveError> {
        let mut nameserver = self.root;
        loop {
            if *remaining == 0 {
                return Err(ResolveError::QueryBudgetExhausted {
                    name: name.to_owned(),
                    budget: self.query_budget,
                });
            }
            *remaining -= 1;

            match self.query(nameserver, name, qtype, answer)? {
                Step::Answered(answer) => {
                    debug!("{} answered {} {} with {}", nameserver, qtype, name, answer);
                    return Ok(answer);
                }
                Step::Referral(ip) => {
                    debug!("{} referred {} to {}", nameserver, name, ip);
                    nameserver = ip;
                }
                Step::Delegation(ns_name) => {
                    debug!(
                        "{} delegated {} to {} without glue",
                        nameserver, name, ns_name
                    );
                    nameserver = match self.walk(&ns_name, QueryType::A, address_of, remaining) {
                        Ok(ip) => ip,
                        Err(err) => {
                            return Err(ResolveError::NameserverLookup {
                                nameserver_name: ns_name,
                                source: Box::new(err),
                            })
                        }
                    };
                }
                Step::Stuck(rcode) => {
                    return Err(ResolveError::NoProgress {
                        name: name.to_owned(),
                        nameserver,
                        rcode,
                    })
                }
            }
        }
    }

    fn query<A>(
        &mut self,
        nameserver: Ipv4Addr,
        name: &str,
        qtype: QueryType,
        answer: fn(&RRData) -> Option<A>,
    ) -> Result<Step<A>, ResolveError> {
        let id = thread_rng().gen();
        let query =
            encode_query_with_id(id, name, qtype).map_err(|source| ResolveError::InvalidName {
                name: name.to_owned(),
                source,
            })?;

        debug!("asking {} for {} {}", nameserver, qtype, name);
        let reply = self
            .transport
            .exchange(nameserver, &query)
            .map_err(|source| ResolveError::Transport { nameserver, source })?;

        let packet =
            Packet::parse(&reply).map_err(|source| ResolveError::Malformed { nameserver, source })?;
        if packet.header.id != id {
            return Err(ResolveError::IdMismatch {
                nameserver,
                expected: id,
                received: packet.header.id,
            });
        }
        if packet.header.truncated {
            warn!("reply from {} is truncated", nameserver);
        }

        Ok(Step::from_packet(&packet, answer))
    }
}
