use log::{trace, warn};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use super::{DNS_PORT, MAX_DATAGRAM_SIZE};

/// A channel that delivers one query to a nameserver and hands back its reply
pub trait Transport {
    fn exchange(&mut self, nameserver: Ipv4Addr, query: &[u8]) -> io::Result<Vec<u8>>;
}

/// Sends every query as a single datagram from a fresh socket
///
/// The reply is the first datagram that arrives from the nameserver, cut to
/// `MAX_DATAGRAM_SIZE` bytes. There is no timeout, an unresponsive server
/// blocks forever.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    port: u16,
}

impl UdpTransport {
    pub fn new() -> UdpTransport {
        UdpTransport::with_port(DNS_PORT)
    }

    pub fn with_port(port: u16) -> UdpTransport {
        UdpTransport { port }
    }

    fn udp_socket() -> io::Result<Socket> {
        Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
    }

    fn bind() -> io::Result<UdpSocket> {
        let addr: SockAddr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 0).into();
        let socket = Self::udp_socket()?;
        socket.bind(&addr)?;
        Ok(socket.into())
    }
}

impl Default for UdpTransport {
    fn default() -> UdpTransport {
        UdpTransport::new()
    }
}

impl Transport for UdpTransport {
    fn exchange(&mut self, nameserver: Ipv4Addr, query: &[u8]) -> io::Result<Vec<u8>> {
        let socket = Self::bind()?;
        // only accept datagrams from the nameserver
        socket.connect(SocketAddr::new(nameserver.into(), self.port))?;

        trace!("sending {} bytes to {}:{}", query.len(), nameserver, self.port);
        let sent = socket.send(query)?;
        if sent != query.len() {
            warn!("failed to send entire query to {}", nameserver);
        }

        let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];
        let received = socket.recv(&mut recv_buf)?;
        trace!("received {} bytes from {}", received, nameserver);
        Ok(recv_buf[..received].to_vec())
    }
}
