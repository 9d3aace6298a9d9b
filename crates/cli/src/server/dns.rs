use crate::di::DnsServices;
use ruledns_infrastructure::dns::forwarding::spawn_expiry_sweeper;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

const MAX_DATAGRAM_SIZE: usize = 4096;
const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

pub async fn start_dns_server(bind_addr: SocketAddr, services: DnsServices) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(bind_addr)?);
    info!(bind_address = %bind_addr, "DNS server listening (UDP)");

    let sweeper = spawn_expiry_sweeper(Arc::clone(&services.pending), SWEEP_INTERVAL);

    let relay = {
        let forwarder = Arc::clone(&services.forwarder);
        let socket = Arc::clone(&socket);
        tokio::spawn(async move {
            if let Err(e) = forwarder.run_relay(socket).await {
                error!(error = %e, "Upstream relay stopped");
            }
        })
    };

    let result = run_udp_loop(Arc::clone(&socket), &services).await;

    relay.abort();
    sweeper.abort();
    result
}

async fn run_udp_loop(socket: Arc<UdpSocket>, services: &DnsServices) -> anyhow::Result<()> {
    let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];

    loop {
        let (len, client) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionReset => {
                // ICMP port unreachable from an earlier reply, reported on Windows.
                debug!(error = %e, "Ignoring connection reset on UDP socket");
                continue;
            }
            Err(e) => {
                error!(error = %e, "UDP recv error");
                return Err(e.into());
            }
        };

        let handler = Arc::clone(&services.handler);
        let socket = Arc::clone(&socket);
        let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);

        tokio::spawn(async move {
            if let Some(response) = handler.handle_datagram(&datagram, client).await {
                if let Err(e) = socket.send_to(&response, client).await {
                    debug!(error = %e, client = %client, "Failed to send response");
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
