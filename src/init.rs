use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

pub async fn init_socket(addr: SocketAddr) -> crate::error::Result<Arc<UdpSocket>> {
    let socket = Arc::new(UdpSocket::bind(addr).await?);
    Ok(socket)
}
