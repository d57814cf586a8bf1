#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Clone)]
pub enum MockBehavior {
    /// Reply with these answers.
    Answer(Vec<Record>),
    /// Never reply.
    Silent,
    /// Reply over UDP with TC set and no answers; serve the answers over TCP.
    Truncated(Vec<Record>),
    /// Reply with a different message id.
    WrongId,
    /// Reply with bytes that are not a DNS message.
    Garbage,
}

/// Loopback upstream on 127.0.0.1 with an ephemeral port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let tcp = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = Arc::clone(&udp_queries);
        let tcp_count = Arc::clone(&tcp_queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::udp_reply(&behavior, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = tcp.accept() => {
                        if let Ok((mut stream, _)) = result {
                            tcp_count.fetch_add(1, Ordering::SeqCst);
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                continue;
                            }
                            let mut request = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut request).await.is_err() {
                                continue;
                            }
                            if let Some(response) = Self::tcp_reply(&behavior, &request) {
                                let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                                framed.extend_from_slice(&response);
                                let _ = stream.write_all(&framed).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    fn udp_reply(behavior: &MockBehavior, query: &[u8]) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        match behavior {
            MockBehavior::Answer(answers) => Some(Self::encode(&request, request.id(), answers, false)),
            MockBehavior::Silent => None,
            MockBehavior::Truncated(_) => Some(Self::encode(&request, request.id(), &[], true)),
            MockBehavior::WrongId => {
                Some(Self::encode(&request, request.id().wrapping_add(1), &[], false))
            }
            MockBehavior::Garbage => Some(vec![0xde, 0xad, 0xbe, 0xef]),
        }
    }

    fn tcp_reply(behavior: &MockBehavior, query: &[u8]) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        match behavior {
            MockBehavior::Answer(answers) | MockBehavior::Truncated(answers) => {
                Some(Self::encode(&request, request.id(), answers, false))
            }
            _ => None,
        }
    }

    fn encode(request: &Message, id: u16, answers: &[Record], truncated: bool) -> Vec<u8> {
        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.set_truncated(truncated);
        for query in request.queries() {
            response.add_query(query.clone());
        }
        for answer in answers {
            response.add_answer(answer.clone());
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).unwrap();
        buf
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
