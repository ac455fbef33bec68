//! TCP transport for the storage service.
//!
//! One request per connection: connect, write a JSON request line, read a
//! JSON response line. Connection setup cost is irrelevant at paste-service
//! request rates, and per-request connections keep the client stateless.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinder_core::{
    Message, MessageId,
    wire::{Request, Response},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
};

use crate::service::{ServiceError, StorageService};

/// Wire client for a remote storage service.
#[derive(Debug, Clone)]
pub struct TcpStorageClient {
    addr: String,
}

impl TcpStorageClient {
    /// Create a client for the service at `addr` (host:port).
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    async fn roundtrip(&self, request: &Request) -> Result<Response, ServiceError> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        let (read_half, mut write_half) = stream.into_split();

        let Ok(line) = serde_json::to_string(request) else {
            unreachable!("wire requests serialize infallibly");
        };

        write_half
            .write_all(line.as_bytes())
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        write_half.write_all(b"\n").await.map_err(|e| ServiceError::Transport(e.to_string()))?;

        let mut response_line = String::new();
        let bytes_read = BufReader::new(read_half)
            .read_line(&mut response_line)
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if bytes_read == 0 {
            return Err(ServiceError::Transport("connection closed before response".into()));
        }

        serde_json::from_str(&response_line)
            .map_err(|e| ServiceError::Transport(format!("unreadable response frame: {e}")))
    }
}

fn unexpected(response: &Response) -> ServiceError {
    ServiceError::Rejected(format!("unexpected response: {response:?}"))
}

#[async_trait]
impl StorageService for TcpStorageClient {
    async fn create(&self, message: Message) -> Result<(), ServiceError> {
        match self.roundtrip(&Request::Create(message)).await? {
            Response::Created => Ok(()),
            Response::DuplicateId => Err(ServiceError::DuplicateId),
            Response::PayloadTooLarge { max_bytes } => {
                Err(ServiceError::PayloadTooLarge { max_bytes })
            },
            Response::Error { message } => Err(ServiceError::Rejected(message)),
            other => Err(unexpected(&other)),
        }
    }

    async fn read(&self, uid: &MessageId) -> Result<Option<Message>, ServiceError> {
        match self.roundtrip(&Request::Read { uid: uid.clone() }).await? {
            Response::Found(message) => Ok(Some(message)),
            Response::NotFound => Ok(None),
            Response::Error { message } => Err(ServiceError::Rejected(message)),
            other => Err(unexpected(&other)),
        }
    }

    async fn delete(&self, uid: &MessageId) -> Result<bool, ServiceError> {
        match self.roundtrip(&Request::Delete { uid: uid.clone() }).await? {
            Response::Deleted => Ok(true),
            // Absent is success: the record is gone either way
            Response::NotFound => Ok(false),
            Response::Error { message } => Err(ServiceError::Rejected(message)),
            other => Err(unexpected(&other)),
        }
    }

    async fn health(&self) -> Result<DateTime<Utc>, ServiceError> {
        match self.roundtrip(&Request::Health).await? {
            Response::Healthy { timestamp } => Ok(timestamp),
            Response::Error { message } => Err(ServiceError::Rejected(message)),
            other => Err(unexpected(&other)),
        }
    }
}
