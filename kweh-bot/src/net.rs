pub mod connection;
pub mod console;
pub mod transport;

pub use transport::{ChatTransport, Reply, ReplyCollector, TransportError, TransportResult};
