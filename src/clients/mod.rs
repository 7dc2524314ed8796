//! Client modules for external API interactions

pub mod identify_client;
pub mod transport;

pub use identify_client::IdentifyClient;
pub use transport::{HttpTransport, ReqwestTransport};
