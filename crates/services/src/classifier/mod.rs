mod client;
mod transport;

pub use client::{Classification, ClassificationClient, ResultSource};
pub use transport::{ClassificationTransport, HttpTransport};
