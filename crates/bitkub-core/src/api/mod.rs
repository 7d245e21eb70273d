//! Bitkub REST client and the seams it is built on.

pub mod client;
pub mod clock;
pub mod query;
pub mod transport;

pub use client::BitkubClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use query::gen_query_param;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
