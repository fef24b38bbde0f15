pub mod config;
pub mod dispatcher;
pub mod error;
pub mod interpret;
pub mod loader;
pub mod logging;
pub mod payload;
pub mod transport;
#[cfg(test)]
pub mod test_util;

pub use config::Config;
pub use dispatcher::{AttemptReport, DispatchSummary, Dispatcher};
pub use error::{Error, Result};
pub use interpret::interpret;
pub use loader::load_request;
pub use payload::PayloadBuilder;
pub use transport::{HttpsTransport, RawResponse, Transport};

pub use push_common::{Classification, PushOutcome, PushPayload, PushRequest};
