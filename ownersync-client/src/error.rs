use thiserror::Error;

/// Error surface for backend client acquisition, sync calls and release.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        endpoint: String,
        reason: &'static str,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("sync service responded {code}: {body}")]
    Status { code: u16, body: String },

    #[error("client has been stopped")]
    Stopped,

    #[error("client was already stopped")]
    AlreadyStopped,
}
