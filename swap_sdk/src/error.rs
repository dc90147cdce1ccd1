use error_stack::{AttachmentKind, FrameKind, Report};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type SdkResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Reqwest error: {0}")]
    ReqwestError(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Address trust error: {0}")]
    AddressTrust(AddressError),

    #[error("Permit error: {0}")]
    Permit(PermitError),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Chain error: {0}")]
    ChainError(String),

    #[error("Swap type error: {0}")]
    SwapType(String),

    #[error("Submission error: {0}")]
    SubmissionError(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Models error")]
    ModelsError,

    #[error("Serde deserialize error: {0}")]
    SerdeDeserialize(String),

    #[error("Parse error")]
    ParseError,
}

/// Why a quote's destination was refused.
#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum AddressError {
    #[error("provided address is not defined (API issue)")]
    Missing,

    #[error("provided address is the null address (API issue)")]
    NullAddress,

    #[error("destination {actual} does not match trusted address {expected}")]
    Mismatch { expected: String, actual: String },
}

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum PermitError {
    #[error("token query failed: {0}")]
    TokenQueryFailed(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),
}

impl From<AddressError> for Error {
    fn from(error: AddressError) -> Self {
        Error::AddressTrust(error)
    }
}

impl From<PermitError> for Error {
    fn from(error: PermitError) -> Self {
        Error::Permit(error)
    }
}

/// Maps a models-crate failure onto the matching SDK variant.
pub fn from_models_error(error: &swap_models::error::Error) -> Error {
    match error {
        swap_models::error::Error::UnknownRoute(route) => Error::UnknownRoute(route.clone()),
        swap_models::error::Error::ReqwestError(body) => Error::ReqwestError(body.clone()),
        swap_models::error::Error::SerdeDeserialize(msg) => Error::SerdeDeserialize(msg.clone()),
        swap_models::error::Error::ChainError(msg) => Error::ChainError(msg.clone()),
        swap_models::error::Error::ParseError => Error::ParseError,
    }
}

pub trait ReportDisplayExt {
    fn format(&self) -> String;
}

impl ReportDisplayExt for Report<Error> {
    fn format(&self) -> String {
        let mut output = String::new();

        for frame in self.frames() {
            if let FrameKind::Attachment(AttachmentKind::Printable(attachment)) = frame.kind() {
                output.push_str(&format!(" {attachment} "));
            }
        }

        output.trim().to_string()
    }
}
