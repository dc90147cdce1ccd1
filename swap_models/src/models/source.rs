use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Backend tag naming which aggregator or bridge produced a quote.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Source {
    #[serde(rename = "0x")]
    #[strum(serialize = "0x")]
    ZeroX,
    #[serde(rename = "1inch")]
    #[strum(serialize = "1inch")]
    OneInch,
    #[serde(rename = "rainbow")]
    #[strum(serialize = "rainbow")]
    Rainbow,
    #[serde(rename = "socket")]
    #[strum(serialize = "socket")]
    Socket,
    #[serde(rename = "relay")]
    #[strum(serialize = "relay")]
    Relay,
    /// Tags this crate does not know yet. Never trusted.
    #[serde(rename = "other", other)]
    #[strum(serialize = "other")]
    Other,
}

impl Source {
    pub fn is_crosschain(&self) -> bool {
        matches!(self, Source::Socket | Source::Relay)
    }
}
