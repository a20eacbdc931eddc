use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A public channel as reported by `channels.list`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub name: String,
    pub id: String,
}

/// A single message, kept exactly as Slack sent it.
///
/// Only `ts` is ever looked at. Every other field (including ones we have
/// never seen) is carried through to the archive in its original key order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Message(Map<String, Value>);

impl Message {
    /// Timestamp, e.g. `"1549587600.000200"`
    pub fn ts(&self) -> Option<&str> {
        self.0.get("ts").and_then(Value::as_str)
    }
}

/// The `ok`/`error` envelope every Slack API response carries.
#[derive(Deserialize, Debug, Clone)]
pub struct Status {
    pub ok: bool,
    pub error: Option<String>,
}

impl Status {
    /// `Err` with Slack's error code when the call was rejected.
    pub fn into_result(self) -> Result<(), String> {
        self.ok.then_some(()).ok_or_else(|| {
            self.error
                .unwrap_or_else(|| "request was not ok".to_string())
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ListResponse {
    /// Entries are validated one by one so a bad entry can be reported by position
    pub channels: Option<Vec<Value>>,
}

/// One page of `channels.history`, newest message first.
#[derive(Deserialize, Debug, Clone)]
pub struct HistoryPage {
    pub messages: Vec<Message>,

    #[serde(default)]
    pub has_more: bool,
}
