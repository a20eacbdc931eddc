use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::conversations::{ChannelInfo, ListResponse, Status};
use crate::error::{DiscoveryError, TransportError};
use crate::transport::Transport;

/// Lists every public channel in the workspace.
///
/// Any malformed entry fails the whole listing; entries are never skipped.
pub async fn list_channels<T>(
    transport: &T,
    config: &Config,
) -> Result<Vec<ChannelInfo>, DiscoveryError>
where
    T: Transport + ?Sized,
{
    let url = config.list_url().map_err(TransportError::from)?;

    debug!("requesting channel list");
    let body = transport.get(&url).await?;

    let channels = decode_channels(&body)?;
    info!(count = channels.len(), "discovered channels");

    Ok(channels)
}

fn decode_channels(body: &str) -> Result<Vec<ChannelInfo>, DiscoveryError> {
    let status: Status = serde_json::from_str(body)?;
    status.into_result().map_err(DiscoveryError::Api)?;

    let response: ListResponse = serde_json::from_str(body)?;
    let entries = response.channels.ok_or(DiscoveryError::MissingChannels)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<ChannelInfo, DiscoveryError> {
            let channel = entry
                .as_object()
                .ok_or(DiscoveryError::NotAnObject { index })?;

            let string_field = |field: &'static str| {
                channel
                    .get(field)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or(DiscoveryError::MissingField { index, field })
            };

            Ok(ChannelInfo {
                name: string_field("name")?,
                id: string_field("id")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::transport::testing::ScriptedTransport;

    fn config() -> Config {
        Config::new("xoxb-test", Url::parse("https://slack.test/api/").unwrap())
    }

    #[tokio::test]
    async fn lists_name_and_id_of_each_channel() {
        let transport = ScriptedTransport::new().respond(json!({
            "ok": true,
            "channels": [
                {"id": "C1", "name": "general", "is_channel": true, "num_members": 12},
                {"id": "C2", "name": "random", "is_archived": false}
            ]
        }));

        let channels = list_channels(&transport, &config()).await.unwrap();

        assert_eq!(
            channels,
            vec![
                ChannelInfo {
                    name: "general".to_string(),
                    id: "C1".to_string()
                },
                ChannelInfo {
                    name: "random".to_string(),
                    id: "C2".to_string()
                },
            ]
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), "/api/channels.list");
        assert_eq!(transport.query_values("token"), vec!["xoxb-test"]);
    }

    #[tokio::test]
    async fn empty_workspace_is_not_an_error() {
        let transport = ScriptedTransport::new().respond(json!({"ok": true, "channels": []}));

        let channels = list_channels(&transport, &config()).await.unwrap();

        assert!(channels.is_empty());
    }

    #[tokio::test]
    async fn entry_missing_id_aborts_discovery() {
        let transport = ScriptedTransport::new().respond(json!({
            "ok": true,
            "channels": [
                {"id": "C1", "name": "general"},
                {"name": "random"}
            ]
        }));

        let err = list_channels(&transport, &config()).await.unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::MissingField {
                index: 1,
                field: "id"
            }
        ));
    }

    #[tokio::test]
    async fn non_string_name_aborts_discovery() {
        let transport = ScriptedTransport::new().respond(json!({
            "ok": true,
            "channels": [{"id": "C1", "name": 7}]
        }));

        let err = list_channels(&transport, &config()).await.unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::MissingField {
                index: 0,
                field: "name"
            }
        ));
    }

    #[tokio::test]
    async fn non_object_entry_aborts_discovery() {
        let transport = ScriptedTransport::new().respond(json!({
            "ok": true,
            "channels": ["general"]
        }));

        let err = list_channels(&transport, &config()).await.unwrap_err();

        assert!(matches!(err, DiscoveryError::NotAnObject { index: 0 }));
    }

    #[tokio::test]
    async fn missing_channels_array_is_an_error() {
        let transport = ScriptedTransport::new().respond(json!({"ok": true}));

        let err = list_channels(&transport, &config()).await.unwrap_err();

        assert!(matches!(err, DiscoveryError::MissingChannels));
    }

    #[tokio::test]
    async fn rejected_call_surfaces_slack_error() {
        let transport =
            ScriptedTransport::new().respond(json!({"ok": false, "error": "invalid_auth"}));

        let err = list_channels(&transport, &config()).await.unwrap_err();

        assert!(matches!(err, DiscoveryError::Api(ref code) if code == "invalid_auth"));
    }

    #[tokio::test]
    async fn invalid_payload_is_a_decode_error() {
        let transport = ScriptedTransport::new().respond_raw("<html>bad gateway</html>");

        let err = list_channels(&transport, &config()).await.unwrap_err();

        assert!(matches!(err, DiscoveryError::Decode(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_propagated() {
        let transport = ScriptedTransport::new().fail(TransportError::Status { status: 500 });

        let err = list_channels(&transport, &config()).await.unwrap_err();

        assert!(matches!(
            err,
            DiscoveryError::Transport(TransportError::Status { status: 500 })
        ));
    }
}
