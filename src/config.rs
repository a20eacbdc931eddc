use std::path::PathBuf;

use url::Url;

pub const DEFAULT_API_BASE: &str = "https://slack.com/api/";

/// Upstream allows up to 1000; stay well below so multi-page channels are common.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

pub const MAX_PAGE_SIZE: u32 = 1000;

/// Lower bound for the very first history request, i.e. "all recorded history".
pub const DEFAULT_OLDEST: &str = "0";

pub const DEFAULT_DIR_PREFIX: &str = "slack_history_";

pub const DEFAULT_EXTENSION: &str = "json";

const LIST_METHOD: &str = "channels.list";
const HISTORY_METHOD: &str = "channels.history";

/// Run parameters for one archive run.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_base: Url,
    pub page_size: u32,
    pub oldest: String,
    pub output_root: PathBuf,
    pub dir_prefix: String,
    pub extension: String,
    pub pretty: bool,
}

impl Config {
    pub fn new(token: impl Into<String>, mut api_base: Url) -> Self {
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        Self {
            token: token.into(),
            api_base,
            page_size: DEFAULT_PAGE_SIZE,
            oldest: DEFAULT_OLDEST.to_string(),
            output_root: PathBuf::from("."),
            dir_prefix: DEFAULT_DIR_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            pretty: false,
        }
    }

    pub fn list_url(&self) -> Result<Url, url::ParseError> {
        let mut url = self.api_base.join(LIST_METHOD)?;
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }

    pub fn history_url(&self, channel_id: &str, oldest: &str) -> Result<Url, url::ParseError> {
        let mut url = self.api_base.join(HISTORY_METHOD)?;
        url.query_pairs_mut()
            .append_pair("token", &self.token)
            .append_pair("channel", channel_id)
            .append_pair("oldest", oldest)
            .append_pair("count", &self.page_size.to_string());
        Ok(url)
    }

    /// File name an archive for `channel_name` is written under.
    pub fn archive_file_name(&self, channel_name: &str) -> String {
        format!("{channel_name}.{}", self.extension)
    }
}
