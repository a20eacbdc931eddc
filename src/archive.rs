use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde_json::{to_writer, to_writer_pretty};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::Config;
use crate::conversations::Message;
use crate::error::ArchiveError;

/// Writes one channel's messages to `<output_dir>/<channel_name>.<ext>`.
///
/// The document is staged in a temporary file next to the target and renamed
/// into place once fully written. Channel names are used verbatim.
pub fn write_archive(
    output_dir: &Path,
    channel_name: &str,
    messages: &[Message],
    config: &Config,
) -> Result<PathBuf, ArchiveError> {
    let path = output_dir.join(config.archive_file_name(channel_name));

    let staged = NamedTempFile::new_in(output_dir)?;
    let mut writer = BufWriter::new(staged);

    if config.pretty {
        to_writer_pretty(&mut writer, messages)?;
    } else {
        to_writer(&mut writer, messages)?;
    }

    let staged = writer.into_inner().map_err(|e| e.into_error())?;
    staged.as_file().sync_all()?;
    staged.persist(&path)?;

    debug!(path = %path.display(), messages = messages.len(), "wrote archive");

    Ok(path)
}
