use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use tracing::info;

use crate::archive::write_archive;
use crate::channel::fetch_history;
use crate::config::Config;
use crate::directory::list_channels;
use crate::error::{Error, Result};
use crate::terminal::{get_formatted_left_output, OutputColor};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub name: String,
    pub messages: usize,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub channels: Vec<ChannelSummary>,
}

/// Archives every public channel, one channel at a time.
///
/// The first error of any kind ends the run. Channels archived before the
/// failure stay on disk; the failing channel never gets a file.
pub struct Archiver<T> {
    transport: T,
    config: Config,
    pb: ProgressBar,
}

impl<T: Transport> Archiver<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self {
            transport,
            config,
            pb: ProgressBar::hidden(),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, pb: ProgressBar) -> Self {
        self.pb = pb;
        self
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_at(Utc::now()).await
    }

    pub async fn run_at(&self, started: DateTime<Utc>) -> Result<RunSummary> {
        let pb = &self.pb;

        let output_dir = self.create_output_dir(started)?;
        pb.println(format!(
            "{} output directory ({})",
            get_formatted_left_output("Created", &OutputColor::Green),
            output_dir.display()
        ));
        pb.inc(1);

        pb.set_message(": channels");
        let channels = list_channels(&self.transport, &self.config).await?;

        pb.println(format!(
            "{} {} channels",
            get_formatted_left_output("Found", &OutputColor::Green),
            channels.len()
        ));
        pb.inc(1);
        pb.inc_length(channels.len() as u64);

        let mut summaries = Vec::with_capacity(channels.len());

        for channel in &channels {
            pb.set_message(format!(": #{}", channel.name));

            let messages = fetch_history(
                &self.transport,
                &self.config,
                &channel.id,
                &channel.name,
                pb,
            )
            .await
            .map_err(|source| Error::History {
                channel: channel.name.clone(),
                source,
            })?;

            let path = write_archive(&output_dir, &channel.name, &messages, &self.config)
                .map_err(|source| Error::Archive {
                    channel: channel.name.clone(),
                    source,
                })?;

            info!(
                channel = %channel.name,
                messages = messages.len(),
                path = %path.display(),
                "archived channel"
            );
            pb.println(format!(
                "{} #{} ({} messages)",
                get_formatted_left_output("Archived", &OutputColor::Green),
                channel.name,
                messages.len()
            ));
            pb.inc(1);

            summaries.push(ChannelSummary {
                name: channel.name.clone(),
                messages: messages.len(),
            });
        }

        Ok(RunSummary {
            output_dir,
            channels: summaries,
        })
    }

    fn create_output_dir(&self, started: DateTime<Utc>) -> Result<PathBuf> {
        let path = self
            .config
            .output_root
            .join(run_dir_name(&self.config.dir_prefix, started));

        // Not create_dir_all: an existing directory from another run is an error
        fs::create_dir(&path).map_err(|source| Error::OutputDir {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "created output directory");
        Ok(path)
    }
}

pub fn run_dir_name(prefix: &str, started: DateTime<Utc>) -> String {
    format!("{prefix}{}", started.timestamp())
}
