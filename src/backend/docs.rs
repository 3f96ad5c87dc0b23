//! Documentation topics and content fetching.
//!
//! Content is pulled from the backend as plain markdown; when the fetch
//! fails the viewer falls back to the built-in placeholder so the docs view
//! never shows a broken page.

use reqwest::blocking::Client;
use std::sync::mpsc::Sender;
use std::thread;
use tracing::warn;

use crate::messages::ResponseMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocTopic {
    GettingStarted,
    Datasets,
    Metrics,
    ApiReference,
}

impl DocTopic {
    pub const ALL: [DocTopic; 4] = [
        DocTopic::GettingStarted,
        DocTopic::Datasets,
        DocTopic::Metrics,
        DocTopic::ApiReference,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DocTopic::GettingStarted => "Getting started",
            DocTopic::Datasets => "Datasets",
            DocTopic::Metrics => "Metrics",
            DocTopic::ApiReference => "API reference",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            DocTopic::GettingStarted => "getting-started",
            DocTopic::Datasets => "datasets",
            DocTopic::Metrics => "metrics",
            DocTopic::ApiReference => "api-reference",
        }
    }

    /// Shown when the backend copy of the page cannot be fetched.
    pub fn placeholder(self) -> &'static str {
        match self {
            DocTopic::GettingStarted => {
                "# Getting started\n\nWrite a prompt, pick a use case, upload a dataset and \
                 start an optimization run. The full guide could not be fetched right now."
            }
            DocTopic::Datasets => {
                "# Datasets\n\nDatasets are uploaded as files with one record per example. \
                 The full reference could not be fetched right now."
            }
            DocTopic::Metrics => {
                "# Metrics\n\nMetrics score candidate prompts against your dataset. \
                 The full reference could not be fetched right now."
            }
            DocTopic::ApiReference => {
                "# API reference\n\nThe backend exposes endpoints for dataset upload, project \
                 creation and a per-project progress stream. The full reference could not be \
                 fetched right now."
            }
        }
    }
}

/// Fetch a topic's markdown in the background; the result arrives as a
/// [`ResponseMessage::DocLoaded`].
pub fn fetch_doc(base_url: &str, topic: DocTopic, sender: Sender<ResponseMessage>) {
    let url = format!("{}/docs/{}.md", base_url.trim_end_matches('/'), topic.slug());
    thread::spawn(move || {
        let result = blocking_fetch(&url);
        if let Err(e) = &result {
            warn!(%url, error = %e, "doc fetch failed, viewer falls back to placeholder");
        }
        let _ = sender.send(ResponseMessage::DocLoaded(topic, result));
    });
}

fn blocking_fetch(url: &str) -> Result<String, String> {
    let client = Client::new();
    let response = client.get(url).send().map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("server returned {}", response.status()));
    }
    response.text().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_topic_has_slug_title_and_placeholder() {
        for topic in DocTopic::ALL {
            assert!(!topic.slug().is_empty());
            assert!(!topic.title().is_empty());
            assert!(topic.placeholder().starts_with("# "));
        }
    }

    #[test]
    fn slugs_are_unique() {
        for a in DocTopic::ALL {
            for b in DocTopic::ALL {
                if a != b {
                    assert_ne!(a.slug(), b.slug());
                }
            }
        }
    }
}
