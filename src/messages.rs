use crate::backend::api_client::{DatasetPreview, ProjectDescriptor};
use crate::backend::docs::DocTopic;
use crate::backend::stream::OptimizationEvent;

/// Response messages from background operations
pub enum ResponseMessage {
    DatasetUploaded(Result<DatasetPreview, String>),
    ProjectCreated(Result<ProjectDescriptor, String>),
    OptimizationEvent(OptimizationEvent),
    /// Stream ended; carries the transport error when it did not close cleanly.
    StreamClosed(Option<String>),
    DocLoaded(DocTopic, Result<String, String>),
}
