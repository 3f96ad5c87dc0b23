//! Consumer for the per-project optimization progress stream.
//!
//! The backend pushes a JSON message per event; each is decoded into
//! [`OptimizationEvent`] at the boundary and dispatched by exhaustive match.
//! There is no retry or reconnection: a transport failure ends the run and
//! surfaces as an error state.

use chrono::{DateTime, Local};
use serde::Deserialize;
use std::sync::mpsc::Sender;
use std::thread;
use tracing::{info, warn};
use tungstenite::Message;

use crate::messages::ResponseMessage;

/// One message from the optimization stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizationEvent {
    Status {
        message: String,
    },
    Progress {
        percent: f32,
    },
    Log {
        #[serde(default)]
        level: Option<String>,
        message: String,
    },
    Complete {
        optimized_prompt: String,
        #[serde(default)]
        score: Option<f64>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub received_at: DateTime<Local>,
    pub level: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Running,
    Complete {
        optimized_prompt: String,
        score: Option<f64>,
    },
    Failed {
        message: String,
    },
}

/// Accumulated view of one optimization run, fed event by event.
#[derive(Debug, Clone)]
pub struct OptimizationRun {
    pub status: String,
    /// Percentage in 0..=100.
    pub progress: f32,
    pub logs: Vec<LogEntry>,
    pub outcome: RunOutcome,
}

impl Default for OptimizationRun {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimizationRun {
    pub fn new() -> Self {
        Self {
            status: "Waiting for the optimizer...".to_string(),
            progress: 0.0,
            logs: Vec::new(),
            outcome: RunOutcome::Running,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.outcome, RunOutcome::Running)
    }

    /// Fold one stream event into the run. Events after a terminal
    /// `complete`/`error` are ignored.
    pub fn apply(&mut self, event: OptimizationEvent) {
        if self.is_finished() {
            return;
        }
        match event {
            OptimizationEvent::Status { message } => {
                self.status = message;
            }
            OptimizationEvent::Progress { percent } => {
                self.progress = percent.clamp(0.0, 100.0);
            }
            OptimizationEvent::Log { level, message } => {
                self.logs.push(LogEntry {
                    received_at: Local::now(),
                    level,
                    message,
                });
            }
            OptimizationEvent::Complete {
                optimized_prompt,
                score,
            } => {
                self.progress = 100.0;
                self.status = "Optimization complete".to_string();
                self.outcome = RunOutcome::Complete {
                    optimized_prompt,
                    score,
                };
            }
            OptimizationEvent::Error { message } => {
                self.status = "Optimization failed".to_string();
                self.outcome = RunOutcome::Failed { message };
            }
        }
    }

    /// Note that the stream ended. A close before `complete`/`error` leaves
    /// the run failed so the panel never spins forever.
    pub fn stream_ended(&mut self, error: Option<String>) {
        if self.is_finished() {
            return;
        }
        let message =
            error.unwrap_or_else(|| "stream ended before completion".to_string());
        self.status = "Optimization failed".to_string();
        self.outcome = RunOutcome::Failed { message };
    }
}

/// Connect to a project stream and forward its events to the app channel
/// until the stream closes or fails. Undecodable frames are logged and
/// skipped rather than ending the run.
pub fn spawn_stream(url: String, sender: Sender<ResponseMessage>) {
    thread::spawn(move || {
        let (mut socket, _response) = match tungstenite::connect(url.as_str()) {
            Ok(connection) => connection,
            Err(e) => {
                let _ = sender.send(ResponseMessage::StreamClosed(Some(e.to_string())));
                return;
            }
        };
        info!(%url, "optimization stream connected");

        loop {
            match socket.read() {
                Ok(Message::Text(text)) => match serde_json::from_str::<OptimizationEvent>(&text) {
                    Ok(event) => {
                        let _ = sender.send(ResponseMessage::OptimizationEvent(event));
                    }
                    Err(e) => {
                        warn!(error = %e, "skipping undecodable stream frame");
                    }
                },
                Ok(Message::Close(_)) => {
                    let _ = sender.send(ResponseMessage::StreamClosed(None));
                    return;
                }
                Ok(_) => {
                    // Ping/pong and binary frames carry no events.
                }
                Err(e) => {
                    let _ = sender.send(ResponseMessage::StreamClosed(Some(e.to_string())));
                    return;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> OptimizationEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_every_message_kind() {
        assert_eq!(
            decode(r#"{"type": "status", "message": "compiling program"}"#),
            OptimizationEvent::Status {
                message: "compiling program".to_string()
            }
        );
        assert_eq!(
            decode(r#"{"type": "progress", "percent": 42.5}"#),
            OptimizationEvent::Progress { percent: 42.5 }
        );
        assert_eq!(
            decode(r#"{"type": "log", "message": "trial 3 scored 0.81"}"#),
            OptimizationEvent::Log {
                level: None,
                message: "trial 3 scored 0.81".to_string()
            }
        );
        assert_eq!(
            decode(r#"{"type": "complete", "optimized_prompt": "Better.", "score": 0.9}"#),
            OptimizationEvent::Complete {
                optimized_prompt: "Better.".to_string(),
                score: Some(0.9)
            }
        );
        assert_eq!(
            decode(r#"{"type": "error", "message": "budget exhausted"}"#),
            OptimizationEvent::Error {
                message: "budget exhausted".to_string()
            }
        );
    }

    #[test]
    fn unknown_message_kind_is_a_decode_error() {
        assert!(serde_json::from_str::<OptimizationEvent>(r#"{"type": "noise"}"#).is_err());
    }

    #[test]
    fn run_accumulates_events() {
        let mut run = OptimizationRun::new();
        run.apply(OptimizationEvent::Status {
            message: "bootstrapping".to_string(),
        });
        run.apply(OptimizationEvent::Progress { percent: 30.0 });
        run.apply(OptimizationEvent::Log {
            level: Some("info".to_string()),
            message: "trial 1".to_string(),
        });
        run.apply(OptimizationEvent::Log {
            level: None,
            message: "trial 2".to_string(),
        });

        assert_eq!(run.status, "bootstrapping");
        assert_eq!(run.progress, 30.0);
        assert_eq!(run.logs.len(), 2);
        assert!(!run.is_finished());
    }

    #[test]
    fn progress_is_clamped() {
        let mut run = OptimizationRun::new();
        run.apply(OptimizationEvent::Progress { percent: 250.0 });
        assert_eq!(run.progress, 100.0);
        run.apply(OptimizationEvent::Progress { percent: -5.0 });
        assert_eq!(run.progress, 0.0);
    }

    #[test]
    fn complete_is_terminal() {
        let mut run = OptimizationRun::new();
        run.apply(OptimizationEvent::Complete {
            optimized_prompt: "Improved prompt".to_string(),
            score: None,
        });
        assert!(run.is_finished());
        assert_eq!(run.progress, 100.0);

        // Late events no longer change anything.
        run.apply(OptimizationEvent::Progress { percent: 10.0 });
        run.apply(OptimizationEvent::Log {
            level: None,
            message: "straggler".to_string(),
        });
        assert_eq!(run.progress, 100.0);
        assert!(run.logs.is_empty());
    }

    #[test]
    fn clean_close_before_completion_fails_the_run() {
        let mut run = OptimizationRun::new();
        run.apply(OptimizationEvent::Progress { percent: 60.0 });

        run.stream_ended(None);
        assert_eq!(
            run.outcome,
            RunOutcome::Failed {
                message: "stream ended before completion".to_string()
            }
        );
        assert!(run.is_finished());
    }

    #[test]
    fn close_after_completion_keeps_the_result() {
        let mut run = OptimizationRun::new();
        run.apply(OptimizationEvent::Complete {
            optimized_prompt: "Improved prompt".to_string(),
            score: Some(0.8),
        });

        run.stream_ended(None);
        run.stream_ended(Some("connection reset".to_string()));
        assert_eq!(
            run.outcome,
            RunOutcome::Complete {
                optimized_prompt: "Improved prompt".to_string(),
                score: Some(0.8)
            }
        );
    }

    #[test]
    fn transport_error_carries_its_message() {
        let mut run = OptimizationRun::new();
        run.stream_ended(Some("connection reset".to_string()));
        assert_eq!(
            run.outcome,
            RunOutcome::Failed {
                message: "connection reset".to_string()
            }
        );
    }

    #[test]
    fn error_surfaces_as_failed_outcome() {
        let mut run = OptimizationRun::new();
        run.apply(OptimizationEvent::Error {
            message: "provider quota exceeded".to_string(),
        });
        assert_eq!(
            run.outcome,
            RunOutcome::Failed {
                message: "provider quota exceeded".to_string()
            }
        );
    }
}
