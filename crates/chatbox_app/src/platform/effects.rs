use std::sync::mpsc;
use std::thread;

use chatbox_core::{AskOutcome, Effect, Msg, Source, UploadOutcome};
use chatbox_engine::{
    BackendSettings, EngineError, EngineEvent, EngineEvents, EngineHandle, SourceRef, UploadFile,
};
use chatbox_logging::{chatbox_debug, chatbox_info};

use super::app::HostEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: BackendSettings,
        host_tx: mpsc::Sender<HostEvent>,
    ) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::new(settings)?;
        spawn_event_loop(events, host_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Ask {
                    request_id,
                    question,
                } => {
                    chatbox_info!("Ask #{} question_len={}", request_id, question.len());
                    self.engine.ask(request_id, question);
                }
                Effect::Upload { request_id, file } => {
                    chatbox_info!("Upload #{} file={:?}", request_id, file.path);
                    self.engine
                        .upload(request_id, UploadFile::new(file.name, file.path));
                }
                Effect::ScrollToBottom(_)
                | Effect::FocusInput
                | Effect::OpenFilePicker
                | Effect::ClearFilePicker => {
                    // surface effects are applied by the host
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, host_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if host_tx.send(HostEvent::Widget(map_event(event))).is_err() {
                break;
            }
        }
        chatbox_debug!("Engine event loop finished");
    });
}

/// Failures were already logged by the engine; the transcript only gets a fixed notice.
pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AskCompleted { request_id, result } => Msg::AskCompleted {
            request_id,
            outcome: match result {
                Ok(reply) => AskOutcome::Answered {
                    answer: reply.answer,
                    sources: reply.sources.into_iter().map(map_source).collect(),
                },
                Err(_) => AskOutcome::Failed,
            },
        },
        EngineEvent::UploadCompleted { request_id, result } => Msg::UploadCompleted {
            request_id,
            outcome: match result {
                Ok(reply) => UploadOutcome::Uploaded {
                    chunks_inserted: reply.chunks_inserted,
                },
                Err(_) => UploadOutcome::Failed,
            },
        },
    }
}

fn map_source(source: SourceRef) -> Source {
    match source {
        SourceRef::Label(label) => Source::Label(label),
        SourceRef::Chunk { source, chunk } => Source::Cited { source, chunk },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbox_engine::{AskReply, BackendError, FailureKind, UploadReply};

    #[test]
    fn ask_reply_sources_keep_their_shape() {
        let msg = map_event(EngineEvent::AskCompleted {
            request_id: 3,
            result: Ok(AskReply {
                answer: "A".to_string(),
                sources: vec![
                    SourceRef::Chunk {
                        source: "http://x".to_string(),
                        chunk: 2,
                    },
                    SourceRef::Label("faq".to_string()),
                ],
            }),
        });
        assert_eq!(
            msg,
            Msg::AskCompleted {
                request_id: 3,
                outcome: AskOutcome::Answered {
                    answer: "A".to_string(),
                    sources: vec![
                        Source::Cited {
                            source: "http://x".to_string(),
                            chunk: 2
                        },
                        Source::Label("faq".to_string()),
                    ],
                },
            }
        );
    }

    #[test]
    fn failures_become_fixed_outcomes() {
        let err = BackendError {
            kind: FailureKind::HttpStatus(502),
            message: "bad gateway".to_string(),
        };
        assert_eq!(
            map_event(EngineEvent::AskCompleted {
                request_id: 1,
                result: Err(err.clone()),
            }),
            Msg::AskCompleted {
                request_id: 1,
                outcome: AskOutcome::Failed,
            }
        );
        assert_eq!(
            map_event(EngineEvent::UploadCompleted {
                request_id: 2,
                result: Err(err),
            }),
            Msg::UploadCompleted {
                request_id: 2,
                outcome: UploadOutcome::Failed,
            }
        );
        assert_eq!(
            map_event(EngineEvent::UploadCompleted {
                request_id: 4,
                result: Ok(UploadReply { chunks_inserted: 7 }),
            }),
            Msg::UploadCompleted {
                request_id: 4,
                outcome: UploadOutcome::Uploaded { chunks_inserted: 7 },
            }
        );
    }
}
