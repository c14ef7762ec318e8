//! Command-driven engine for hosting applications.

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, instrument, warn};

use livecast_ipc::{BroadcastId, LifecycleCommand, LifecycleConfig, LifecycleEvent};
use livecast_session::SessionClient;

use crate::lifecycle::BroadcastLifecycle;

/// Runs lifecycle commands against one session, one at a time.
///
/// Because commands are handled sequentially, a host that routes all
/// lifecycle calls for a session through one engine never issues concurrent
/// starts on that session.
pub struct Engine<S> {
    session: S,
    lifecycle: BroadcastLifecycle,
    command_rx: Receiver<LifecycleCommand>,
    event_tx: Sender<LifecycleEvent>,
}

impl<S: SessionClient> Engine<S> {
    /// Create a new engine.
    pub fn new(
        session: S,
        config: LifecycleConfig,
        command_rx: Receiver<LifecycleCommand>,
        event_tx: Sender<LifecycleEvent>,
    ) -> Self {
        Self {
            session,
            lifecycle: BroadcastLifecycle::new(config),
            command_rx,
            event_tx,
        }
    }

    /// Run the engine (blocking).
    ///
    /// Returns after a [`LifecycleCommand::Shutdown`] or once every command
    /// sender has been dropped.
    #[instrument(name = "engine_run", skip(self))]
    pub fn run(&self) {
        info!("Engine starting");
        self.send_event(LifecycleEvent::Ready);

        loop {
            match self.command_rx.recv() {
                Ok(command) => {
                    if !self.handle_command(command) {
                        break;
                    }
                }
                Err(crossbeam_channel::RecvError) => {
                    info!("Command channel disconnected, shutting down");
                    break;
                }
            }
        }

        info!("Engine stopped");
    }

    /// Handle a command. Returns false if engine should stop.
    fn handle_command(&self, command: LifecycleCommand) -> bool {
        debug!(?command, "Handling command");

        match command {
            LifecycleCommand::Start => self.start_broadcast(),
            LifecycleCommand::End { broadcast_id } => self.end_broadcast(broadcast_id),
            LifecycleCommand::Shutdown => {
                self.send_event(LifecycleEvent::Shutdown);
                return false;
            }
        }

        true
    }

    fn start_broadcast(&self) {
        let event = match self.lifecycle.start(&self.session) {
            Ok(live) => LifecycleEvent::Started {
                broadcast_id: live.broadcast_id,
                ingest_uri: live.ingest_uri.into(),
                confirmed: live.confirmed,
            },
            Err(e) => LifecycleEvent::StartFailed {
                phase: e.start_phase(),
                message: e.to_string(),
                broadcast_id: e.broadcast_id().cloned(),
            },
        };

        self.send_event(event);
    }

    fn end_broadcast(&self, broadcast_id: BroadcastId) {
        self.lifecycle.end(&self.session, &broadcast_id);
        self.send_event(LifecycleEvent::EndRequested { broadcast_id });
    }

    fn send_event(&self, event: LifecycleEvent) {
        if let Err(e) = self.event_tx.try_send(event) {
            warn!("Failed to send event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use serde_json::json;

    use livecast_ipc::{command_channel, event_channel, StartPhase};
    use livecast_session::mock::ScriptedSession;

    use super::*;

    fn session() -> ScriptedSession {
        ScriptedSession::new("6f1b2c3d-device", 1234567, "abc123")
    }

    fn drain(rx: &Receiver<LifecycleEvent>) -> Vec<LifecycleEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_engine_reports_started_broadcast() {
        let session = session();
        session
            .respond_json(
                "live/create/",
                json!({
                    "broadcast_id": "42",
                    "upload_url": "https://upload.example.com/rupload/broadcast/42?sig=x",
                }),
            )
            .respond_json("live/42/start/", json!({"status": "ok"}));

        let (command_tx, command_rx) = command_channel();
        let (event_tx, event_rx) = event_channel();
        command_tx.send(LifecycleCommand::Start).unwrap();
        command_tx.send(LifecycleCommand::Shutdown).unwrap();

        Engine::new(&session, LifecycleConfig::default(), command_rx, event_tx).run();

        assert_eq!(
            drain(&event_rx),
            vec![
                LifecycleEvent::Ready,
                LifecycleEvent::Started {
                    broadcast_id: BroadcastId::from("42"),
                    ingest_uri: "rtmp://upload.example.com:80/rupload/broadcast/42?sig=x"
                        .to_string(),
                    confirmed: true,
                },
                LifecycleEvent::Shutdown,
            ]
        );
    }

    #[test]
    fn test_engine_reports_start_failure_phase() {
        let session = ScriptedSession::without_token("6f1b2c3d-device", 1234567, "login_required");

        let (command_tx, command_rx) = command_channel();
        let (event_tx, event_rx) = event_channel();
        command_tx.send(LifecycleCommand::Start).unwrap();
        drop(command_tx);

        Engine::new(&session, LifecycleConfig::default(), command_rx, event_tx).run();

        let events = drain(&event_rx);
        assert_eq!(events.len(), 2);
        match &events[1] {
            LifecycleEvent::StartFailed {
                phase,
                broadcast_id,
                ..
            } => {
                assert_eq!(*phase, StartPhase::AcquireToken);
                assert!(broadcast_id.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(session.requests().is_empty());
    }

    #[test]
    fn test_engine_ends_broadcast_from_command() {
        let session = session();
        session.respond_json("live/777/end_broadcast/", json!({"status": "ok"}));

        let (command_tx, command_rx) = command_channel();
        let (event_tx, event_rx) = event_channel();

        thread::scope(|scope| {
            let engine = Engine::new(&session, LifecycleConfig::default(), command_rx, event_tx);
            let handle = scope.spawn(move || engine.run());

            command_tx
                .send(LifecycleCommand::End {
                    broadcast_id: BroadcastId::from("777"),
                })
                .unwrap();
            command_tx.send(LifecycleCommand::Shutdown).unwrap();
            handle.join().unwrap();
        });

        assert_eq!(
            drain(&event_rx),
            vec![
                LifecycleEvent::Ready,
                LifecycleEvent::EndRequested {
                    broadcast_id: BroadcastId::from("777"),
                },
                LifecycleEvent::Shutdown,
            ]
        );
        assert_eq!(session.endpoints(), vec!["live/777/end_broadcast/"]);
    }

    #[test]
    fn test_engine_survives_closed_event_channel() {
        let session = session();

        let (command_tx, command_rx) = command_channel();
        let (event_tx, event_rx) = event_channel();
        drop(event_rx);
        command_tx
            .send(LifecycleCommand::End {
                broadcast_id: BroadcastId::from("777"),
            })
            .unwrap();
        command_tx.send(LifecycleCommand::Shutdown).unwrap();

        Engine::new(&session, LifecycleConfig::default(), command_rx, event_tx).run();

        assert_eq!(session.endpoints(), vec!["live/777/end_broadcast/"]);
    }
}
