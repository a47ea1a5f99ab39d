//! Runs one trial on its own task.
//!
//! The board, the gesture translator and the matcher are owned by a single
//! task; hosts talk to it through a [`TrialHandle`], which queues gestures so
//! they are processed strictly in arrival order.

use std::future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time;
use token_rules::ast::Rule;
use tracing::{Instrument, debug, info, info_span, instrument};
use uuid::Uuid;

use crate::board::{BoardControl, BoardLayout, Gesture};
use crate::controller::TokenController;
use crate::error::TrialError;
use crate::matcher::{Matcher, Offer, TrialResult};
use crate::script::parse_script;

/// Parameters of one trial as the hosting experiment defines them.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialConfig {
    /// Instruction shown to the participant.
    pub sentence: String,
    /// Rule text the participant's gestures are matched against.
    pub command_string: String,
    pub layout: BoardLayout,
    /// Expire the trial if it has not concluded after this long.
    pub time_limit: Option<Duration>,
}

impl TrialConfig {
    pub fn new(sentence: impl Into<String>, command_string: impl Into<String>) -> Self {
        TrialConfig {
            sentence: sentence.into(),
            command_string: command_string.into(),
            layout: BoardLayout::standard(),
            time_limit: None,
        }
    }

    pub fn with_layout(mut self, layout: BoardLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// Reply to a gesture sent with [`TrialHandle::call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// The matcher's verdict, if the gesture led to a submission.
    pub offer: Option<Offer>,
    /// Whether the trial has concluded after this gesture.
    pub concluded: bool,
}

type Request = (Gesture, Option<oneshot::Sender<Ack>>);

/// State owned by the session task.
#[derive(Debug)]
pub struct TrialSession {
    id: Uuid,
    controller: TokenController<BoardControl, Matcher>,
}

impl TrialSession {
    /// Parses the trial's rule and spawns the task that runs it.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(config), fields(sentence = %config.sentence))]
    pub fn start(config: TrialConfig) -> Result<TrialHandle, TrialError> {
        let rule = token_rules::parse(&config.command_string)?;
        let id = Uuid::now_v7();

        let (result_tx, result_rx) = oneshot::channel::<TrialResult>();
        let matcher = Matcher::new(rule, move |result| {
            let _ = result_tx.send(result);
        });
        let session = TrialSession {
            id,
            controller: TokenController::new(BoardControl::new(config.layout), matcher),
        };

        let (tx, rx) = mpsc::unbounded_channel::<Request>();
        info!(%id, rule = %session.rule(), "trial started");
        tokio::spawn(
            session
                .run(rx, config.time_limit)
                .instrument(info_span!("trial", %id)),
        );

        Ok(TrialHandle {
            id,
            tx,
            result: Some(result_rx),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn rule(&self) -> &Rule {
        self.controller.model().rule()
    }

    fn handle(&mut self, gesture: Gesture) -> Ack {
        debug!(?gesture, "gesture received");
        let offer = self.controller.perform(gesture);
        Ack {
            offer,
            concluded: self.controller.model().is_concluded(),
        }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Request>, time_limit: Option<Duration>) {
        let deadline = async {
            match time_limit {
                Some(limit) => time::sleep(limit).await,
                None => future::pending().await,
            }
        };
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                request = rx.recv() => {
                    let Some((gesture, maybe_ack)) = request else {
                        debug!("all handles dropped, abandoning trial");
                        break;
                    };
                    let ack = self.handle(gesture);
                    if let Some(ack_tx) = maybe_ack {
                        let _ = ack_tx.send(ack);
                    }
                    if ack.concluded {
                        break;
                    }
                }
                _ = &mut deadline => {
                    info!("time limit elapsed");
                    self.controller.model_mut().expire();
                    break;
                }
            }
        }
    }
}

/// Host side of a running trial.
#[derive(Debug)]
pub struct TrialHandle {
    id: Uuid,
    tx: mpsc::UnboundedSender<Request>,
    result: Option<oneshot::Receiver<TrialResult>>,
}

impl TrialHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queues a gesture without waiting for it to be processed.
    pub fn notify(&self, gesture: Gesture) -> Result<(), TrialError> {
        self.tx
            .send((gesture, None))
            .map_err(|_| TrialError::SessionClosed(self.id))
    }

    /// Parses a gesture script and queues every gesture in it. Nothing is
    /// queued when a line fails to parse.
    pub fn play_script(&self, script: &str) -> Result<usize, TrialError> {
        let gestures = parse_script(script)?;
        let count = gestures.len();
        for gesture in gestures {
            self.notify(gesture)?;
        }
        Ok(count)
    }

    /// Queues a gesture and waits until it has been processed.
    pub async fn call(&self, gesture: Gesture) -> Result<Ack, TrialError> {
        let (ack_tx, ack_rx) = oneshot::channel::<Ack>();
        self.tx
            .send((gesture, Some(ack_tx)))
            .map_err(|_| TrialError::SessionClosed(self.id))?;
        ack_rx.await.map_err(|_| TrialError::SessionClosed(self.id))
    }

    /// Waits for the trial to conclude. The result is handed out once; later
    /// calls report the session as closed.
    pub async fn finished(&mut self) -> Result<TrialResult, TrialError> {
        let result = self.result.take().ok_or(TrialError::SessionClosed(self.id))?;
        result.await.map_err(|_| TrialError::SessionClosed(self.id))
    }
}
