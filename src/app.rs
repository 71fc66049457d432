//! The game event loop.
//!
//! One task owns the [`GameController`]: it applies events as they arrive
//! and, on every frame tick, renders if anything changed since the last
//! frame. Sensor bursts between two ticks collapse into one render.

use crate::config::Config;
use crate::devices::DeviceSelector;
use crate::error::Result;
use crate::game::{
    DeviceManager, GameController, GameEvent, RenderScheduler, Session, StateNotifier,
};
use crate::present::{Frame, Presenter};
use log::{debug, error, info};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Capacity of the game event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Create the event channel shared by input sources and the round timer.
pub fn event_channel() -> (mpsc::Sender<GameEvent>, mpsc::Receiver<GameEvent>) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

/// Turn a shutdown signal (such as Ctrl+C) into [`GameEvent::Quit`].
///
/// The session then ends through the normal quit path, which releases all
/// hardware, instead of being dropped mid-loop.
pub fn spawn_quit_on<S, E>(signal: S, events: mpsc::Sender<GameEvent>) -> JoinHandle<()>
where
    S: Future<Output = std::result::Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                info!("Received shutdown signal");
                if events.send(GameEvent::Quit).await.is_err() {
                    debug!("Game session already ended");
                }
            }
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    })
}

/// Run a game session until [`GameEvent::Quit`] arrives.
///
/// `events_tx` must be the sender paired with `events`; the round timer
/// reports expiry through it.
pub async fn run(
    config: &Config,
    selector: Arc<dyn DeviceSelector>,
    presenter: &mut dyn Presenter,
    events_tx: mpsc::Sender<GameEvent>,
    mut events: mpsc::Receiver<GameEvent>,
) -> Result<()> {
    let notifier = StateNotifier::new();
    let session = Session::new(notifier.clone());
    let manager = DeviceManager::new(selector);
    let mut controller =
        GameController::new(session, manager, events_tx, config.round.duration());
    let mut scheduler = RenderScheduler::new();

    let mut frames = interval(config.display.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Game session started");
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if !controller.handle(event) {
                    break;
                }
            }
            _ = frames.tick() => {
                if scheduler.should_render(&notifier) {
                    presenter.present(&Frame::capture(controller.session()))?;
                }
            }
        }
    }

    controller.shutdown();
    if scheduler.should_render(&notifier) {
        presenter.present(&Frame::capture(controller.session()))?;
    }
    info!("Game session ended");
    Ok(())
}
