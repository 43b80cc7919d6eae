//! Task supervisor.
//!
//! The supervisor spawns one task per subsystem into a [`JoinSet`], gives
//! each a child of a shared [`CancellationToken`] and connects them with
//! channels. Subsystems that are disabled in the configuration, or whose
//! peripheral is detached, are skipped and the rest of the bag keeps
//! running without them.
//!
//! # Examples
//!
//! ```no_run
//! use schoolbag_app::{AppConfig, Devices, Supervisor};
//! use schoolbag_content::{ContentReconciler, MemoryPersistence};
//! use schoolbag_core::{LocalClock, PendingTags, Settings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let persistence = MemoryPersistence::new(Settings::default());
//!     let reconciler = ContentReconciler::new(
//!         Settings::default(),
//!         PendingTags::default(),
//!         persistence,
//!         LocalClock,
//!     );
//!
//!     let (devices, _handles) = Devices::mock(30);
//!     let handle = Supervisor::new(AppConfig::default(), devices).start(reconciler);
//!
//!     let mut events = handle.subscribe();
//!     while let Ok(event) = events.recv().await {
//!         println!("{:?}", event);
//!     }
//!
//!     handle.shutdown().await;
//! }
//! ```

use crate::config::AppConfig;
use crate::error::TaskError;
use schoolbag_content::{ContentCommand, ContentEvent, ContentPersistence, ContentReconciler, run_content};
use schoolbag_core::WeekdayClock;
use schoolbag_hardware::mock::{
    MockAnalogInput, MockAnalogInputHandle, MockDigitalInput, MockDigitalInputHandle, MockLedStrip,
    MockLedStripHandle, MockRfid, MockRfidHandle,
};
use schoolbag_hardware::{
    AnyAnalogInput, AnyDigitalInput, AnyLedStrip, AnyRfidReader, HardwareError, LedStrip,
};
use schoolbag_input::{run_button, run_presence};
use schoolbag_lighting::{AnimationEngine, LightingHandle, run_lighting};
use schoolbag_rfid::run_reader;
use schoolbag_storage::run_settings_watcher;
use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const CONTENT: &str = "content";
const RFID: &str = "RFID reader";
const LIGHTING: &str = "lighting";
const PREFERENCES: &str = "preferences";
const BUTTON: &str = "button";
const PRESENCE: &str = "presence";
const WATCHER: &str = "settings watcher";

/// Analog channels on the mock sensor board (an MCP3008 has eight).
const MOCK_ANALOG_CHANNELS: u8 = 8;

/// The bag's peripherals.
#[derive(Debug)]
pub struct Devices {
    pub reader: AnyRfidReader,
    pub strip: AnyLedStrip,
    pub button: AnyDigitalInput,
    pub sensors: AnyAnalogInput,
}

impl Devices {
    /// No peripheral attached; only the content and watcher tasks run.
    pub fn detached() -> Self {
        Self {
            reader: AnyRfidReader::Detached,
            strip: AnyLedStrip::Detached,
            button: AnyDigitalInput::Detached,
            sensors: AnyAnalogInput::Detached,
        }
    }

    /// Mock peripherals, with the handles that drive them.
    pub fn mock(pixel_count: usize) -> (Self, MockHandles) {
        let (reader, reader_handle) = MockRfid::new();
        let (strip, strip_handle) = MockLedStrip::new(pixel_count);
        let (button, button_handle) = MockDigitalInput::new();
        let (sensors, sensors_handle) = MockAnalogInput::new(MOCK_ANALOG_CHANNELS);

        let devices = Self {
            reader: AnyRfidReader::Mock(reader),
            strip: AnyLedStrip::Mock(strip),
            button: AnyDigitalInput::Mock(button),
            sensors: AnyAnalogInput::Mock(sensors),
        };
        let handles = MockHandles {
            reader: reader_handle,
            strip: strip_handle,
            button: button_handle,
            sensors: sensors_handle,
        };
        (devices, handles)
    }
}

/// Control handles for [`Devices::mock`].
#[derive(Debug, Clone)]
pub struct MockHandles {
    pub reader: MockRfidHandle,
    pub strip: MockLedStripHandle,
    pub button: MockDigitalInputHandle,
    pub sensors: MockAnalogInputHandle,
}

/// Starts the bag's tasks.
#[derive(Debug)]
pub struct Supervisor {
    config: AppConfig,
    devices: Devices,
}

impl Supervisor {
    pub fn new(config: AppConfig, devices: Devices) -> Self {
        Self { config, devices }
    }

    /// Spawn every runnable task and return the handle that owns them.
    ///
    /// The lighting engine starts with the preferences held by
    /// `reconciler`; later changes arrive as
    /// [`ContentEvent::PreferencesChanged`].
    pub fn start<P, C>(self, reconciler: ContentReconciler<P, C>) -> SupervisorHandle
    where
        P: ContentPersistence + 'static,
        C: WeekdayClock + 'static,
    {
        let Self { config, devices } = self;
        let Devices {
            reader,
            strip,
            button,
            sensors,
        } = devices;

        let cancel = CancellationToken::new();
        let mut tasks = TaskSet::default();
        let (content_tx, content_rx) = mpsc::channel(config.channel_capacity);
        let (events, _) = broadcast::channel(config.channel_capacity);
        let profile = reconciler.snapshot();

        let lighting = if should_run(LIGHTING, config.lighting_enabled, strip.is_attached()) {
            let (handle, commands) = LightingHandle::channel(config.channel_capacity);
            let mut engine =
                AnimationEngine::new(config.engine.with_pixel_count(strip.pixel_count()));
            engine.set_mode(profile.lighting_mode);
            engine.set_animation(profile.animation_type);

            tasks.spawn(
                LIGHTING,
                hardware_task(
                    LIGHTING,
                    run_lighting(
                        strip,
                        engine,
                        commands,
                        config.animation_interval,
                        cancel.child_token(),
                    ),
                ),
            );
            tasks.spawn(
                PREFERENCES,
                forward_preferences(events.subscribe(), handle.clone(), cancel.child_token()),
            );
            Some(handle)
        } else {
            None
        };

        match &lighting {
            Some(lighting) => {
                if should_run(BUTTON, config.button_enabled, button.is_attached()) {
                    tasks.spawn(
                        BUTTON,
                        hardware_task(
                            BUTTON,
                            run_button(
                                button,
                                config.button,
                                config.button_interval,
                                lighting.clone(),
                                cancel.child_token(),
                            ),
                        ),
                    );
                }
                if should_run(PRESENCE, config.presence_enabled, sensors.is_attached()) {
                    tasks.spawn(
                        PRESENCE,
                        hardware_task(
                            PRESENCE,
                            run_presence(
                                sensors,
                                config.presence,
                                config.sensor_interval,
                                lighting.clone(),
                                cancel.child_token(),
                            ),
                        ),
                    );
                }
            }
            None => info!("No lighting task, button and presence sensors unused"),
        }

        if should_run(RFID, config.rfid_enabled, reader.is_attached()) {
            tasks.spawn(
                RFID,
                hardware_task(
                    RFID,
                    run_reader(
                        reader,
                        config.reader.clone(),
                        content_tx.clone(),
                        cancel.child_token(),
                    ),
                ),
            );
        }

        if should_run(WATCHER, config.watcher_enabled, true) {
            let path = config.store.settings_path();
            let interval = config.watch_interval;
            let commands = content_tx.clone();
            let token = cancel.child_token();
            tasks.spawn(WATCHER, async move {
                run_settings_watcher(path, interval, commands, token).await;
                Ok(())
            });
        }

        let publisher = events.clone();
        let token = cancel.child_token();
        tasks.spawn(CONTENT, async move {
            run_content(reconciler, content_rx, publisher, token).await;
            Ok(())
        });

        info!("Started {} tasks: {}", tasks.names.len(), tasks.names.join(", "));

        SupervisorHandle {
            cancel,
            tasks: tasks.set,
            running: tasks.names,
            events,
            content: content_tx,
            lighting,
            shutdown_grace: config.shutdown_grace,
        }
    }
}

#[derive(Default)]
struct TaskSet {
    set: JoinSet<Result<(), TaskError>>,
    names: Vec<&'static str>,
}

impl TaskSet {
    fn spawn<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.set.spawn(task);
        self.names.push(name);
        debug!("Spawned {} task", name);
    }
}

fn should_run(name: &str, enabled: bool, attached: bool) -> bool {
    if !enabled {
        info!("{} disabled", name);
        return false;
    }
    if !attached {
        warn!("{} not attached, running without it", name);
        return false;
    }
    true
}

async fn hardware_task(
    name: &'static str,
    task: impl Future<Output = Result<(), HardwareError>>,
) -> Result<(), TaskError> {
    task.await.map_err(|e| {
        error!("{} task stopped: {}", name, e);
        TaskError::hardware(name, e)
    })
}

async fn forward_preferences(
    mut events: broadcast::Receiver<ContentEvent>,
    lighting: LightingHandle,
    cancel: CancellationToken,
) -> Result<(), TaskError> {
    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            event = events.recv() => event,
        };

        match event {
            Ok(ContentEvent::PreferencesChanged { mode, animation }) => {
                info!("Lighting preferences: mode {}, animation {}", mode, animation);
                if !lighting.set_preferences(mode, animation).await {
                    break;
                }
            }
            Ok(_) => {}
            Err(RecvError::Lagged(missed)) => warn!("Missed {} content events", missed),
            Err(RecvError::Closed) => break,
        }
    }
    Ok(())
}

/// Running tasks and the channels into them.
pub struct SupervisorHandle {
    cancel: CancellationToken,
    tasks: JoinSet<Result<(), TaskError>>,
    running: Vec<&'static str>,
    events: broadcast::Sender<ContentEvent>,
    content: mpsc::Sender<ContentCommand>,
    lighting: Option<LightingHandle>,
    shutdown_grace: Duration,
}

impl SupervisorHandle {
    /// Receive content events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.events.subscribe()
    }

    /// Sender into the content task.
    pub fn content_commands(&self) -> mpsc::Sender<ContentCommand> {
        self.content.clone()
    }

    /// Handle to the lighting task, if it runs.
    pub fn lighting(&self) -> Option<&LightingHandle> {
        self.lighting.as_ref()
    }

    /// Names of the tasks that were started.
    pub fn running_tasks(&self) -> &[&'static str] {
        &self.running
    }

    /// Ask every task to stop. Calling it again has no effect.
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            info!("Stopping tasks");
        }
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop every task and wait for it to finish.
    ///
    /// Tasks still running after the grace period are aborted.
    pub async fn shutdown(mut self) -> ShutdownReport {
        self.stop();

        let mut report = ShutdownReport::default();
        let deadline = tokio::time::sleep(self.shutdown_grace);
        tokio::pin!(deadline);
        let mut aborted = false;

        loop {
            tokio::select! {
                result = self.tasks.join_next() => match result {
                    Some(result) => report.record(classify_task_result(result)),
                    None => break,
                },
                _ = &mut deadline, if !aborted => {
                    warn!("Tasks still running after {:?}, aborting", self.shutdown_grace);
                    self.tasks.abort_all();
                    aborted = true;
                }
            }
        }

        report.log();
        report
    }
}

fn classify_task_result(result: Result<Result<(), TaskError>, JoinError>) -> TaskTermination {
    match result {
        Ok(Ok(())) => TaskTermination::Success,
        Ok(Err(e)) => {
            debug!("{} task ended with error", e.task());
            TaskTermination::Error
        }
        Err(e) if e.is_cancelled() => TaskTermination::Cancelled,
        Err(e) => {
            error!("Task panicked: {}", e);
            TaskTermination::Panic
        }
    }
}

/// Task termination classification for shutdown handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskTermination {
    Success,
    Error,
    /// Aborted after the grace period.
    Cancelled,
    Panic,
}

/// How the tasks ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub panicked: usize,
}

impl ShutdownReport {
    /// No task failed or panicked.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.panicked == 0
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.cancelled + self.panicked
    }

    fn record(&mut self, termination: TaskTermination) {
        match termination {
            TaskTermination::Success => self.succeeded += 1,
            TaskTermination::Error => self.failed += 1,
            TaskTermination::Cancelled => self.cancelled += 1,
            TaskTermination::Panic => self.panicked += 1,
        }
    }

    fn log(&self) {
        if self.is_clean() {
            info!(
                "All {} tasks stopped ({} aborted)",
                self.total(),
                self.cancelled
            );
        } else {
            warn!(
                "Tasks stopped: {} ok, {} failed, {} aborted, {} panicked",
                self.succeeded, self.failed, self.cancelled, self.panicked
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = ShutdownReport::default();
        report.record(TaskTermination::Success);
        report.record(TaskTermination::Success);
        report.record(TaskTermination::Cancelled);

        assert_eq!(report.total(), 3);
        assert!(report.is_clean());

        report.record(TaskTermination::Error);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_classify_task_result() {
        let mut set = JoinSet::new();
        set.spawn(async { Ok::<(), TaskError>(()) });
        set.spawn(async {
            Err(TaskError::hardware(
                "test",
                HardwareError::disconnected("mock"),
            ))
        });
        set.spawn(async { panic!("boom") });

        let mut seen = Vec::new();
        while let Some(result) = set.join_next().await {
            seen.push(classify_task_result(result));
        }
        seen.sort_by_key(|termination| *termination as u8);

        assert_eq!(
            seen,
            vec![
                TaskTermination::Success,
                TaskTermination::Error,
                TaskTermination::Panic
            ]
        );
    }

    #[tokio::test]
    async fn test_classify_aborted_task() {
        let mut set: JoinSet<Result<(), TaskError>> = JoinSet::new();
        set.spawn(std::future::pending());
        set.abort_all();

        let result = set.join_next().await.unwrap();
        assert_eq!(classify_task_result(result), TaskTermination::Cancelled);
    }

    #[test]
    fn test_detached_devices() {
        let devices = Devices::detached();

        assert!(!devices.reader.is_attached());
        assert!(!devices.strip.is_attached());
        assert!(!devices.button.is_attached());
        assert!(!devices.sensors.is_attached());
    }

    #[test]
    fn test_mock_devices() {
        let (devices, handles) = Devices::mock(12);

        assert!(devices.reader.is_attached());
        assert_eq!(devices.strip.pixel_count(), 12);
        assert!(handles.strip.is_blank());
    }
}
