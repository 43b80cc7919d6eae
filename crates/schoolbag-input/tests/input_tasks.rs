//! Button and presence tasks against mock inputs, on paused time.

use schoolbag_hardware::mock::{MockAnalogInput, MockDigitalInput};
use schoolbag_hardware::{AnyAnalogInput, AnyDigitalInput};
use schoolbag_input::{ButtonConfig, PresenceConfig, run_button, run_presence};
use schoolbag_lighting::{LightingCommand, LightingHandle};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const SAMPLE: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn short_and_long_presses() {
    let (pin, pin_handle) = MockDigitalInput::new();
    let (lighting, mut commands) = LightingHandle::channel(8);
    let cancel = CancellationToken::new();

    let task = tokio::spawn(run_button(
        AnyDigitalInput::Mock(pin),
        ButtonConfig::default(),
        SAMPLE,
        lighting,
        cancel.clone(),
    ));

    // Two samples pressed, then released.
    pin_handle.set_level(true);
    tokio::time::sleep(SAMPLE * 2).await;
    pin_handle.set_level(false);
    assert_eq!(commands.recv().await, Some(LightingCommand::ToggleLighting));

    // Held: the long press arrives while the button is still down.
    pin_handle.set_level(true);
    assert_eq!(commands.recv().await, Some(LightingCommand::NextAnimation));
    assert!(pin_handle.level());

    tokio::time::sleep(SAMPLE * 10).await;
    pin_handle.set_level(false);
    tokio::time::sleep(SAMPLE * 3).await;
    assert!(commands.try_recv().is_err());

    cancel.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn presence_reports_transitions_once() {
    let (board, board_handle) = MockAnalogInput::new(4);
    let (lighting, mut commands) = LightingHandle::channel(8);
    let cancel = CancellationToken::new();

    let task = tokio::spawn(run_presence(
        AnyAnalogInput::Mock(board),
        PresenceConfig::default(),
        SAMPLE,
        lighting,
        cancel.clone(),
    ));

    board_handle.set_value(2, 400);
    board_handle.set_value(3, 380);
    assert_eq!(commands.recv().await, Some(LightingCommand::PutOn));

    tokio::time::sleep(SAMPLE * 5).await;
    assert!(commands.try_recv().is_err());

    board_handle.set_value(3, 20);
    assert_eq!(commands.recv().await, Some(LightingCommand::PutDown));

    cancel.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn missing_channel_is_skipped_not_fatal() {
    let (board, _board_handle) = MockAnalogInput::new(2);
    let (lighting, _commands) = LightingHandle::channel(8);
    let cancel = CancellationToken::new();

    let task = tokio::spawn(run_presence(
        AnyAnalogInput::Mock(board),
        PresenceConfig::default(),
        SAMPLE,
        lighting,
        cancel.clone(),
    ));

    tokio::time::sleep(SAMPLE * 3).await;
    assert!(!task.is_finished());

    cancel.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn detached_button_fails_fast() {
    let (lighting, _commands) = LightingHandle::channel(8);

    let result = run_button(
        AnyDigitalInput::Detached,
        ButtonConfig::default(),
        SAMPLE,
        lighting,
        CancellationToken::new(),
    )
    .await;
    assert!(result.unwrap_err().is_fatal());
}

#[tokio::test(start_paused = true)]
async fn lighting_gone_stops_button_task() {
    let (pin, pin_handle) = MockDigitalInput::new();
    let (lighting, commands) = LightingHandle::channel(8);
    drop(commands);
    pin_handle.set_level(true);

    let result = run_button(
        AnyDigitalInput::Mock(pin),
        ButtonConfig::default().with_long_press_samples(1),
        SAMPLE,
        lighting,
        CancellationToken::new(),
    )
    .await;
    assert!(result.is_ok());
}
