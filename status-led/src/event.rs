//! Battery and USB events consumed by the status LEDs
//!
//! The battery and USB drivers of the firmware publish [`StatusEvent`]s to
//! [`STATUS_EVENT_CHANNEL`]. Every subscriber receives every event, so the indicator never
//! hides an event from other listeners.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::pubsub::{ImmediatePublisher, PubSubChannel, Subscriber};

/// Trait for event publishers
pub trait EventPublisher<T> {
    fn publish(&self, message: T);
}

/// Trait for event subscribers
pub trait EventSubscriber<T> {
    async fn next_event(&mut self) -> T;
}

// Implementations for embassy-sync PubSubChannel
impl<'a, M: RawMutex, T: Clone, const CAP: usize, const SUBS: usize, const PUBS: usize> EventPublisher<T>
    for ImmediatePublisher<'a, M, T, CAP, SUBS, PUBS>
{
    fn publish(&self, message: T) {
        self.publish_immediate(message);
    }
}

impl<'a, M: RawMutex, T: Clone, const CAP: usize, const SUBS: usize, const PUBS: usize> EventSubscriber<T>
    for Subscriber<'a, M, T, CAP, SUBS, PUBS>
{
    async fn next_event(&mut self) -> T {
        self.next_message_pure().await
    }
}

/// Battery level changed event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStateChangedEvent {
    /// Battery level, value range is 0~100
    pub state_of_charge: u8,
}

/// USB connection state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbConnState {
    /// Not connected
    None,
    /// Connected to a power source only
    Powered,
    /// Enumerated by a USB host
    Hid,
}

impl UsbConnState {
    /// Whether the board is externally powered
    pub fn is_powered(&self) -> bool {
        !matches!(self, UsbConnState::None)
    }
}

/// USB connection state changed event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsbConnStateChangedEvent {
    pub conn_state: UsbConnState,
}

/// Events handled by the status LED controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    Battery(BatteryStateChangedEvent),
    Usb(UsbConnStateChangedEvent),
}

impl From<BatteryStateChangedEvent> for StatusEvent {
    fn from(e: BatteryStateChangedEvent) -> Self {
        StatusEvent::Battery(e)
    }
}

impl From<UsbConnStateChangedEvent> for StatusEvent {
    fn from(e: UsbConnStateChangedEvent) -> Self {
        StatusEvent::Usb(e)
    }
}

/// What the event bus should do after a listener handled an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Propagation {
    /// Pass the event on to the remaining listeners
    Bubble,
    /// Stop delivering the event
    Capture,
}

pub type StatusEventChannel = PubSubChannel<
    crate::RawMutex,
    StatusEvent,
    { crate::STATUS_EVENT_CHANNEL_SIZE },
    { crate::STATUS_EVENT_SUB_SIZE },
    { crate::STATUS_EVENT_PUB_SIZE },
>;

pub type StatusEventSubscriber = Subscriber<
    'static,
    crate::RawMutex,
    StatusEvent,
    { crate::STATUS_EVENT_CHANNEL_SIZE },
    { crate::STATUS_EVENT_SUB_SIZE },
    { crate::STATUS_EVENT_PUB_SIZE },
>;

/// Channel between the battery/USB drivers and the status LED controller
pub static STATUS_EVENT_CHANNEL: StatusEventChannel = PubSubChannel::new();

/// Publish a status event (non-blocking, the oldest event is dropped if the buffer is full)
///
/// Example: `publish_status_event(BatteryStateChangedEvent { state_of_charge: 80 })`
pub fn publish_status_event(e: impl Into<StatusEvent>) {
    STATUS_EVENT_CHANNEL.immediate_publisher().publish(e.into());
}

/// Subscribe to [`STATUS_EVENT_CHANNEL`], fails when all subscriber slots are taken
pub fn status_event_subscriber() -> Result<StatusEventSubscriber, embassy_sync::pubsub::Error> {
    STATUS_EVENT_CHANNEL.subscriber()
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;

    #[test]
    fn test_usb_power() {
        assert!(!UsbConnState::None.is_powered());
        assert!(UsbConnState::Powered.is_powered());
        assert!(UsbConnState::Hid.is_powered());
    }

    #[test]
    fn test_every_subscriber_receives_events() {
        let mut first = status_event_subscriber().unwrap();
        let mut second = status_event_subscriber().unwrap();

        publish_status_event(BatteryStateChangedEvent { state_of_charge: 42 });
        publish_status_event(UsbConnStateChangedEvent {
            conn_state: UsbConnState::Hid,
        });

        for sub in [&mut first, &mut second] {
            assert_eq!(
                block_on(sub.next_event()),
                StatusEvent::Battery(BatteryStateChangedEvent { state_of_charge: 42 })
            );
            assert_eq!(
                block_on(sub.next_event()),
                StatusEvent::Usb(UsbConnStateChangedEvent {
                    conn_state: UsbConnState::Hid
                })
            );
        }
    }
}
