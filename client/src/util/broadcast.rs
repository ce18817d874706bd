//! Cross-tab session sync over `BroadcastChannel`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login, logout and user refreshes are published as JSON `SessionEvent`s on
//! the `lanceraa-session` channel. Other tabs fold them into their
//! `AuthState`. Storage writes stay last-write-wins; the channel only
//! notifies.

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod broadcast_test;

use crate::state::auth::SessionEvent;

pub const CHANNEL_NAME: &str = "lanceraa-session";

pub trait SessionChannel {
    fn publish(&self, event: &SessionEvent);
}

/// Encode an event for `postMessage`.
#[must_use]
pub fn encode_event(event: &SessionEvent) -> Option<String> {
    serde_json::to_string(event).ok()
}

/// Decode a received message; foreign or malformed payloads are dropped.
#[must_use]
pub fn decode_event(raw: &str) -> Option<SessionEvent> {
    match serde_json::from_str(raw) {
        Ok(event) => Some(event),
        Err(e) => {
            log::debug!("ignoring session message: {e}");
            None
        }
    }
}

/// Publishes on a short-lived `BroadcastChannel` per event.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserChannel;

impl SessionChannel for BrowserChannel {
    fn publish(&self, event: &SessionEvent) {
        #[cfg(feature = "hydrate")]
        {
            let Some(raw) = encode_event(event) else {
                return;
            };
            match web_sys::BroadcastChannel::new(CHANNEL_NAME) {
                Ok(channel) => {
                    if let Err(e) = channel.post_message(&wasm_bindgen::JsValue::from_str(&raw)) {
                        log::warn!("session broadcast failed: {e:?}");
                    }
                    channel.close();
                }
                Err(e) => log::warn!("BroadcastChannel unavailable: {e:?}"),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = event;
        }
    }
}

/// Deliver events from other tabs to `on_event` for the lifetime of the page.
#[cfg(feature = "hydrate")]
pub fn subscribe(on_event: impl Fn(SessionEvent) + 'static) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let channel = match web_sys::BroadcastChannel::new(CHANNEL_NAME) {
        Ok(channel) => channel,
        Err(e) => {
            log::warn!("BroadcastChannel unavailable, cross-tab sync disabled: {e:?}");
            return;
        }
    };
    let handler = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
        if let Some(event) = ev.data().as_string().as_deref().and_then(decode_event) {
            on_event(event);
        }
    });
    channel.set_onmessage(Some(handler.as_ref().unchecked_ref()));
    // The subscription lives as long as the page.
    handler.forget();
    std::mem::forget(channel);
}

/// Records published events for unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingChannel(pub std::cell::RefCell<Vec<SessionEvent>>);

#[cfg(test)]
impl RecordingChannel {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.0.borrow().clone()
    }
}

#[cfg(test)]
impl SessionChannel for RecordingChannel {
    fn publish(&self, event: &SessionEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}
