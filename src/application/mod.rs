//! Application layer driving the checkout form.
//!
//! `ValidationPipeline` reacts to each edit synchronously. `CheckoutSession`
//! feeds it from a tokio channel behind a per-field debounce, and
//! `ScriptReplay` does the same for recorded edits in virtual time.

pub mod pipeline;
pub mod replay;
pub mod session;
pub mod throttle;
