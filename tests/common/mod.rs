//! Integration test common infrastructure.
//!
//! Provides an in-process app driven through `tower::ServiceExt::oneshot`,
//! a real listener for end-to-end HTTP checks, and metric sinks for
//! asserting on emitted counters.

pub mod app;
pub mod server;
pub mod sinks;

#[allow(unused_imports)]
pub use app::TestApp;
#[allow(unused_imports)]
pub use server::TestServer;
#[allow(unused_imports)]
pub use sinks::{FailingSink, RecordingSink};
