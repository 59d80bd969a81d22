//! Shadow-DOM resolution engine
//!
//! This module turns a query ([`SelectorPath`](crate::SelectorPath) or text)
//! into a [`SearchProgram`], hands the program to a [`SearchExecutor`] once
//! per poll attempt, and lets the [`ShadowResolver`] scheduler convert "no
//! match yet" into either an [`ElementHandle`] or a typed timeout failure.
//!
//! The executor seam is a trait so the scheduler can be exercised without a
//! browser; `Arc<Tab>` implements it for real Chrome sessions.

pub mod executor;
pub mod ext;
pub mod program;
pub mod scheduler;

pub use executor::{ElementHandle, Interaction, Interactor, PollOutcome, SearchExecutor};
pub use ext::ShadowDomExt;
pub use program::SearchProgram;
pub use scheduler::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, ShadowResolver};
