//! # shadow-pierce
//!
//! A Rust library for locating and driving elements inside nested shadow DOM trees,
//! via Chrome DevTools Protocol (CDP).
//!
//! Web components hide their internals behind shadow roots, which ordinary CSS
//! lookups cannot cross. This crate resolves such elements with two query modes,
//! both wrapped in a bounded-time polling protocol that keeps retrying while the
//! page renders and fails with a typed error once the deadline passes:
//!
//! - **Path lookup**: a `"host > nested > target"` selector chain, matched one
//!   segment per shadow boundary
//! - **Text lookup**: a recursive scan of every shadow subtree for the first
//!   leaf element containing the given text
//!
//! ## Finding elements behind shadow roots
//!
//! ```rust,no_run
//! use shadow_pierce::{BrowserSession, LaunchOptions};
//!
//! # fn main() -> shadow_pierce::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com/settings")?;
//! session.wait_for_navigation()?;
//!
//! // Pierce two shadow boundaries, waiting up to the default 10s
//! let handle = session.find_shadow("user-profile > settings-card > button.save")?;
//! println!("resolved: {:?}", handle.description());
//!
//! // Or search every shadow subtree for rendered text
//! let label = session.find_shadow_text("Save changes")?;
//!
//! // Find-and-click in one step
//! session.click_shadow("user-profile > settings-card > button.save")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Working directly on a tab
//!
//! Any `Arc<Tab>` gains shadow lookups through the [`ShadowDomExt`]
//! extension trait:
//!
//! ```rust,no_run
//! use headless_chrome::Browser;
//! use shadow_pierce::ShadowDomExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let browser = Browser::default()?;
//! let tab = browser.new_tab()?;
//! tab.navigate_to("https://example.com")?;
//!
//! let handle = tab.shadow().find_by_text("Submit")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom timing
//!
//! A [`ShadowResolver`] owns the poll loop; its timeout and poll interval
//! are configurable per instance:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use shadow_pierce::{BrowserSession, ShadowResolver};
//!
//! # fn main() -> shadow_pierce::Result<()> {
//! let session = BrowserSession::new()?;
//! let resolver = ShadowResolver::new(session.tab()?)
//!     .with_default_timeout(Duration::from_secs(3))
//!     .with_poll_interval(Duration::from_millis(100));
//!
//! let handle = resolver.find_element(vec!["wc-login", "form", "input[name=user]"])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`query`]: [`SelectorPath`] and [`TextQuery`] validation
//! - [`resolve`]: Search programs, the executor seam, and the polling resolver
//! - [`tools`]: JSON-parameterized lookup tools for external callers
//! - [`error`]: Error types and result alias

pub mod browser;
pub mod error;
pub mod query;
pub mod resolve;
pub mod tools;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use error::{Result, ShadowError};
pub use query::{SelectorPath, TextQuery};
pub use resolve::{
    DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, ElementHandle, Interaction, Interactor, PollOutcome,
    SearchExecutor, SearchProgram, ShadowDomExt, ShadowResolver,
};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
