use crate::error::{Result, ShadowError};
use crate::resolve::program::SearchProgram;
use headless_chrome::protocol::cdp::DOM;
use headless_chrome::{Element, Tab};
use std::sync::Arc;

/// Opaque reference to an element located by a search program.
///
/// The engine never inspects the referenced node; the handle only travels
/// back to the driver that produced it, for interaction. It stays valid as
/// long as the driver keeps the underlying node alive (typically until the
/// page navigates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    object_id: String,
    description: Option<String>,
}

impl ElementHandle {
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            description: None,
        }
    }

    /// Builder method: attach the driver's human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Driver-side identifier for the referenced node.
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Driver-provided description, e.g. `button#save.primary`.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Outcome of running a search program once against the current document.
#[derive(Debug)]
pub enum PollOutcome {
    /// The program located an element.
    Found(ElementHandle),

    /// The program ran to completion without a match.
    NotYetFound,

    /// The driver failed to run the program at all.
    DriverError(ShadowError),
}

/// The execution capability: run one search program against the live
/// document and report what happened.
///
/// Implementations must not retry internally; retry policy belongs to the
/// scheduler, which treats [`PollOutcome::DriverError`] as fatal and only
/// re-runs on [`PollOutcome::NotYetFound`].
pub trait SearchExecutor {
    fn execute(&self, program: &SearchProgram) -> PollOutcome;
}

/// How to act on a located element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Dispatch a click through the driver's input pipeline.
    Click,

    /// Invoke the element's click handler from script. Reaches elements
    /// the input pipeline considers obscured.
    ScriptClick,
}

/// The interaction capability, used only by the find-and-act helpers.
pub trait Interactor {
    fn interact(&self, handle: &ElementHandle, interaction: Interaction) -> Result<()>;
}

impl SearchExecutor for Arc<Tab> {
    fn execute(&self, program: &SearchProgram) -> PollOutcome {
        let remote = match self.evaluate(&program.expression(), false) {
            Ok(remote) => remote,
            Err(e) => return PollOutcome::DriverError(ShadowError::DriverExecution(e.to_string())),
        };

        // A node result carries an object id; null and undefined do not.
        match remote.object_id {
            Some(object_id) => {
                let mut handle = ElementHandle::new(object_id);
                if let Some(description) = remote.description {
                    handle = handle.with_description(description);
                }
                PollOutcome::Found(handle)
            }
            None => PollOutcome::NotYetFound,
        }
    }
}

impl Interactor for Arc<Tab> {
    fn interact(&self, handle: &ElementHandle, interaction: Interaction) -> Result<()> {
        // The handle's remote object id has to be pinned to a DOM node id
        // before the driver can act on it.
        let node_id = self
            .call_method(DOM::RequestNode {
                object_id: handle.object_id().to_string(),
            })
            .map_err(|e| ShadowError::InteractionFailed(e.to_string()))?
            .node_id;

        let element = Element::new(self.as_ref(), node_id)
            .map_err(|e| ShadowError::InteractionFailed(e.to_string()))?;

        match interaction {
            Interaction::Click => {
                element
                    .click()
                    .map_err(|e| ShadowError::InteractionFailed(e.to_string()))?;
            }
            Interaction::ScriptClick => {
                element
                    .call_js_fn("function() { this.click(); }", vec![], false)
                    .map_err(|e| ShadowError::InteractionFailed(e.to_string()))?;
            }
        }

        Ok(())
    }
}
