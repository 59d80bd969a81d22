use crate::resolve::scheduler::ShadowResolver;
use headless_chrome::Tab;
use std::sync::Arc;

/// Shadow-piercing lookups on any tab, without going through a
/// [`BrowserSession`](crate::BrowserSession).
///
/// ```rust,no_run
/// use headless_chrome::Browser;
/// use shadow_pierce::ShadowDomExt;
///
/// # fn main() -> anyhow::Result<()> {
/// let browser = Browser::default()?;
/// let tab = browser.new_tab()?;
///
/// let handle = tab.shadow().find_element("user-profile > button.save")?;
/// # Ok(())
/// # }
/// ```
pub trait ShadowDomExt {
    /// A resolver bound to this tab, with default timing.
    fn shadow(&self) -> ShadowResolver<Arc<Tab>>;
}

impl ShadowDomExt for Arc<Tab> {
    fn shadow(&self) -> ShadowResolver<Arc<Tab>> {
        ShadowResolver::new(self.clone())
    }
}
