//! Autowiring options and their serializable settings.

use std::env;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::component::Component;

/// Eligibility predicate over `(target, name)`.
pub type Filter = Arc<dyn Fn(&Component, &str) -> bool + Send + Sync>;

/// Environment variable read by [`AutowireSettings::from_env`].
pub const FAIL_ENV_VAR: &str = "AUTOWIRE_FAIL";

/// Per-invocation autowiring policy.
///
/// Missing filters allow every candidate. Nothing here is global: each pass
/// receives the options it should apply. Filters see a snapshot of the
/// component taken when the pass collects its candidates, so they may call
/// back into the proxy.
///
/// ```rust
/// use ferrous_autowire::AutowireOptions;
///
/// let options = AutowireOptions::new()
///     .with_filter(|_target, name| !name.starts_with('_'))
///     .with_param_filter(|_target, name| name != "age")
///     .fail_fast();
///
/// # let target = ferrous_autowire::Component::new();
/// assert!(options.allows_member(&target, "logger"));
/// assert!(!options.allows_member(&target, "_cache"));
/// assert!(!options.allows_param(&target, "age"));
/// assert!(options.fail);
/// ```
#[derive(Clone, Default)]
pub struct AutowireOptions {
    /// Decides which members are eligible
    pub filter: Option<Filter>,
    /// Decides which method parameters are eligible
    pub filter_params: Option<Filter>,
    /// Re-raise resolution failures instead of skipping the candidate
    pub fail: bool,
}

impl AutowireOptions {
    /// Options that allow everything and swallow failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the member filter.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Component, &str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Sets the parameter filter.
    pub fn with_param_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Component, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_params = Some(Arc::new(filter));
        self
    }

    /// Makes resolution failures fail the pass.
    pub fn fail_fast(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Applies the member filter.
    pub fn allows_member(&self, target: &Component, name: &str) -> bool {
        self.filter.as_ref().map_or(true, |allow| allow(target, name))
    }

    /// Applies the parameter filter.
    pub fn allows_param(&self, target: &Component, name: &str) -> bool {
        self.filter_params.as_ref().map_or(true, |allow| allow(target, name))
    }
}

impl fmt::Debug for AutowireOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutowireOptions")
            .field("filter", &self.filter.is_some())
            .field("filter_params", &self.filter_params.is_some())
            .field("fail", &self.fail)
            .finish()
    }
}

/// Data-only part of [`AutowireOptions`], loadable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AutowireSettings {
    /// Re-raise resolution failures
    pub fail: bool,
}

impl AutowireSettings {
    /// Reads settings from `AUTOWIRE_FAIL`; unset means defaults.
    pub fn from_env() -> Self {
        Self::from_env_var(FAIL_ENV_VAR)
    }

    /// Reads the fail flag from the given environment variable.
    ///
    /// `1`, `true`, `yes` and `on` (any case) enable it.
    pub fn from_env_var(name: &str) -> Self {
        let fail = env::var(name)
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);
        Self { fail }
    }

    /// Parses settings from JSON; missing fields take defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Expands the settings into options with no filters.
    pub fn into_options(self) -> AutowireOptions {
        AutowireOptions {
            fail: self.fail,
            ..AutowireOptions::default()
        }
    }
}

impl From<AutowireSettings> for AutowireOptions {
    fn from(settings: AutowireSettings) -> Self {
        settings.into_options()
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
