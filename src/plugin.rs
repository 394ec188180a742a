//! Container extension point.
//!
//! A container calls [`WirePlugin::configure_before`] right before it
//! finishes configuring a component. The plugin hands a task back through
//! the [`ConfigureOutcome`]; the container defers completing the component
//! until the matching [`PendingConfigure`] settles.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::sync::Arc;

use futures::channel::oneshot;
use futures::future::BoxFuture;

use crate::autowire::{autowire_parameters, autowire_properties};
use crate::component::{ComponentProxy, Value};
use crate::error::{AutowireError, AutowireResult};
use crate::options::AutowireOptions;
use crate::traits::ReferenceResolver;

/// Deferred configuration work handed back to the container.
pub type ConfigureTask = BoxFuture<'static, AutowireResult<()>>;

/// Wiring context supplied by the container for one component.
#[derive(Clone)]
pub struct WireContext {
    resolver: Arc<dyn ReferenceResolver>,
}

impl WireContext {
    /// Creates a context around a reference resolver.
    pub fn new<R>(resolver: R) -> Self
    where
        R: ReferenceResolver + 'static,
    {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Creates a context sharing an existing resolver.
    pub fn from_shared(resolver: Arc<dyn ReferenceResolver>) -> Self {
        Self { resolver }
    }

    /// The reference resolver.
    pub fn resolver(&self) -> Arc<dyn ReferenceResolver> {
        self.resolver.clone()
    }

    /// Resolves a reference through the context's resolver.
    pub async fn resolve_ref(&self, name: &str) -> AutowireResult<Value> {
        self.resolver.resolve_ref(name).await
    }
}

impl fmt::Debug for WireContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireContext").finish_non_exhaustive()
    }
}

/// Plugin-side half of a configure step.
pub struct ConfigureOutcome {
    sender: oneshot::Sender<ConfigureTask>,
}

/// Container-side half of a configure step.
pub struct PendingConfigure {
    receiver: oneshot::Receiver<ConfigureTask>,
}

impl ConfigureOutcome {
    /// Creates a connected outcome/pending pair.
    pub fn channel() -> (ConfigureOutcome, PendingConfigure) {
        let (sender, receiver) = oneshot::channel();
        (ConfigureOutcome { sender }, PendingConfigure { receiver })
    }

    /// Hands the task representing this configure step to the container.
    pub fn resolve<F>(self, task: F)
    where
        F: Future<Output = AutowireResult<()>> + Send + 'static,
    {
        let task: ConfigureTask = Box::pin(task);
        if self.sender.send(task).is_err() {
            tracing::debug!("container stopped waiting for configure task");
        }
    }
}

impl PendingConfigure {
    /// Waits for the plugin's task and then for the task itself.
    ///
    /// Fails with [`AutowireError::Abandoned`] if the outcome was dropped
    /// without a task.
    pub async fn settled(self) -> AutowireResult<()> {
        match self.receiver.await {
            Ok(task) => task.await,
            Err(oneshot::Canceled) => Err(AutowireError::Abandoned),
        }
    }
}

impl IntoFuture for PendingConfigure {
    type Output = AutowireResult<()>;
    type IntoFuture = BoxFuture<'static, AutowireResult<()>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.settled())
    }
}

impl fmt::Debug for ConfigureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigureOutcome").finish_non_exhaustive()
    }
}

impl fmt::Debug for PendingConfigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingConfigure").finish_non_exhaustive()
    }
}

/// Lifecycle hooks a container invokes on registered plugins.
pub trait WirePlugin: Send + Sync {
    /// Runs before the container finishes configuring `proxy`.
    ///
    /// Implementations must call `outcome.resolve` exactly once.
    fn configure_before(&self, outcome: ConfigureOutcome, proxy: ComponentProxy, wire: WireContext);
}

/// Autowires properties, then method parameters, of every configured component.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{
///     autowire_plugin, value, Component, ComponentProxy, ConfigureOutcome, References,
///     WireContext, WirePlugin,
/// };
///
/// # async fn example() {
/// let plugin = autowire_plugin();
/// let proxy = ComponentProxy::new(Component::builder().unset("port").build());
/// let wire = WireContext::new(References::new().with("port", value(8080u16)));
///
/// let (outcome, pending) = ConfigureOutcome::channel();
/// plugin.configure_before(outcome, proxy.clone(), wire);
/// pending.settled().await.unwrap();
///
/// assert_eq!(proxy.target().value_as::<u16>("port"), Some(&8080));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutowirePlugin {
    options: Arc<AutowireOptions>,
}

impl AutowirePlugin {
    /// Plugin with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugin applying the given options to every component.
    pub fn with_options(options: AutowireOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Options applied by this plugin.
    pub fn options(&self) -> &AutowireOptions {
        &self.options
    }

    /// Builds the task wiring one component: properties first, then
    /// parameters once property wiring has settled.
    pub fn wire(&self, proxy: ComponentProxy, resolver: Arc<dyn ReferenceResolver>) -> ConfigureTask {
        let options = self.options.clone();
        Box::pin(async move {
            autowire_properties(&*resolver, &options, &proxy).await?;
            autowire_parameters(&*resolver, &options, &proxy).await
        })
    }
}

impl WirePlugin for AutowirePlugin {
    fn configure_before(&self, outcome: ConfigureOutcome, proxy: ComponentProxy, wire: WireContext) {
        outcome.resolve(self.wire(proxy, wire.resolver()));
    }
}

/// Creates an autowire plugin with default options.
pub fn autowire_plugin() -> AutowirePlugin {
    AutowirePlugin::new()
}
