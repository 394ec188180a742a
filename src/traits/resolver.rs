//! Reference resolution traits.

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;

use crate::component::Value;
use crate::error::{AutowireError, AutowireResult};

/// Asynchronously maps a reference name to a value.
///
/// How a name resolves (other components, configuration, external
/// resources) is entirely up to the implementation. Failures are reported
/// through the returned result, never by panicking.
///
/// Any `Fn(String) -> Future` closure is a resolver:
///
/// ```
/// use ferrous_autowire::{value, AutowireError, ReferenceResolver};
///
/// # async fn example() {
/// let resolver = |name: String| async move {
///     if name == "port" {
///         Ok(value(8080u16))
///     } else {
///         Err(AutowireError::Unresolved(name))
///     }
/// };
///
/// let port = resolver.resolve_ref("port").await.unwrap();
/// assert_eq!(port.downcast_ref::<u16>(), Some(&8080));
/// assert!(resolver.resolve_ref("host").await.is_err());
/// # }
/// ```
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    /// Resolves a single reference by name.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The referenced value
    /// * `Err(AutowireError)` - The name is unknown or could not be produced
    async fn resolve_ref(&self, name: &str) -> AutowireResult<Value>;
}

#[async_trait]
impl<F, Fut> ReferenceResolver for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AutowireResult<Value>> + Send + 'static,
{
    async fn resolve_ref(&self, name: &str) -> AutowireResult<Value> {
        self(name.to_string()).await
    }
}

/// In-memory reference table.
///
/// Resolves names that were registered up front; every other name fails
/// with [`AutowireError::Unresolved`].
///
/// ```
/// use ferrous_autowire::{value, ReferenceResolver, References};
///
/// # async fn example() {
/// let refs = References::new()
///     .with("greeting", value("hello".to_string()));
///
/// let greeting = refs.resolve_ref("greeting").await.unwrap();
/// assert_eq!(greeting.downcast_ref::<String>().unwrap(), "hello");
/// # }
/// ```
#[derive(Clone, Default)]
pub struct References {
    values: HashMap<String, Value>,
}

impl References {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reference, builder style.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a reference.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    /// Returns true if the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of registered references.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no references are registered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for References {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.values.keys().collect();
        names.sort();
        f.debug_struct("References").field("names", &names).finish()
    }
}

#[async_trait]
impl ReferenceResolver for References {
    async fn resolve_ref(&self, name: &str) -> AutowireResult<Value> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| AutowireError::Unresolved(name.to_string()))
    }
}
