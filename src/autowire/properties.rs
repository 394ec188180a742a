use futures::future::join_all;

use crate::autowire::settle;
use crate::component::ComponentProxy;
use crate::error::{AutowireError, AutowireResult};
use crate::options::AutowireOptions;
use crate::traits::ReferenceResolver;

/// Resolves every eligible member name and assigns the result onto it.
///
/// Host nodes are left untouched. Members whose names fail to resolve keep
/// their current value; with `fail` set, the pass then fails once every
/// other candidate has settled.
///
/// ```rust
/// use ferrous_autowire::{autowire_properties, value, AutowireOptions, Component, ComponentProxy, References};
///
/// # async fn example() {
/// let refs = References::new().with("foo", value(42i32));
/// let proxy = ComponentProxy::new(Component::builder().unset("foo").build());
///
/// autowire_properties(&refs, &AutowireOptions::new(), &proxy).await.unwrap();
/// assert_eq!(proxy.target().value_as::<i32>("foo"), Some(&42));
/// # }
/// ```
pub async fn autowire_properties(
    resolver: &dyn ReferenceResolver,
    options: &AutowireOptions,
    proxy: &ComponentProxy,
) -> AutowireResult<()> {
    if proxy.is_host_node() {
        tracing::debug!("skipping property autowiring for host node");
        return Ok(());
    }

    let candidates: Vec<String> = {
        let target = proxy.snapshot();
        target
            .member_names()
            .filter(|name| options.allows_member(&target, name))
            .map(str::to_string)
            .collect()
    };
    tracing::debug!(candidates = candidates.len(), "autowiring properties");

    let outcomes = join_all(candidates.into_iter().map(|name| async move {
        let value = resolver.resolve_ref(&name).await?;
        proxy.set(&name, Some(value));
        tracing::debug!(property = %name, "autowired property");
        Ok::<(), AutowireError>(())
    }))
    .await;

    settle(options, outcomes.into_iter().filter_map(Result::err))
}
