use std::fmt;
use std::sync::Arc;

use futures::future::join_all;

use crate::advice::{around, Advice, JoinPoint};
use crate::autowire::settle;
use crate::component::{ComponentProxy, Member, Value};
use crate::error::{AutowireError, AutowireResult};
use crate::method::Args;
use crate::options::AutowireOptions;
use crate::params::parse_params;
use crate::traits::ReferenceResolver;

/// A resolved value bound to a declared parameter position.
#[derive(Clone)]
pub struct InjectedArg {
    /// Position in the method's declared parameter list
    pub index: usize,
    /// Value spliced in at that position
    pub value: Value,
}

impl fmt::Debug for InjectedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectedArg").field("index", &self.index).finish()
    }
}

/// Inserts injected values into the actual arguments.
///
/// `injected` is applied in order, each insertion indexed against the list
/// as built so far; real arguments shift right past every injected slot
/// that precedes them. Indices beyond the current length append.
///
/// ```rust
/// use ferrous_autowire::{splice_args, value, InjectedArg};
///
/// let injected = [
///     InjectedArg { index: 0, value: value("Ann") },
///     InjectedArg { index: 2, value: value("NYC") },
/// ];
/// let args = splice_args(vec![value("extra")], &injected);
///
/// let args: Vec<_> = args.iter().map(|v| *v.downcast_ref::<&str>().unwrap()).collect();
/// assert_eq!(args, ["Ann", "extra", "NYC"]);
/// ```
pub fn splice_args(mut args: Args, injected: &[InjectedArg]) -> Args {
    for arg in injected {
        let at = arg.index.min(args.len());
        args.insert(at, arg.value.clone());
    }
    args
}

/// Advice that splices a fixed table of resolved arguments into each call.
#[derive(Debug, Clone)]
pub struct ParameterInjector {
    injected: Arc<[InjectedArg]>,
}

impl ParameterInjector {
    /// Builds an injector; the table is sorted by ascending index.
    pub fn new(mut injected: Vec<InjectedArg>) -> Self {
        injected.sort_by_key(|arg| arg.index);
        Self {
            injected: injected.into(),
        }
    }

    /// The injected-argument table.
    pub fn injected(&self) -> &[InjectedArg] {
        &self.injected
    }
}

impl Advice for ParameterInjector {
    fn around(&self, joinpoint: JoinPoint) -> Option<Value> {
        let args = splice_args(joinpoint.args().to_vec(), &self.injected);
        joinpoint.proceed_apply(args)
    }
}

/// Wires parameters of every eligible method on the component.
///
/// Each method is handled by [`autowire_method_params`], all of them
/// concurrently. Host nodes are left untouched.
pub async fn autowire_parameters(
    resolver: &dyn ReferenceResolver,
    options: &AutowireOptions,
    proxy: &ComponentProxy,
) -> AutowireResult<()> {
    if proxy.is_host_node() {
        tracing::debug!("skipping parameter autowiring for host node");
        return Ok(());
    }

    let methods: Vec<String> = {
        let target = proxy.snapshot();
        target
            .members()
            .filter(|(name, member)| member.is_method() && options.allows_member(&target, name))
            .map(|(name, _)| name.to_string())
            .collect()
    };
    tracing::debug!(methods = methods.len(), "autowiring method parameters");

    let outcomes = join_all(
        methods
            .iter()
            .map(|name| autowire_method_params(resolver, options, proxy, name)),
    )
    .await;

    settle(options, outcomes.into_iter().filter_map(Result::err))
}

/// Resolves a method's eligible parameters and installs a [`ParameterInjector`].
///
/// Parameter names are always read from the original method beneath any
/// advice already installed. Nothing is installed when no parameter is
/// eligible or none resolved; with `fail` set, a failed resolution fails
/// the method before anything is installed.
pub async fn autowire_method_params(
    resolver: &dyn ReferenceResolver,
    options: &AutowireOptions,
    proxy: &ComponentProxy,
    method_name: &str,
) -> AutowireResult<()> {
    let method = match proxy.get(method_name) {
        Some(Member::Method(method)) => method,
        Some(Member::Value(_)) => return Err(AutowireError::NotAMethod(method_name.to_string())),
        None => return Err(AutowireError::MissingMember(method_name.to_string())),
    };

    let candidates: Vec<(usize, String)> = {
        let target = proxy.snapshot();
        parse_params(method.unadvised())
            .into_iter()
            .enumerate()
            .filter(|(_, name)| options.allows_param(&target, name))
            .collect()
    };
    if candidates.is_empty() {
        tracing::trace!(method = method_name, "no autowirable parameters");
        return Ok(());
    }

    let outcomes = join_all(candidates.into_iter().map(|(index, name)| async move {
        let value = resolver.resolve_ref(&name).await?;
        Ok::<_, AutowireError>(InjectedArg { index, value })
    }))
    .await;

    let mut injected = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(arg) => injected.push(arg),
            Err(error) => failures.push(error),
        }
    }
    settle(options, failures)?;

    if injected.is_empty() {
        tracing::debug!(method = method_name, "no parameters resolved");
        return Ok(());
    }

    tracing::debug!(method = method_name, injected = injected.len(), "injecting parameters");
    around(proxy, method_name, ParameterInjector::new(injected))
}
