//! Around-advice for component methods.
//!
//! [`around`] replaces a method on a component with a wrapper that routes
//! every call through an [`Advice`]. The advice receives a [`JoinPoint`]
//! carrying the actual arguments and can proceed to the wrapped method with
//! whatever argument list it chooses.

use std::fmt;
use std::sync::Arc;

use crate::component::{ComponentProxy, Member, Value};
use crate::error::{AutowireError, AutowireResult};
use crate::method::{Args, Method};

/// One in-flight call of an advised method.
pub struct JoinPoint {
    method_name: Arc<str>,
    args: Args,
    target: Method,
}

impl JoinPoint {
    /// Name of the advised method.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Arguments the caller actually passed.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Invokes the wrapped method with the caller's arguments.
    pub fn proceed(self) -> Option<Value> {
        self.target.call(self.args)
    }

    /// Invokes the wrapped method with a replacement argument list.
    pub fn proceed_apply(&self, args: Args) -> Option<Value> {
        self.target.call(args)
    }
}

impl fmt::Debug for JoinPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinPoint")
            .field("method_name", &self.method_name)
            .field("args", &self.args.len())
            .finish()
    }
}

/// Callback run around each call of an advised method.
pub trait Advice: Send + Sync {
    /// Handles one call; must proceed for the wrapped method to run.
    fn around(&self, joinpoint: JoinPoint) -> Option<Value>;
}

impl<F> Advice for F
where
    F: Fn(JoinPoint) -> Option<Value> + Send + Sync,
{
    fn around(&self, joinpoint: JoinPoint) -> Option<Value> {
        self(joinpoint)
    }
}

/// Ownership record of an advice wrapper.
pub struct Advisor {
    method_name: Arc<str>,
    original: Method,
    advice: Arc<dyn Advice>,
}

impl Advisor {
    /// The method this wrapper replaced.
    pub fn original(&self) -> &Method {
        &self.original
    }

    /// Name the wrapper was installed under.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }
}

impl fmt::Debug for Advisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Advisor")
            .field("method_name", &self.method_name)
            .field("original", &self.original)
            .finish()
    }
}

/// Wraps `original` so every call goes through `advice`.
pub fn advise(method_name: &str, original: Method, advice: Arc<dyn Advice>) -> Method {
    let advisor = Arc::new(Advisor {
        method_name: Arc::from(method_name),
        original,
        advice,
    });

    let inner = advisor.clone();
    Method::advised(
        Arc::new(move |args: Args| {
            inner.advice.around(JoinPoint {
                method_name: inner.method_name.clone(),
                args,
                target: inner.original.clone(),
            })
        }),
        advisor,
    )
}

/// Replaces `method_name` on the proxied component with an advised wrapper.
///
/// Advising an already-advised method stacks the new advice outside the
/// existing one.
///
/// ```rust
/// use ferrous_autowire::{around, value, Component, ComponentProxy, JoinPoint, Method};
///
/// let proxy = ComponentProxy::new(
///     Component::builder()
///         .method("len", Method::new(["items"], |args| Some(value(args.len()))))
///         .build(),
/// );
///
/// around(&proxy, "len", |jp: JoinPoint| {
///     let mut args = jp.args().to_vec();
///     args.push(value(()));
///     jp.proceed_apply(args)
/// })
/// .unwrap();
///
/// let result = proxy.call("len", vec![]).unwrap().unwrap();
/// assert_eq!(result.downcast_ref::<usize>(), Some(&1));
/// ```
pub fn around<A>(proxy: &ComponentProxy, method_name: &str, advice: A) -> AutowireResult<()>
where
    A: Advice + 'static,
{
    let current = match proxy.get(method_name) {
        Some(Member::Method(method)) => method,
        Some(Member::Value(_)) => return Err(AutowireError::NotAMethod(method_name.to_string())),
        None => return Err(AutowireError::MissingMember(method_name.to_string())),
    };

    let wrapped = advise(method_name, current, Arc::new(advice));
    proxy.set_member(method_name, Member::Method(wrapped));
    tracing::debug!(method = method_name, "installed around advice");
    Ok(())
}
