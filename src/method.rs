//! Callable members and their parameter declarations.

use std::fmt;
use std::sync::Arc;

use crate::advice::Advisor;
use crate::component::Value;

/// Actual call arguments.
pub type Args = Vec<Value>;

/// Type-erased method body.
pub type MethodFn = Arc<dyn Fn(Args) -> Option<Value> + Send + Sync>;

/// Where a method's parameter names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSource {
    /// Names declared explicitly, in positional order
    Declared(Arc<[String]>),
    /// Textual signature such as `fn greet(name, age)`, parsed lexically
    Signature(Arc<str>),
}

/// A callable component member.
///
/// Cloning is cheap; clones share the same body. A method produced by
/// [`around`](crate::advice::around) carries the [`Advisor`] that owns the
/// method it wraps.
#[derive(Clone)]
pub struct Method {
    body: MethodFn,
    params: ParamSource,
    advisor: Option<Arc<Advisor>>,
}

impl Method {
    /// Creates a method with explicitly declared parameter names.
    ///
    /// ```rust
    /// use ferrous_autowire::{parse_params, Method};
    ///
    /// let connect = Method::new(["host", "port"], |_args| None);
    /// assert_eq!(parse_params(&connect), ["host", "port"]);
    /// ```
    pub fn new<I, S, F>(params: I, body: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Args) -> Option<Value> + Send + Sync + 'static,
    {
        let names: Vec<String> = params.into_iter().map(Into::into).collect();
        Self {
            body: Arc::new(body),
            params: ParamSource::Declared(names.into()),
            advisor: None,
        }
    }

    /// Creates a method whose parameter names are read off a signature.
    pub fn from_signature<F>(signature: impl Into<String>, body: F) -> Self
    where
        F: Fn(Args) -> Option<Value> + Send + Sync + 'static,
    {
        let signature: String = signature.into();
        Self {
            body: Arc::new(body),
            params: ParamSource::Signature(signature.into()),
            advisor: None,
        }
    }

    pub(crate) fn advised(body: MethodFn, advisor: Arc<Advisor>) -> Self {
        Self {
            body,
            params: ParamSource::Declared(Arc::from(Vec::<String>::new())),
            advisor: Some(advisor),
        }
    }

    /// Parameter declaration of this method.
    ///
    /// Advised wrappers declare no parameters of their own; see
    /// [`unadvised`](Self::unadvised).
    pub fn params(&self) -> &ParamSource {
        &self.params
    }

    /// Invokes the method.
    pub fn call(&self, args: Args) -> Option<Value> {
        (self.body)(args)
    }

    /// The advisor, if this method is an advice wrapper.
    pub fn advisor(&self) -> Option<&Advisor> {
        self.advisor.as_deref()
    }

    /// Returns true if this method is an advice wrapper.
    pub fn is_advised(&self) -> bool {
        self.advisor.is_some()
    }

    /// The innermost original method beneath any advice wrappers.
    pub fn unadvised(&self) -> &Method {
        let mut method = self;
        while let Some(advisor) = &method.advisor {
            method = advisor.original();
        }
        method
    }

    /// Returns true if both handles share the same body.
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("params", &self.params)
            .field("advised", &self.is_advised())
            .finish()
    }
}
