//! Component descriptors and the proxy handle used to read and write them.
//!
//! A [`Component`] enumerates its own members up front, in declaration order.
//! Autowiring never discovers members reflectively: whatever the descriptor
//! lists is what gets considered.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{AutowireError, AutowireResult};
use crate::method::{Args, Method};

/// Type-erased, shareable dependency value.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Wraps a concrete value as a [`Value`].
///
/// ```rust
/// use ferrous_autowire::value;
///
/// let v = value(42u32);
/// assert_eq!(v.downcast_ref::<u32>(), Some(&42));
/// ```
pub fn value<T: Any + Send + Sync>(inner: T) -> Value {
    Arc::new(inner)
}

/// A single slot on a component.
#[derive(Clone)]
pub enum Member {
    /// Plain property; `None` stands for a declared but unset value
    Value(Option<Value>),
    /// Callable member
    Method(Method),
}

impl Member {
    /// Returns true if this member holds a method.
    pub fn is_method(&self) -> bool {
        matches!(self, Member::Method(_))
    }

    /// Returns the method if this member holds one.
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Member::Method(method) => Some(method),
            Member::Value(_) => None,
        }
    }

    /// Returns the property value, if this is a property and it is set.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Member::Value(value) => value.as_ref(),
            Member::Method(_) => None,
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Value(None) => f.write_str("Value(unset)"),
            Member::Value(Some(_)) => f.write_str("Value(..)"),
            Member::Method(method) => f.debug_tuple("Method").field(method).finish(),
        }
    }
}

/// Explicit descriptor of an object being assembled by a container.
#[derive(Clone, Default)]
pub struct Component {
    members: Vec<(String, Member)>,
    host_node: bool,
}

impl Component {
    /// Creates an empty plain component.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a component.
    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::default()
    }

    /// Own member names in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(name, _)| name.as_str())
    }

    /// Own members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(name, member)| (name.as_str(), member))
    }

    /// Number of declared members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if no members are declared.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Looks up a member by name.
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|(member_name, _)| member_name == name)
            .map(|(_, member)| member)
    }

    /// Current value of a property, if set.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Member::as_value)
    }

    /// Downcasts a property value to a concrete type.
    pub fn value_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.value(name).and_then(|v| v.downcast_ref::<T>())
    }

    /// Looks up a method by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.get(name).and_then(Member::as_method)
    }

    /// Replaces a member in place, or appends it if the name is new.
    pub fn set(&mut self, name: &str, member: Member) {
        match self.members.iter_mut().find(|(member_name, _)| member_name == name) {
            Some((_, slot)) => *slot = member,
            None => self.members.push((name.to_string(), member)),
        }
    }

    /// Whether this component stands for a host-environment node.
    ///
    /// True when explicitly marked, or when the component structurally
    /// carries a numeric `nodeType` and a string `nodeName`.
    pub fn is_host_node(&self) -> bool {
        self.host_node || (self.has_numeric("nodeType") && self.has_string("nodeName"))
    }

    fn has_numeric(&self, name: &str) -> bool {
        let Some(v) = self.value(name) else {
            return false;
        };
        v.is::<u8>()
            || v.is::<u16>()
            || v.is::<u32>()
            || v.is::<u64>()
            || v.is::<u128>()
            || v.is::<usize>()
            || v.is::<i8>()
            || v.is::<i16>()
            || v.is::<i32>()
            || v.is::<i64>()
            || v.is::<i128>()
            || v.is::<isize>()
            || v.is::<f32>()
            || v.is::<f64>()
    }

    fn has_string(&self, name: &str) -> bool {
        self.value(name)
            .is_some_and(|v| v.is::<String>() || v.is::<&'static str>())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("members", &self.members)
            .field("host_node", &self.host_node)
            .finish()
    }
}

/// Fluent builder for [`Component`].
///
/// ```rust
/// use ferrous_autowire::{value, Component, Method};
///
/// let component = Component::builder()
///     .unset("logger")
///     .value("port", value(8080u16))
///     .method("greet", Method::from_signature("fn greet(name)", |_| None))
///     .build();
///
/// let names: Vec<_> = component.member_names().collect();
/// assert_eq!(names, ["logger", "port", "greet"]);
/// ```
#[derive(Default)]
pub struct ComponentBuilder {
    component: Component,
}

impl ComponentBuilder {
    /// Declares a property holding a value.
    pub fn value(mut self, name: &str, value: Value) -> Self {
        self.component.set(name, Member::Value(Some(value)));
        self
    }

    /// Declares a property without a value.
    pub fn unset(mut self, name: &str) -> Self {
        self.component.set(name, Member::Value(None));
        self
    }

    /// Declares a method.
    pub fn method(mut self, name: &str, method: Method) -> Self {
        self.component.set(name, Member::Method(method));
        self
    }

    /// Marks the component as a host-environment node.
    pub fn host_node(mut self) -> Self {
        self.component.host_node = true;
        self
    }

    /// Finishes the component.
    pub fn build(self) -> Component {
        self.component
    }
}

/// Shared handle to a component under configuration.
///
/// All reads and writes go through the proxy so a container can observe
/// them. Locks are held only for the duration of a single accessor call.
#[derive(Clone, Default)]
pub struct ComponentProxy {
    inner: Arc<RwLock<Component>>,
}

impl ComponentProxy {
    /// Wraps a component.
    pub fn new(component: Component) -> Self {
        Self {
            inner: Arc::new(RwLock::new(component)),
        }
    }

    /// Read access to the underlying component.
    ///
    /// The guard must be dropped before calling any mutating proxy method;
    /// use [`snapshot`](Self::snapshot) when foreign code runs meanwhile.
    pub fn target(&self) -> RwLockReadGuard<'_, Component> {
        self.inner.read()
    }

    /// Clones the current state of the component.
    pub fn snapshot(&self) -> Component {
        self.inner.read().clone()
    }

    /// Clones a member out of the component.
    pub fn get(&self, name: &str) -> Option<Member> {
        self.inner.read().get(name).cloned()
    }

    /// Assigns a property value.
    pub fn set(&self, name: &str, value: Option<Value>) {
        self.set_member(name, Member::Value(value));
    }

    /// Replaces a member.
    pub fn set_member(&self, name: &str, member: Member) {
        self.inner.write().set(name, member);
    }

    /// Own member names in declaration order.
    pub fn member_names(&self) -> Vec<String> {
        self.inner.read().member_names().map(str::to_string).collect()
    }

    /// Whether the wrapped component is a host-environment node.
    pub fn is_host_node(&self) -> bool {
        self.inner.read().is_host_node()
    }

    /// Invokes a method with the given arguments.
    ///
    /// The method is cloned out before the call, so it may freely use the
    /// proxy itself.
    pub fn call(&self, name: &str, args: Args) -> AutowireResult<Option<Value>> {
        let method = match self.get(name) {
            Some(Member::Method(method)) => method,
            Some(Member::Value(_)) => return Err(AutowireError::NotAMethod(name.to_string())),
            None => return Err(AutowireError::MissingMember(name.to_string())),
        };
        Ok(method.call(args))
    }
}

impl fmt::Debug for ComponentProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentProxy").field(&*self.inner.read()).finish()
    }
}
