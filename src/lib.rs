//! # ferrous-autowire
//!
//! Name-based autowiring for dependency injection containers.
//!
//! ## Features
//!
//! - **Property autowiring**: members whose names match a resolvable reference are assigned the resolved value
//! - **Parameter autowiring**: resolved references are spliced into method calls at their declared positions
//! - **Concurrent resolution**: every candidate in a pass is resolved concurrently and awaited before the pass settles
//! - **Failure policy**: unresolved candidates are skipped by default, or fail the pass when requested
//! - **Non-invasive**: methods are wrapped with around-advice, the original stays recoverable
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_autowire::{
//!     autowire_plugin, value, Component, ComponentProxy, ConfigureOutcome, Method, References,
//!     WireContext, WirePlugin,
//! };
//!
//! # futures::executor::block_on(async {
//! let greet = Method::from_signature("fn greet(name, greeting)", |args| {
//!     let name = args[0].downcast_ref::<String>().unwrap();
//!     let greeting = args[1].downcast_ref::<String>().unwrap();
//!     Some(value(format!("{greeting}, {name}!")))
//! });
//!
//! let proxy = ComponentProxy::new(
//!     Component::builder()
//!         .unset("greeting")
//!         .method("greet", greet)
//!         .build(),
//! );
//! let refs = References::new().with("greeting", value("Hello".to_string()));
//!
//! // The container runs the plugin before it finishes configuring the component.
//! let (outcome, pending) = ConfigureOutcome::channel();
//! autowire_plugin().configure_before(outcome, proxy.clone(), WireContext::new(refs));
//! pending.settled().await.unwrap();
//!
//! // `greeting` was resolved as a property and as a parameter.
//! assert_eq!(proxy.target().value_as::<String>("greeting").unwrap(), "Hello");
//! let result = proxy.call("greet", vec![value("Ann".to_string())]).unwrap().unwrap();
//! assert_eq!(result.downcast_ref::<String>().unwrap(), "Hello, Ann!");
//! # });
//! ```
//!
//! Parameter indices refer to the declared list, so the real argument
//! `"Ann"` lands in slot 0 and the injected `greeting` is inserted at slot 1.
//!
//! ## Failure Policy
//!
//! ```rust
//! use ferrous_autowire::{autowire_properties, AutowireError, AutowireOptions, Component, ComponentProxy, References};
//!
//! # futures::executor::block_on(async {
//! let proxy = ComponentProxy::new(Component::builder().unset("bar").build());
//! let refs = References::new();
//!
//! // Default: unresolved names are skipped.
//! autowire_properties(&refs, &AutowireOptions::new(), &proxy).await.unwrap();
//!
//! // fail_fast: the pass fails after every candidate settled.
//! let err = autowire_properties(&refs, &AutowireOptions::new().fail_fast(), &proxy)
//!     .await
//!     .unwrap_err();
//! assert_eq!(err, AutowireError::Unresolved("bar".to_string()));
//! # });
//! ```

// Module declarations
pub mod advice;
pub mod autowire;
pub mod component;
pub mod error;
pub mod method;
pub mod options;
pub mod params;
pub mod plugin;
pub mod traits;

// Re-export core types
pub use advice::{advise, around, Advice, Advisor, JoinPoint};
pub use autowire::{
    autowire_method_params, autowire_parameters, autowire_properties, splice_args, InjectedArg,
    ParameterInjector,
};
pub use component::{value, Component, ComponentBuilder, ComponentProxy, Member, Value};
pub use error::{AutowireError, AutowireResult};
pub use method::{Args, Method, MethodFn, ParamSource};
pub use options::{AutowireOptions, AutowireSettings, Filter, FAIL_ENV_VAR};
pub use params::{parse_params, parse_signature};
pub use plugin::{
    autowire_plugin, AutowirePlugin, ConfigureOutcome, ConfigureTask, PendingConfigure,
    WireContext, WirePlugin,
};
pub use traits::{ReferenceResolver, References};
