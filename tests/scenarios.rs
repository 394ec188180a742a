use ferrous_autowire::{
    autowire_method_params, autowire_parameters, autowire_plugin, autowire_properties, value,
    AutowireError, AutowireOptions, AutowirePlugin, Component, ComponentProxy, ConfigureOutcome,
    Method, References, Value, WireContext, WirePlugin,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Calls = Arc<Mutex<Vec<Vec<Value>>>>;

fn recording_method(signature: &str, calls: Calls) -> Method {
    Method::from_signature(signature, move |args| {
        calls.lock().unwrap().push(args);
        None
    })
}

fn strs(args: &[Value]) -> Vec<&str> {
    args.iter().map(|v| v.downcast_ref::<String>().unwrap().as_str()).collect()
}

async fn configure(plugin: &AutowirePlugin, proxy: &ComponentProxy, refs: References) -> Result<(), AutowireError> {
    let (outcome, pending) = ConfigureOutcome::channel();
    plugin.configure_before(outcome, proxy.clone(), WireContext::new(refs));
    pending.settled().await
}

#[tokio::test]
async fn test_resolved_property_is_assigned() {
    let proxy = ComponentProxy::new(Component::builder().unset("foo").build());
    let refs = References::new().with("foo", value(42i32));

    configure(&autowire_plugin(), &proxy, refs).await.unwrap();

    assert_eq!(proxy.target().value_as::<i32>("foo"), Some(&42));
}

#[tokio::test]
async fn test_unresolved_property_is_left_alone() {
    let proxy = ComponentProxy::new(Component::builder().unset("bar").build());

    configure(&autowire_plugin(), &proxy, References::new()).await.unwrap();

    assert!(proxy.target().value("bar").is_none());
}

#[tokio::test]
async fn test_unresolved_property_fails_when_requested() {
    let proxy = ComponentProxy::new(Component::builder().unset("bar").build());
    let plugin = AutowirePlugin::with_options(AutowireOptions::new().fail_fast());

    let err = configure(&plugin, &proxy, References::new()).await.unwrap_err();

    assert_eq!(err, AutowireError::Unresolved("bar".to_string()));
}

#[tokio::test]
async fn test_existing_value_kept_on_failure() {
    let proxy = ComponentProxy::new(
        Component::builder()
            .value("bar", value("original".to_string()))
            .build(),
    );

    autowire_properties(&References::new(), &AutowireOptions::new(), &proxy)
        .await
        .unwrap();

    assert_eq!(proxy.target().value_as::<String>("bar").unwrap(), "original");
}

#[tokio::test]
async fn test_injected_params_keep_declared_positions() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .method("greet", recording_method("function greet(name, age, city) {}", calls.clone()))
            .build(),
    );
    let refs = References::new()
        .with("name", value("Ann".to_string()))
        .with("age", value("40".to_string()))
        .with("city", value("NYC".to_string()));
    let options = AutowireOptions::new().with_param_filter(|_, name| name != "age");

    autowire_parameters(&refs, &options, &proxy).await.unwrap();
    proxy.call("greet", vec![value("extra".to_string())]).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(strs(&calls[0]), ["Ann", "extra", "NYC"]);
}

#[tokio::test]
async fn test_host_node_is_skipped() {
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = requests.clone();
    let resolver = move |name: String| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, AutowireError>(value(name)) }
    };

    let calls: Calls = Default::default();
    let greet = recording_method("fn greet(name)", calls);
    let proxy = ComponentProxy::new(
        Component::builder()
            .value("nodeType", value(1u32))
            .value("nodeName", value("DIV".to_string()))
            .unset("foo")
            .method("greet", greet.clone())
            .build(),
    );

    let (outcome, pending) = ConfigureOutcome::channel();
    autowire_plugin().configure_before(outcome, proxy.clone(), WireContext::new(resolver));
    pending.settled().await.unwrap();

    assert_eq!(requests.load(Ordering::SeqCst), 0);
    let target = proxy.target();
    assert!(target.value("foo").is_none());
    assert!(target.method("greet").unwrap().ptr_eq(&greet));
}

#[tokio::test]
async fn test_marked_host_node_is_skipped() {
    let proxy = ComponentProxy::new(Component::builder().unset("foo").host_node().build());
    let refs = References::new().with("foo", value(1i32));
    let options = AutowireOptions::new().fail_fast();

    autowire_properties(&refs, &options, &proxy).await.unwrap();
    autowire_parameters(&refs, &options, &proxy).await.unwrap();

    assert!(proxy.target().value("foo").is_none());
}

#[tokio::test]
async fn test_method_without_params_is_not_advised() {
    let calls: Calls = Default::default();
    let tick = recording_method("fn tick()", calls.clone());
    let proxy = ComponentProxy::new(Component::builder().method("tick", tick.clone()).build());

    autowire_parameters(&References::new(), &AutowireOptions::new(), &proxy)
        .await
        .unwrap();

    let member = proxy.get("tick").unwrap();
    let current = member.as_method().unwrap();
    assert!(!current.is_advised());
    assert!(current.ptr_eq(&tick));

    proxy.call("tick", vec![value("x".to_string())]).unwrap();
    assert_eq!(strs(&calls.lock().unwrap()[0]), ["x"]);
}

#[tokio::test]
async fn test_all_params_filtered_is_not_advised() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .method("greet", recording_method("fn greet(name)", calls))
            .build(),
    );
    let refs = References::new().with("name", value("Ann".to_string()));
    let options = AutowireOptions::new().with_param_filter(|_, _| false);

    autowire_method_params(&refs, &options, &proxy, "greet").await.unwrap();

    assert!(!proxy.target().method("greet").unwrap().is_advised());
}

#[tokio::test]
async fn test_no_resolved_params_is_not_advised() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .method("greet", recording_method("fn greet(name, city)", calls))
            .build(),
    );

    autowire_method_params(&References::new(), &AutowireOptions::new(), &proxy, "greet")
        .await
        .unwrap();

    assert!(!proxy.target().method("greet").unwrap().is_advised());
}

#[tokio::test]
async fn test_failed_param_blocks_advice_when_requested() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .method("greet", recording_method("fn greet(name, city)", calls))
            .build(),
    );
    let refs = References::new().with("name", value("Ann".to_string()));

    let err = autowire_method_params(&refs, &AutowireOptions::new().fail_fast(), &proxy, "greet")
        .await
        .unwrap_err();

    assert_eq!(err, AutowireError::Unresolved("city".to_string()));
    assert!(!proxy.target().method("greet").unwrap().is_advised());
}

#[tokio::test]
async fn test_method_params_on_non_method() {
    let proxy = ComponentProxy::new(Component::builder().unset("port").build());
    let refs = References::new();

    let err = autowire_method_params(&refs, &AutowireOptions::new(), &proxy, "port")
        .await
        .unwrap_err();
    assert_eq!(err, AutowireError::NotAMethod("port".to_string()));

    let err = autowire_method_params(&refs, &AutowireOptions::new(), &proxy, "missing")
        .await
        .unwrap_err();
    assert_eq!(err, AutowireError::MissingMember("missing".to_string()));
}

#[tokio::test]
async fn test_member_filter_applies_to_methods() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .method("greet", recording_method("fn greet(name)", calls.clone()))
            .method("skip", recording_method("fn skip(name)", calls))
            .build(),
    );
    let refs = References::new().with("name", value("Ann".to_string()));
    let options = AutowireOptions::new().with_filter(|_, name| name != "skip");

    autowire_parameters(&refs, &options, &proxy).await.unwrap();

    let target = proxy.target();
    assert!(target.method("greet").unwrap().is_advised());
    assert!(!target.method("skip").unwrap().is_advised());
}

#[tokio::test]
async fn test_rewiring_reads_original_signature() {
    let calls: Calls = Default::default();
    let original = recording_method("fn greet(name, city)", calls.clone());
    let proxy = ComponentProxy::new(Component::builder().method("greet", original.clone()).build());
    let refs = References::new()
        .with("name", value("Ann".to_string()))
        .with("city", value("NYC".to_string()));

    autowire_parameters(&refs, &AutowireOptions::new(), &proxy).await.unwrap();
    autowire_parameters(&refs, &AutowireOptions::new(), &proxy).await.unwrap();

    let member = proxy.get("greet").unwrap();
    let wrapped = member.as_method().unwrap();
    assert!(wrapped.advisor().unwrap().original().is_advised());
    assert!(wrapped.unadvised().ptr_eq(&original));

    // Both layers inject: re-wiring is not idempotent.
    proxy.call("greet", vec![]).unwrap();
    assert_eq!(strs(&calls.lock().unwrap()[0]), ["Ann", "NYC", "Ann", "NYC"]);
}

#[tokio::test]
async fn test_every_candidate_settles_before_failure() {
    let resolver = |name: String| async move {
        match name.as_str() {
            "slow" => {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(value(7i32))
            }
            _ => Err(AutowireError::Unresolved(name.clone())),
        }
    };
    let proxy = ComponentProxy::new(Component::builder().unset("fast").unset("slow").build());

    let err = autowire_properties(&resolver, &AutowireOptions::new().fail_fast(), &proxy)
        .await
        .unwrap_err();

    assert_eq!(err, AutowireError::Unresolved("fast".to_string()));
    assert_eq!(proxy.target().value_as::<i32>("slow"), Some(&7));
}

#[tokio::test]
async fn test_candidates_resolve_concurrently() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (flight, high) = (in_flight.clone(), peak.clone());
    let resolver = move |name: String| {
        let (flight, high) = (flight.clone(), high.clone());
        async move {
            let now = flight.fetch_add(1, Ordering::SeqCst) + 1;
            high.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            flight.fetch_sub(1, Ordering::SeqCst);
            Ok::<_, AutowireError>(value(name))
        }
    };
    let proxy = ComponentProxy::new(
        Component::builder()
            .unset("a")
            .unset("b")
            .unset("c")
            .build(),
    );

    autowire_properties(&resolver, &AutowireOptions::new(), &proxy).await.unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 3);
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    assert_eq!(proxy.target().value_as::<String>("c").unwrap(), "c");
}

#[tokio::test]
async fn test_method_replaced_by_resolved_property() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .method("greet", recording_method("fn greet(name)", calls))
            .build(),
    );
    let refs = References::new().with("greet", value("hi".to_string()));

    configure(&autowire_plugin(), &proxy, refs).await.unwrap();

    assert_eq!(proxy.target().value_as::<String>("greet").unwrap(), "hi");
    assert_eq!(
        proxy.call("greet", vec![]).unwrap_err(),
        AutowireError::NotAMethod("greet".to_string())
    );
}

#[tokio::test]
async fn test_every_method_attempted_before_failure() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .method("broken", recording_method("fn broken(missing)", calls.clone()))
            .method("greet", recording_method("fn greet(name)", calls.clone()))
            .build(),
    );
    let refs = References::new().with("name", value("Ann".to_string()));

    let err = autowire_parameters(&refs, &AutowireOptions::new().fail_fast(), &proxy)
        .await
        .unwrap_err();

    assert_eq!(err, AutowireError::Unresolved("missing".to_string()));
    let target = proxy.target();
    assert!(!target.method("broken").unwrap().is_advised());
    assert!(target.method("greet").unwrap().is_advised());
    drop(target);

    proxy.call("greet", vec![]).unwrap();
    assert_eq!(strs(&calls.lock().unwrap()[0]), ["Ann"]);
}

#[tokio::test]
async fn test_failed_properties_skip_parameter_pass() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .unset("missing")
            .method("greet", recording_method("fn greet(name)", calls))
            .build(),
    );
    let refs = References::new().with("name", value("Ann".to_string()));
    let plugin = AutowirePlugin::with_options(AutowireOptions::new().fail_fast());

    let err = configure(&plugin, &proxy, refs).await.unwrap_err();

    assert_eq!(err, AutowireError::Unresolved("missing".to_string()));
    assert!(!proxy.target().method("greet").unwrap().is_advised());
}

#[tokio::test]
async fn test_filters_may_write_through_proxy() {
    let calls: Calls = Default::default();
    let proxy = ComponentProxy::new(
        Component::builder()
            .unset("port")
            .method("greet", recording_method("fn greet(name)", calls))
            .build(),
    );
    let (members, params) = (proxy.clone(), proxy.clone());
    let options = AutowireOptions::new()
        .with_filter(move |_, name| {
            members.set("last_member", Some(value(name.to_string())));
            name != "last_member" && name != "last_param"
        })
        .with_param_filter(move |_, name| {
            params.set("last_param", Some(value(name.to_string())));
            true
        });
    let refs = References::new()
        .with("port", value(8080u16))
        .with("name", value("Ann".to_string()));

    autowire_properties(&refs, &options, &proxy).await.unwrap();
    autowire_parameters(&refs, &options, &proxy).await.unwrap();

    let target = proxy.target();
    assert_eq!(target.value_as::<u16>("port"), Some(&8080));
    assert_eq!(target.value_as::<String>("last_param").unwrap(), "name");
    assert!(target.method("greet").unwrap().is_advised());
}
