//! Unit tests for container resolution and visibility rules

use http_module::client::{ClientRequestConfig, HttpModuleOptions, HttpService};
use http_module::constants::DEFAULT_SERVICE_NAME;
use http_module::di::{ContainerBuilder, DynamicModule, HttpModule, Provider};
use http_module::error::{BoxError, Error};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn test_value_provider_resolves_from_root() {
    let container = ContainerBuilder::new()
        .provider(Provider::value("GREETING", "hello".to_string()))
        .build()
        .await
        .expect("container");

    let greeting = container.get::<String>("GREETING").expect("resolve");
    assert_eq!(greeting.as_str(), "hello");
    assert!(container.contains("GREETING"));
    assert_eq!(container.tokens(), vec!["GREETING"]);
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let container = ContainerBuilder::new().build().await.expect("container");

    let result = container.get::<HttpService>("Missing");
    assert!(matches!(result, Err(Error::ProviderNotFound { token }) if token == "Missing"));
}

#[tokio::test]
async fn test_wrong_type_is_a_mismatch() {
    let container = ContainerBuilder::new()
        .provider(Provider::value("PORT", 8080_u16))
        .build()
        .await
        .expect("container");

    let result = container.get::<String>("PORT");
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}

#[tokio::test]
async fn test_unexported_provider_is_hidden() {
    let private = DynamicModule::new("Private").provider(Provider::value("SECRET", 1_u32));

    let container = ContainerBuilder::new()
        .import(private)
        .build()
        .await
        .expect("container");

    assert!(!container.contains("SECRET"));
}

#[tokio::test]
async fn test_nested_export_needs_reexport() {
    let inner = DynamicModule::new("Inner").provide_and_export(Provider::value("VALUE", 7_i32));

    let without = ContainerBuilder::new()
        .import(DynamicModule::new("Outer").import(inner.clone()))
        .build()
        .await
        .expect("container");
    assert!(!without.contains("VALUE"));

    let with = ContainerBuilder::new()
        .import(DynamicModule::new("Outer").import(inner).export("VALUE"))
        .build()
        .await
        .expect("container");
    assert_eq!(*with.get::<i32>("VALUE").expect("resolve"), 7);
}

#[tokio::test]
async fn test_global_module_is_visible_to_factories_everywhere() {
    let root = HttpModule::for_root(HttpModuleOptions::new(
        ClientRequestConfig::new().with_base_url("http://test.com"),
    ))
    .expect("root module");

    let consumer = DynamicModule::new("Consumer").provide_and_export(Provider::factory(
        "BASE",
        vec![DEFAULT_SERVICE_NAME.to_string()],
        |deps| async move {
            let http = deps
                .get::<HttpService>(DEFAULT_SERVICE_NAME)
                .ok_or("HttpService missing")?;
            Ok::<_, BoxError>(http.base_url().unwrap_or_default().to_string())
        },
    ));

    // Consumer does not import the root module; visibility comes from `global`.
    let container = ContainerBuilder::new()
        .import(consumer)
        .import(root)
        .build()
        .await
        .expect("container");

    assert_eq!(
        container.get::<String>("BASE").expect("resolve").as_str(),
        "http://test.com"
    );
}

#[tokio::test]
async fn test_factory_runs_once_after_its_dependencies() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    // Registered before its dependency to exercise ordering.
    let container = ContainerBuilder::new()
        .provider(Provider::factory(
            "DOUBLED",
            vec!["BASE".to_string()],
            move |deps| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    let base = deps.at::<u32>(0).ok_or("BASE missing")?;
                    Ok::<_, BoxError>(*base * 2)
                }
            },
        ))
        .provider(Provider::value("BASE", 21_u32))
        .build()
        .await
        .expect("container");

    let first = container.get::<u32>("DOUBLED").expect("resolve");
    let second = container.get::<u32>("DOUBLED").expect("resolve");

    assert_eq!(*first, 42);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_dependency_fails_build() {
    let result = ContainerBuilder::new()
        .provider(Provider::factory(
            "NEEDY",
            vec!["ABSENT".to_string()],
            |_deps| async { Ok::<_, BoxError>(()) },
        ))
        .build()
        .await;

    match result {
        Err(Error::MissingDependency { token, dependency }) => {
            assert_eq!(token, "NEEDY");
            assert_eq!(dependency, "ABSENT");
        }
        other => panic!("expected missing dependency, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dependency_cycle_fails_build() {
    let result = ContainerBuilder::new()
        .provider(Provider::factory("A", vec!["B".to_string()], |_deps| async {
            Ok::<_, BoxError>(1_u8)
        }))
        .provider(Provider::factory("B", vec!["A".to_string()], |_deps| async {
            Ok::<_, BoxError>(2_u8)
        }))
        .build()
        .await;

    match result {
        Err(Error::UnresolvableDependencies { mut tokens }) => {
            tokens.sort();
            assert_eq!(tokens, vec!["A".to_string(), "B".to_string()]);
        }
        other => panic!("expected unresolvable dependencies, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failing_factory_fails_build() {
    let result = ContainerBuilder::new()
        .provider(Provider::factory("BROKEN", Vec::new(), |_deps| async {
            Err::<u8, BoxError>("settings unavailable".into())
        }))
        .build()
        .await;

    match result {
        Err(Error::FactoryFailed { token, source }) => {
            assert_eq!(token, "BROKEN");
            assert_eq!(source.to_string(), "settings unavailable");
        }
        other => panic!("expected factory failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_later_registration_wins() {
    let container = ContainerBuilder::new()
        .provider(Provider::value("NAME", "first".to_string()))
        .provider(Provider::value("NAME", "second".to_string()))
        .build()
        .await
        .expect("container");

    assert_eq!(container.get::<String>("NAME").expect("resolve").as_str(), "second");
}

#[tokio::test]
async fn test_sibling_exports_are_not_visible_without_import() {
    let http = HttpModule::for_feature(HttpModuleOptions::default()).expect("module");
    let consumer = DynamicModule::new("Consumer").provider(Provider::factory(
        "CONSUMER",
        vec![DEFAULT_SERVICE_NAME.to_string()],
        |_deps| async { Ok::<_, BoxError>(()) },
    ));

    let result = ContainerBuilder::new()
        .import(http)
        .import(consumer)
        .build()
        .await;

    assert!(matches!(
        result,
        Err(Error::MissingDependency { token, .. }) if token == "CONSUMER"
    ));
}
