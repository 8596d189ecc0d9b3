//! 容器集成测试
//!
//! 组件通过标记宏声明并在启动时自动登记，测试从全局类型目录开始走完整条初始化流程。

use di_abstractions::{
    ComponentRegistry, ContainerConfig, DependencyInjector, DispatchOutcome, InitReport, InitWarning,
    RequestDispatcher, RouteBuilder, TypeCatalog,
};
use di_impl::{ComponentRegistrar, ControllerRouteBuilder, Dispatcher, FieldInjector, GlobalTypeCatalog};
use std::sync::Arc;
use xmvc_common::{type_identifier, ComponentError, DependencyError, RouteError, SimpleRequest, TextResponse};

mod library {
    use component_macros::{controller, routes, service};
    use xmvc_common::{Autowired, Request, Response};

    pub trait Catalog: Send + Sync {
        fn title(&self, id: i64) -> String;
    }

    #[service(provides(Catalog))]
    #[derive(Debug, Default)]
    pub struct BookCatalog;

    impl Catalog for BookCatalog {
        fn title(&self, id: i64) -> String {
            format!("book-{}", id)
        }
    }

    #[service(name = "shelf")]
    #[derive(Debug, Default)]
    pub struct Shelf {
        #[autowired]
        pub catalog: Autowired<dyn Catalog>,
        #[autowired("shelf")]
        pub me: Autowired<Shelf>,
    }

    #[service(name = "archive")]
    #[derive(Debug, Default)]
    pub struct Archive {
        #[autowired("counter")]
        pub counter: Autowired<Counter>,
    }

    #[service(name = "counter")]
    #[derive(Debug, Default)]
    pub struct Counter {
        #[autowired("archive")]
        pub archive: Autowired<Archive>,
    }

    #[controller]
    #[request_mapping("/library/")]
    #[derive(Debug, Default)]
    pub struct LibraryController {
        #[autowired("shelf")]
        shelf: Autowired<Shelf>,
    }

    #[routes]
    impl LibraryController {
        #[request_mapping("/book")]
        fn book(&self, resp: &mut dyn Response, #[request_param("id")] id: i64) -> anyhow::Result<()> {
            let catalog = self.shelf.require()?.catalog.require()?;
            resp.write(&catalog.title(id))?;
            Ok(())
        }

        #[request_mapping("page")]
        fn page(
            &self,
            req: &dyn Request,
            resp: &mut dyn Response,
            #[request_param("count")] count: i32,
        ) -> anyhow::Result<()> {
            let all = req.parameter_values("count").map_or(0, <[String]>::len);
            resp.write(&format!("count={} values={}", count, all))?;
            Ok(())
        }

        #[request_mapping("/boom")]
        fn boom(&self) {
            panic!("shelf collapsed");
        }

        #[allow(dead_code)]
        fn helper(&self) -> usize {
            0
        }
    }
}

mod collide {
    use component_macros::service;

    #[service(name = "repo")]
    #[derive(Debug, Default)]
    pub struct AlphaRepo;

    #[service(name = "repo")]
    #[derive(Debug, Default)]
    pub struct BetaRepo;
}

mod clash {
    use component_macros::{controller, routes};
    use xmvc_common::Response;

    #[controller]
    #[derive(Debug, Default)]
    pub struct FirstController;

    #[routes]
    impl FirstController {
        #[request_mapping("/same")]
        fn same(&self, resp: &mut dyn Response) -> std::io::Result<()> {
            resp.write("first")
        }
    }

    #[controller]
    #[derive(Debug, Default)]
    pub struct SecondController;

    #[routes]
    impl SecondController {
        #[request_mapping("//same")]
        fn same(&self, resp: &mut dyn Response) -> std::io::Result<()> {
            resp.write("second")
        }
    }
}

mod clocks {
    use component_macros::{component, service};
    use xmvc_common::Autowired;

    pub trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }

    #[service(provides(Clock))]
    #[derive(Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> u64 {
            1
        }
    }

    #[service(name = "custom", provides(Clock))]
    #[derive(Debug, Default)]
    pub struct ManualClock;

    impl Clock for ManualClock {
        fn now(&self) -> u64 {
            2
        }
    }

    #[component]
    #[derive(Debug, Default)]
    pub struct Scheduler {
        #[autowired("custom")]
        pub pinned: Autowired<dyn Clock>,
        #[autowired]
        pub fallback: Autowired<dyn Clock>,
    }
}

mod dangling {
    use component_macros::service;
    use xmvc_common::Autowired;

    #[service(name = "orphan")]
    #[derive(Debug, Default)]
    pub struct Orphan {
        #[autowired("nobody")]
        pub missing: Autowired<Orphan>,
    }
}

fn boot(namespace: &str, config: ContainerConfig) -> Result<(Dispatcher, InitReport), anyhow::Error> {
    let mut report = InitReport::new();
    let descriptors = GlobalTypeCatalog::new().scan(namespace)?;
    let container = ComponentRegistrar::new(config.clone()).register_all(descriptors, &mut report)?;
    FieldInjector::new(config.clone()).inject_all(&container, &mut report)?;
    let routes = ControllerRouteBuilder::new(config).build(&container, &mut report)?;
    Ok((Dispatcher::new(Arc::new(container), Arc::new(routes)), report))
}

fn call(dispatcher: &Dispatcher, uri: &str) -> (DispatchOutcome, String) {
    let mut response = TextResponse::new();
    let outcome = dispatcher.dispatch(&SimpleRequest::from_uri(uri), &mut response);
    (outcome, response.into_body())
}

#[test]
fn test_macro_declared_components_are_discovered() {
    let descriptors = GlobalTypeCatalog::new().scan("integration_test.library").unwrap();
    let names: Vec<_> = descriptors.iter().map(|d| d.simple_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Archive", "BookCatalog", "Counter", "LibraryController", "Shelf"]
    );

    assert!(matches!(
        GlobalTypeCatalog::new().scan("integration_test.nowhere"),
        Err(ComponentError::NamespaceNotFound { .. })
    ));
}

#[test]
fn test_routes_and_dispatch() {
    let (dispatcher, report) = boot("integration_test.library", ContainerConfig::default()).unwrap();
    assert!(report.is_clean(), "{:?}", report.warnings());
    assert_eq!(
        dispatcher.routes().paths().collect::<Vec<_>>(),
        vec!["/library/book", "/library/boom", "/library/page"]
    );

    assert_eq!(
        call(&dispatcher, "/library/book?id=7"),
        (DispatchOutcome::Completed, "book-7".to_string())
    );
    assert_eq!(
        call(&dispatcher, "/library/page?count=2&count=9"),
        (DispatchOutcome::Completed, "count=2 values=2".to_string())
    );
    assert_eq!(
        call(&dispatcher, "/library/helper"),
        (DispatchOutcome::NotFound, "404 Not Found!".to_string())
    );
}

#[test]
fn test_failures_stay_inside_the_request() {
    let (dispatcher, _) = boot("integration_test.library", ContainerConfig::default()).unwrap();

    let (outcome, body) = call(&dispatcher, "/library/page?count=abc");
    assert_eq!(outcome, DispatchOutcome::Failed);
    assert!(body.starts_with("500 Exception Detail:\n"));
    assert!(body.contains("count"));

    let (outcome, body) = call(&dispatcher, "/library/page");
    assert_eq!(outcome, DispatchOutcome::Failed);
    assert!(body.contains("count"));

    let (outcome, body) = call(&dispatcher, "/library/boom");
    assert_eq!(outcome, DispatchOutcome::Failed);
    assert!(body.contains("shelf collapsed"));

    assert_eq!(call(&dispatcher, "/library/book?id=1").0, DispatchOutcome::Completed);
}

#[test]
fn test_injection_by_name_by_type_and_cycles() {
    let mut report = InitReport::new();
    let descriptors = GlobalTypeCatalog::new().scan("integration_test.library").unwrap();
    let container = ComponentRegistrar::default().register_all(descriptors, &mut report).unwrap();
    let summary = FieldInjector::default().inject_all(&container, &mut report).unwrap();
    assert_eq!(summary.unresolved, 0);
    assert_eq!(summary.injected, 5);

    let catalog_name = type_identifier::<dyn library::Catalog>();
    assert!(container.contains(&catalog_name));
    assert!(container.contains("libraryController"));

    let shelf = container.resolve::<library::Shelf>("shelf").unwrap();
    assert_eq!(shelf.catalog.require().unwrap().title(3), "book-3");
    assert!(Arc::ptr_eq(&shelf.me.require().unwrap(), &shelf));

    let archive = container.resolve::<library::Archive>("archive").unwrap();
    let counter = container.resolve::<library::Counter>("counter").unwrap();
    assert!(Arc::ptr_eq(&archive.counter.require().unwrap(), &counter));
    assert!(Arc::ptr_eq(&counter.archive.require().unwrap(), &archive));
}

#[test]
fn test_explicit_target_wins_over_type_identifier() {
    let mut report = InitReport::new();
    let descriptors = GlobalTypeCatalog::new().scan("integration_test.clocks").unwrap();
    let container = ComponentRegistrar::default().register_all(descriptors, &mut report).unwrap();
    FieldInjector::default().inject_all(&container, &mut report).unwrap();
    assert!(report.is_clean(), "{:?}", report.warnings());

    let by_type = container
        .resolve::<dyn clocks::Clock>(&type_identifier::<dyn clocks::Clock>())
        .unwrap();
    let custom = container.resolve::<dyn clocks::Clock>("custom").unwrap();
    let scheduler = container.resolve::<clocks::Scheduler>("scheduler").unwrap();

    let pinned = scheduler.pinned.require().unwrap();
    assert!(Arc::ptr_eq(&pinned, &custom));
    assert!(!Arc::ptr_eq(&pinned, &by_type));
    assert_eq!(pinned.now(), 2);

    let fallback = scheduler.fallback.require().unwrap();
    assert!(Arc::ptr_eq(&fallback, &by_type));
    assert_eq!(fallback.now(), 1);
}

#[test]
fn test_name_collision_last_wins_or_fails() {
    let mut report = InitReport::new();
    let descriptors = GlobalTypeCatalog::new().scan("integration_test.collide").unwrap();
    let container = ComponentRegistrar::default().register_all(descriptors, &mut report).unwrap();

    assert_eq!(container.len(), 1);
    assert_eq!(container.distinct_instances(), 1);
    assert!(container.resolve::<collide::BetaRepo>("repo").is_some());
    assert!(matches!(report.warnings(), [InitWarning::NameCollision { name, .. }] if name == "repo"));

    let descriptors = GlobalTypeCatalog::new().scan("integration_test.collide").unwrap();
    let strict = ComponentRegistrar::new(ContainerConfig::strict()).register_all(descriptors, &mut InitReport::new());
    assert!(matches!(strict, Err(ComponentError::NameCollision { .. })));
}

#[test]
fn test_route_collision_keeps_one_handler() {
    let (dispatcher, report) = boot("integration_test.clash", ContainerConfig::default()).unwrap();
    assert_eq!(dispatcher.routes().len(), 1);
    assert!(matches!(report.warnings(), [InitWarning::RouteCollision { path, .. }] if path == "/same"));

    let (outcome, body) = call(&dispatcher, "/same");
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert!(body == "first" || body == "second");

    let strict = boot("integration_test.clash", ContainerConfig::strict());
    let err = strict.err().unwrap();
    assert!(matches!(err.downcast_ref::<RouteError>(), Some(RouteError::Collision { .. })));
}

#[test]
fn test_unresolved_injection_is_reported() {
    let (_, report) = boot("integration_test.dangling", ContainerConfig::default()).unwrap();
    assert_eq!(report.unresolved_injections().count(), 1);

    let strict = boot("integration_test.dangling", ContainerConfig::strict());
    let err = strict.err().unwrap();
    assert!(matches!(
        err.downcast_ref::<DependencyError>(),
        Some(DependencyError::ComponentNotRegistered { name }) if name == "nobody"
    ));
}

#[test]
fn test_route_building_is_repeatable() {
    let mut report = InitReport::new();
    let descriptors = GlobalTypeCatalog::new().scan("integration_test.library").unwrap();
    let container = ComponentRegistrar::default().register_all(descriptors, &mut report).unwrap();

    let first = ControllerRouteBuilder::default().build(&container, &mut report).unwrap();
    let second = ControllerRouteBuilder::default().build(&container, &mut report).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let (dispatcher, _) = boot("integration_test.library", ContainerConfig::default()).unwrap();
    let dispatcher = Arc::new(dispatcher);

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::task::spawn_blocking(move || {
                let uri = match i % 3 {
                    0 => format!("/library/book?id={}", i),
                    1 => "/library/page?count=oops".to_string(),
                    _ => "/library/boom".to_string(),
                };
                (i, call(&dispatcher, &uri))
            })
        })
        .collect();

    for handle in handles {
        let (i, (outcome, body)) = handle.await.unwrap();
        match i % 3 {
            0 => {
                assert_eq!(outcome, DispatchOutcome::Completed);
                assert_eq!(body, format!("book-{}", i));
            }
            _ => {
                assert_eq!(outcome, DispatchOutcome::Failed);
                assert!(body.starts_with("500 Exception Detail:\n"));
            }
        }
    }
}
