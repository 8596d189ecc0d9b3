//! 标记宏集成测试

use component_macros::{component, controller, routes, service};
use di_abstractions::TypeCatalog;
use di_impl::GlobalTypeCatalog;
use std::sync::atomic::{AtomicUsize, Ordering};
use xmvc_common::{
    type_identifier, Autowired, Component, ComponentError, DependencyError, HandlerArguments,
    ParamDescriptor, ParamType, Request, Response, SimpleRequest, TextResponse,
};

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

pub trait Farewell: Send + Sync {
    fn bye(&self) -> String;
}

#[service(provides(Greeter, Farewell))]
#[derive(Debug, Default)]
pub struct PoliteGreeter;

impl Greeter for PoliteGreeter {
    fn greet(&self) -> String {
        "hello".to_string()
    }
}

impl Farewell for PoliteGreeter {
    fn bye(&self) -> String {
        "bye".to_string()
    }
}

#[service("ledger")]
#[derive(Debug, Default)]
pub struct Ledger;

#[service]
#[derive(Debug, Default)]
pub struct Anonymous;

#[component]
#[derive(Debug, Default)]
pub struct AuditTrail {
    #[autowired]
    greeter: Autowired<dyn Greeter>,
    #[autowired("ledger")]
    ledger: Autowired<Ledger>,
    plain: usize,
}

static OPENED: AtomicUsize = AtomicUsize::new(0);

#[service(name = "pool", constructor = "Pool::open")]
#[derive(Debug)]
pub struct Pool {
    size: usize,
}

impl Pool {
    fn open() -> anyhow::Result<Self> {
        OPENED.fetch_add(1, Ordering::SeqCst);
        Ok(Self { size: 4 })
    }
}

#[service(name = "broken", constructor = "Broken::open")]
#[derive(Debug)]
pub struct Broken;

impl Broken {
    fn open() -> Result<Self, std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "socket refused"))
    }
}

#[controller]
#[request_mapping("/orders")]
#[derive(Debug, Default)]
pub struct OrderController;

#[routes]
impl OrderController {
    #[request_mapping("/show")]
    fn show(
        &self,
        resp: &mut dyn Response,
        #[request_param("id")] id: i64,
        #[request_param("qty")] qty: i32,
        #[request_param("tag")] tag: &str,
        #[request_param("note")] note: String,
    ) -> anyhow::Result<()> {
        resp.write(&format!("{} {} {} {}", id, qty, tag, note))?;
        Ok(())
    }

    #[request_mapping("raw")]
    fn raw(&self, req: &dyn Request, resp: &mut dyn Response) -> std::io::Result<()> {
        resp.write(req.path())
    }

    pub fn not_a_handler(&self) -> u8 {
        1
    }
}

#[test]
fn test_service_descriptor() {
    let descriptor = PoliteGreeter::__xmvc_descriptor_polite_greeter();

    assert_eq!(descriptor.type_path, type_identifier::<PoliteGreeter>());
    assert_eq!(descriptor.simple_name, "PoliteGreeter");
    assert!(!descriptor.component);
    assert_eq!(descriptor.service.as_ref().and_then(|tag| tag.explicit_name()), None);
    assert_eq!(
        descriptor.capabilities,
        vec![type_identifier::<dyn Greeter>(), type_identifier::<dyn Farewell>()]
    );

    let explicit = Ledger::__xmvc_descriptor_ledger();
    assert_eq!(explicit.service.as_ref().and_then(|tag| tag.explicit_name()), Some("ledger"));

    let anonymous = Anonymous::__xmvc_descriptor_anonymous();
    assert!(anonymous.service.is_some());
    assert!(anonymous.capabilities.is_empty());
}

#[test]
fn test_factory_exposes_capability_views() {
    let descriptor = PoliteGreeter::__xmvc_descriptor_polite_greeter();
    let factory = descriptor.factory.unwrap();
    let bean = factory().unwrap();

    assert_eq!(bean.view::<dyn Greeter>().unwrap().greet(), "hello");
    assert_eq!(bean.view::<dyn Farewell>().unwrap().bye(), "bye");
    assert!(bean.view::<PoliteGreeter>().is_some());
    assert!(bean.view::<Ledger>().is_none());
}

#[test]
fn test_autowired_fields_become_injection_points() {
    let descriptor = AuditTrail::__xmvc_descriptor_audit_trail();
    assert!(descriptor.component);
    assert_eq!(descriptor.injection_points.len(), 2);

    let by_type = &descriptor.injection_points[0];
    assert_eq!(by_type.field, "greeter");
    assert_eq!(by_type.target_name(), type_identifier::<dyn Greeter>());

    let by_name = &descriptor.injection_points[1];
    assert_eq!(by_name.field, "ledger");
    assert_eq!(by_name.target_name(), "ledger");

    let trail = AuditTrail::default();
    assert_eq!(trail.plain, 0);
    let ledger = Ledger::__xmvc_descriptor_ledger().factory.unwrap()().unwrap();
    trail.inject("ledger", &ledger).unwrap();
    assert!(trail.ledger.is_injected());
    assert!(!trail.greeter.is_injected());

    assert!(matches!(
        trail.inject("greeter", &ledger),
        Err(DependencyError::TypeMismatch { .. })
    ));
    assert!(matches!(
        trail.inject("plain", &ledger),
        Err(DependencyError::UnknownInjectionPoint { .. })
    ));
}

#[test]
fn test_custom_constructor() {
    let before = OPENED.load(Ordering::SeqCst);
    let bean = Pool::__xmvc_descriptor_pool().factory.unwrap()().unwrap();
    assert_eq!(bean.view::<Pool>().unwrap().size, 4);
    assert!(OPENED.load(Ordering::SeqCst) > before);

    let failed = Broken::__xmvc_descriptor_broken().factory.unwrap()();
    match failed {
        Err(ComponentError::ConstructionFailed { type_name, source }) => {
            assert_eq!(type_name, type_identifier::<Broken>());
            assert!(source.to_string().contains("socket refused"));
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_controller_handlers() {
    let descriptor = OrderController::__xmvc_descriptor_order_controller();
    assert!(descriptor.controller);
    assert_eq!(descriptor.base_path.as_deref(), Some("/orders"));
    assert_eq!(descriptor.handlers.len(), 2);

    let show = &descriptor.handlers[0];
    assert_eq!(show.name, "show");
    assert_eq!(show.path, "/show");
    assert_eq!(
        show.params,
        vec![
            ParamDescriptor::Response,
            ParamDescriptor::named("id", ParamType::Long),
            ParamDescriptor::named("qty", ParamType::Integer),
            ParamDescriptor::named("tag", ParamType::Text),
            ParamDescriptor::named("note", ParamType::Text),
        ]
    );

    let raw = &descriptor.handlers[1];
    assert_eq!(raw.path, "raw");
    assert_eq!(raw.params, vec![ParamDescriptor::Request, ParamDescriptor::Response]);
    assert_eq!(OrderController.not_a_handler(), 1);
}

#[test]
fn test_controller_invoke_uses_positional_arguments() {
    let request = SimpleRequest::new("/orders/raw");
    let mut response = TextResponse::new();
    let controller = OrderController;

    let mut args = HandlerArguments::new();
    args.push(xmvc_common::Argument::Request(&request));
    args.push(xmvc_common::Argument::Response(&mut response));
    controller.invoke("raw", args).unwrap();
    assert_eq!(response.body(), "/orders/raw");

    assert!(controller.invoke("missing", HandlerArguments::new()).is_err());
}

#[test]
fn test_registered_in_global_catalog() {
    let descriptors = GlobalTypeCatalog::new().scan("integration_tests").unwrap();
    let names: Vec<_> = descriptors.iter().map(|d| d.simple_name.as_str()).collect();

    assert_eq!(
        names,
        vec!["Anonymous", "AuditTrail", "Broken", "Ledger", "OrderController", "PoliteGreeter", "Pool"]
    );
}
