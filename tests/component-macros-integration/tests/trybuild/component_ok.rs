use component_macros::{controller, routes, service};
use xmvc_common::{Autowired, Response};

#[service(name = "clock")]
#[derive(Debug, Default)]
pub struct Clock;

#[controller]
#[request_mapping("/ok")]
#[derive(Debug, Default)]
pub struct OkController {
    #[autowired("clock")]
    clock: Autowired<Clock>,
}

#[routes]
impl OkController {
    #[request_mapping("/ping")]
    fn ping(&self, resp: &mut dyn Response, #[request_param("n")] n: i32) -> std::io::Result<()> {
        resp.write(&format!("{} {}", n, self.clock.is_injected()))
    }
}

fn main() {
    let descriptor = OkController::__xmvc_descriptor_ok_controller();
    assert_eq!(descriptor.handlers.len(), 1);
    assert_eq!(descriptor.injection_points.len(), 1);
}
