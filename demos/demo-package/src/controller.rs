//! 演示控制器

use crate::service::{SystemClock, UserService};
use component_macros::{controller, routes};
use xmvc_common::{Autowired, Request, Response};

/// 用户控制器
#[controller]
#[request_mapping("/user")]
#[derive(Debug, Default)]
pub struct UserController {
    #[autowired]
    user_service: Autowired<dyn UserService>,
    #[autowired("clock")]
    clock: Autowired<SystemClock>,
}

#[routes]
impl UserController {
    #[request_mapping("/query")]
    fn query(
        &self,
        _req: &dyn Request,
        resp: &mut dyn Response,
        #[request_param("name")] name: String,
        #[request_param("age")] _age: i32,
    ) -> anyhow::Result<()> {
        resp.write(&self.user_service.require()?.get_user_by_name(&name))?;
        Ok(())
    }

    #[request_mapping("time")]
    fn time(&self, resp: &mut dyn Response) -> anyhow::Result<()> {
        resp.write(&self.clock.require()?.now().to_rfc3339())?;
        Ok(())
    }

    #[request_mapping("/echo")]
    fn echo(&self, resp: &mut dyn Response, #[request_param("id")] id: i64, #[request_param("note")] note: &str) -> anyhow::Result<()> {
        resp.write(&format!("{}:{}", id, note))?;
        Ok(())
    }
}
