//! 演示服务

use chrono::{DateTime, Utc};
use component_macros::service;

/// 用户查询服务
pub trait UserService: Send + Sync {
    /// 按名称查询用户
    fn get_user_by_name(&self, name: &str) -> String;
}

/// 用户查询服务的默认实现，以 `UserService` 的类型标识注册
#[service(provides(UserService))]
#[derive(Debug, Default)]
pub struct UserServiceImpl;

impl UserService for UserServiceImpl {
    fn get_user_by_name(&self, name: &str) -> String {
        format!("My name is {}", name)
    }
}

/// 系统时钟，以显式名称 `clock` 注册
#[service(name = "clock")]
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    /// 当前时间
    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
