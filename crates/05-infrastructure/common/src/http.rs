//! 宿主 HTTP 传输层抽象
//!
//! 容器只通过这两个 trait 读取请求、写入响应；连接管理和协议解析由宿主负责。

use std::collections::HashMap;
use std::io;

/// 请求抽象
pub trait Request {
    /// 请求路径（不含查询字符串）
    fn path(&self) -> &str;

    /// 上下文路径前缀
    fn context_path(&self) -> &str {
        ""
    }

    /// 指定名称的全部参数值（按出现顺序）
    fn parameter_values(&self, name: &str) -> Option<&[String]>;

    /// 指定名称的第一个参数值
    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameter_values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// 响应抽象
pub trait Response {
    /// 写入原始文本
    fn write(&mut self, text: &str) -> io::Result<()>;
}

/// 内存中的请求实现
#[derive(Debug, Clone, Default)]
pub struct SimpleRequest {
    path: String,
    context_path: String,
    parameters: HashMap<String, Vec<String>>,
}

impl SimpleRequest {
    /// 创建新的请求
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// 从 `path?query` 形式的 URI 创建请求
    pub fn from_uri(uri: &str) -> Self {
        let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
        let mut request = Self::new(path);
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            request = request.with_parameter(name, value);
        }
        request
    }

    /// 设置上下文路径
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// 追加参数值（同名参数保留全部值）
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }
}

impl Request for SimpleRequest {
    fn path(&self) -> &str {
        &self.path
    }

    fn context_path(&self) -> &str {
        &self.context_path
    }

    fn parameter_values(&self, name: &str) -> Option<&[String]> {
        self.parameters.get(name).map(Vec::as_slice)
    }
}

/// 缓冲文本响应
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResponse {
    body: String,
}

impl TextResponse {
    /// 创建空响应
    pub fn new() -> Self {
        Self::default()
    }

    /// 响应体
    pub fn body(&self) -> &str {
        &self.body
    }

    /// 取出响应体
    pub fn into_body(self) -> String {
        self.body
    }
}

impl Response for TextResponse {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.body.push_str(text);
        Ok(())
    }
}
