//! 命名与路径约定
//!
//! 默认组件命名、路由路径规范化和扫描命名空间规范化。

/// 默认组件命名：首字符转小写，其余不变
///
/// `UserController` → `userController`
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 路由路径规范化
///
/// 保证以单个 `/` 开头，并把连续的 `/` 折叠为一个。
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    for ch in path.chars() {
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }
    normalized
}

/// 拼接控制器基础路径和处理器路径
///
/// 空基础路径表示控制器没有声明路由前缀。
pub fn join_route_path(base_path: &str, handler_path: &str) -> String {
    let base = if base_path.is_empty() {
        String::new()
    } else {
        normalize_path(base_path)
    };
    normalize_path(&format!("{}{}", base, normalize_path(handler_path)))
}

/// 扫描命名空间规范化
///
/// 同时接受 `demo.controller` 和 `demo::controller` 两种写法。
pub fn normalize_namespace(namespace: &str) -> String {
    namespace
        .trim()
        .replace('.', "::")
        .trim_matches(':')
        .to_string()
}

/// 类型标识
///
/// 基于 `std::any::type_name`，去掉 trait object 的 `dyn ` 前缀和自动 trait 约束，
/// 因此 `dyn demo::UserService + Send` 的标识为 `demo::UserService`。
pub fn type_identifier<T: ?Sized + 'static>() -> String {
    let name = std::any::type_name::<T>();
    let name = name.strip_prefix("dyn ").unwrap_or(name);
    name.split(" + ").next().unwrap_or(name).to_string()
}

/// 类型标识中的简单名称（最后一个路径段）
pub fn simple_name(type_path: &str) -> &str {
    type_path.rsplit("::").next().unwrap_or(type_path)
}
