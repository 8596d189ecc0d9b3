//! 应用配置加载
//!
//! 配置源按优先级从低到高依次为：配置文件、环境变量、显式覆盖项。

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use xmvc_common::ConfigError;

/// 环境变量默认前缀
pub const DEFAULT_ENV_PREFIX: &str = "XMVC";

/// 扫描命名空间配置键
pub const SCAN_PACKAGE_KEY: &str = "scan_package";

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    /// 根扫描命名空间
    #[serde(default, alias = "scanPackage", alias = "scanpackage")]
    pub scan_package: String,
    /// 上下文路径前缀
    #[serde(default, alias = "contextPath", alias = "contextpath")]
    pub context_path: String,
    /// 是否以严格模式初始化
    #[serde(default)]
    pub strict: bool,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingSettings,
    /// 宿主服务配置
    #[serde(default)]
    pub server: ServerSettings,
}

impl ApplicationSettings {
    /// 以指定扫描命名空间创建默认配置
    pub fn new(scan_package: impl Into<String>) -> Self {
        Self {
            scan_package: scan_package.into(),
            context_path: String::new(),
            strict: false,
            logging: LoggingSettings::default(),
            server: ServerSettings::default(),
        }
    }

    /// 设置严格模式
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 设置上下文路径
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.scan_package.trim().is_empty() {
            return Err(ConfigError::KeyNotFound {
                key: SCAN_PACKAGE_KEY.to_string(),
            });
        }
        Ok(self)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 日志级别或 env-filter 表达式
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 宿主服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 监听地址
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// 配置加载器
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    /// 配置文件（格式由扩展名决定）
    file: Option<PathBuf>,
    /// 环境变量前缀
    env_prefix: String,
    /// 替代进程环境的变量表
    env_source: Option<HashMap<String, String>>,
    /// 显式覆盖项
    overrides: Vec<(String, String)>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// 创建新的配置加载器
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            env_source: None,
            overrides: Vec::new(),
        }
    }

    /// 添加配置文件（TOML / JSON / YAML）
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        debug!("添加配置文件: {}", path.as_ref().display());
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 使用给定的变量表代替进程环境
    pub fn with_env_source(mut self, source: HashMap<String, String>) -> Self {
        self.env_source = Some(source);
        self
    }

    /// 添加覆盖项
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// 加载配置
    pub fn load(&self) -> Result<ApplicationSettings, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                error!("配置文件不存在: {}", path.display());
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true)
                .source(self.env_source.clone()),
        );

        for (key, value) in &self.overrides {
            builder = builder
                .set_override(key.as_str(), value.as_str())
                .map_err(parse_error)?;
        }

        let settings: ApplicationSettings = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(parse_error)?;
        let settings = settings.validate()?;

        info!(
            "配置加载完成: scan_package={}, strict={}",
            settings.scan_package, settings.strict
        );
        Ok(settings)
    }
}

fn parse_error(err: config::ConfigError) -> ConfigError {
    error!("配置解析失败: {}", err);
    ConfigError::ParseError {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn isolated() -> SettingsLoader {
        SettingsLoader::new().with_env_source(HashMap::new())
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "scan_package = \"demo_package\"\ncontext_path = \"/app\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let settings = isolated().with_file(file.path()).load().unwrap();
        assert_eq!(settings.scan_package, "demo_package");
        assert_eq!(settings.context_path, "/app");
        assert_eq!(settings.logging.level, "debug");
        assert!(!settings.strict);
        assert_eq!(settings.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_load_accepts_camel_case_key_from_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{ "scanPackage": "com.mk" }}"#).unwrap();

        let settings = isolated().with_file(file.path()).load().unwrap();
        assert_eq!(settings.scan_package, "com.mk");
    }

    #[test]
    fn test_environment_and_overrides_take_precedence() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "scan_package: from_file\nstrict: false").unwrap();

        let env = HashMap::from([
            ("XMVC__SCAN_PACKAGE".to_string(), "from_env".to_string()),
            ("XMVC__STRICT".to_string(), "true".to_string()),
        ]);
        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env_source(env.clone())
            .load()
            .unwrap();
        assert_eq!(settings.scan_package, "from_env");
        assert!(settings.strict);

        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env_source(env)
            .with_override("scan_package", "from_override")
            .load()
            .unwrap();
        assert_eq!(settings.scan_package, "from_override");
    }

    #[test]
    fn test_missing_scan_package_is_reported() {
        let result = isolated().load();
        assert!(matches!(result, Err(ConfigError::KeyNotFound { key }) if key == SCAN_PACKAGE_KEY));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = isolated().with_file("/definitely/missing/app.toml").load();
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
