//! 应用构建器

use crate::bootstrapper::ApplicationBootstrapper;
use crate::config_sources::{ApplicationSettings, SettingsLoader};
use crate::infrastructure::ApplicationContext;
use crate::logging::init_logging;
use di_abstractions::TypeCatalog;
use std::path::Path;
use tracing::info;
use xmvc_common::InfrastructureError;

/// 应用构建器
///
/// 使用建造者模式加载配置、初始化日志并启动应用。
pub struct ApplicationBuilder {
    /// 配置加载器
    loader: SettingsLoader,
    /// 已给定的配置，存在时跳过加载
    settings: Option<ApplicationSettings>,
    /// 自定义类型目录
    catalog: Option<Box<dyn TypeCatalog>>,
    /// 是否初始化日志
    logging_enabled: bool,
}

impl ApplicationBuilder {
    /// 创建新的应用构建器
    pub fn new() -> Self {
        Self {
            loader: SettingsLoader::new(),
            settings: None,
            catalog: None,
            logging_enabled: false,
        }
    }

    /// 添加配置文件
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.loader = self.loader.with_file(path);
        self
    }

    /// 设置环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.loader = self.loader.with_env_prefix(prefix);
        self
    }

    /// 添加配置覆盖项
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.loader = self.loader.with_override(key, value);
        self
    }

    /// 直接使用给定配置
    pub fn with_settings(mut self, settings: ApplicationSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// 使用自定义类型目录
    pub fn with_catalog(mut self, catalog: impl TypeCatalog + 'static) -> Self {
        self.catalog = Some(Box::new(catalog));
        self
    }

    /// 启用日志初始化
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// 构建应用上下文
    pub fn build(self) -> Result<ApplicationContext, InfrastructureError> {
        let settings = match self.settings {
            Some(settings) => settings,
            None => self.loader.load()?,
        };

        if self.logging_enabled {
            init_logging(&settings.logging)?;
        }

        info!("构建应用: {}", settings.scan_package);
        let mut bootstrapper = ApplicationBootstrapper::new(settings);
        if let Some(catalog) = self.catalog {
            bootstrapper = bootstrapper.with_boxed_catalog(catalog);
        }
        bootstrapper.bootstrap()
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
