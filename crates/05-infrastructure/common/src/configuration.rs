//! 容器配置

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 惰性创建的根作用域名称
    pub root_scope_name: String,
    /// 是否以 debug 级别记录每次解析（否则为 trace）
    pub trace_resolution: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            root_scope_name: "root".to_string(),
            trace_resolution: false,
        }
    }
}

impl ContainerConfig {
    /// 从 JSON 文本解析配置，缺省字段使用默认值
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.root_scope_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "root_scope_name 不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// 设置根作用域名称
    pub fn with_root_scope_name(mut self, name: impl Into<String>) -> Self {
        self.root_scope_name = name.into();
        self
    }

    /// 设置是否详细记录解析过程
    pub fn with_trace_resolution(mut self, enabled: bool) -> Self {
        self.trace_resolution = enabled;
        self
    }
}
