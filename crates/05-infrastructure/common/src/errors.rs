//! 错误类型定义

use thiserror::Error;

/// 动态错误类型，用于组件析构和拆卸回调
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 依赖注入错误类型
///
/// 这些错误都属于程序装配错误（遗漏注册或遗漏提供），不可在运行时恢复，
/// 调用方应当立即中止当前操作。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    /// `provide` 时实现类型从未经过 `register`
    #[error("实现类型未注册: {type_name}，可能遗漏了 #[injectable] 标注")]
    UnregisteredImplementation { type_name: String },

    /// `inject` 时祖先链上没有任何作用域绑定该令牌
    #[error("无法解析令牌: {token}")]
    UnresolvedToken { token: String },

    /// `inject_new` 时祖先链上没有任何作用域提供该令牌的构造器
    #[error("未找到令牌的构造器: {token}")]
    NoConstructor { token: String },

    /// 作用域中存储的值与令牌的服务类型不一致
    #[error("令牌类型不匹配: {token}")]
    TokenTypeMismatch { token: String },
}

impl DependencyError {
    /// 创建未注册实现错误
    pub fn unregistered(type_name: impl Into<String>) -> Self {
        Self::UnregisteredImplementation {
            type_name: type_name.into(),
        }
    }

    /// 创建无法解析令牌错误
    pub fn unresolved(token: impl Into<String>) -> Self {
        Self::UnresolvedToken {
            token: token.into(),
        }
    }

    /// 创建缺少构造器错误
    pub fn no_constructor(token: impl Into<String>) -> Self {
        Self::NoConstructor {
            token: token.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 生命周期管理错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// 拆卸回调返回错误或 panic
    #[error("拆卸回调执行失败: {scope}, 原因: {message}")]
    TeardownFailed { scope: String, message: String },

    /// 守卫对应的子树已被外层退出连带弹出
    #[error("子树未正确嵌套退出: {scope}")]
    UnbalancedExit { scope: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("生命周期错误: {source}")]
    LifecycleError {
        #[from]
        source: LifecycleError,
    },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type LifecycleResult<T> = Result<T, LifecycleError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_error_messages_name_the_subject() {
        let err = DependencyError::unregistered("demo::Logger");
        assert!(err.to_string().contains("demo::Logger"));

        let err = DependencyError::unresolved("demo::ILogger");
        assert!(err.to_string().contains("demo::ILogger"));

        let err = DependencyError::no_constructor("demo::ILogger");
        assert!(err.to_string().contains("demo::ILogger"));
    }

    #[test]
    fn test_infrastructure_error_from_dependency_error() {
        let err: InfrastructureError = DependencyError::unresolved("T").into();
        assert!(matches!(err, InfrastructureError::DependencyError { .. }));
    }
}
