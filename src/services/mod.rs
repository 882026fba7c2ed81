//! 服务层模块
//!
//! 提供页面共用的服务实现：
//! - ConfigService: 配置服务
//! - validation: 表单字段校验（三个流程共用）
//! - ApiGateway: 模拟 API 网关（定时器 + 结果通道）

pub mod config;
pub mod gateway;
pub mod validation;

pub use config::{ConfigService, UiConfig};
pub use gateway::{ApiGateway, ApiRequest, ApiResult};
