//! 配置服务：管理界面配置
//!
//! 提供统一的配置管理，可从 JSON 文件加载，缺省使用默认值

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// 验证码位数
    pub code_length: usize,
    /// 模拟提交类 API 的延迟（毫秒）
    pub submit_delay_ms: u64,
    /// 模拟重发验证码的延迟（毫秒）
    pub resend_delay_ms: u64,
    /// 事件轮询间隔（毫秒）
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            submit_delay_ms: 2000,
            resend_delay_ms: 1500,
            tick_rate_ms: 50,
        }
    }
}

pub struct ConfigService {
    ui: UiConfig,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            ui: UiConfig::default(),
        }
    }

    pub fn with_ui_config(ui: UiConfig) -> Self {
        Self { ui }
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let ui: UiConfig = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self { ui })
    }

    /// 环境变量 SOUK_CONFIG 指向配置文件；加载失败回退默认配置
    pub fn load_or_default() -> Self {
        match std::env::var_os("SOUK_CONFIG") {
            Some(path) => Self::load(Path::new(&path)).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to load config, using defaults");
                Self::new()
            }),
            None => Self::new(),
        }
    }

    pub fn ui(&self) -> &UiConfig {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiConfig {
        &mut self.ui
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = UiConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.submit_delay_ms, 2000);
        assert_eq!(config.resend_delay_ms, 1500);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("souk.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "code_length": 4, "submit_delay_ms": 10 }}"#).unwrap();

        let service = ConfigService::load(&path).unwrap();
        assert_eq!(service.ui().code_length, 4);
        assert_eq!(service.ui().submit_delay_ms, 10);
        // 未给出的字段取默认值
        assert_eq!(service.ui().resend_delay_ms, 1500);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("souk.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(ConfigService::load(&path).is_err());
    }
}
