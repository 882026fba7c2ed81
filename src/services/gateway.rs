//! 模拟 API 网关
//!
//! 没有真实后端：每个请求都是一个定时器，延迟结束后把结果写回
//! 非阻塞通道，由应用层每个 tick 轮询取走

use super::config::UiConfig;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Runtime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    SignIn { email: String },
    Register { name: String, email: String },

    SendResetCode { email: String },
    VerifyResetCode { code: String },
    ResendResetCode,
    ResetPassword,

    SendSignupCode { email: String },
    VerifySignupCode { code: String },
    ResendSignupCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult {
    SignedIn { email: String },
    Registered { name: String, email: String },

    ResetCodeSent,
    ResetCodeVerified { code: String },
    ResetCodeResent,
    PasswordReset,

    SignupCodeSent,
    SignupCodeVerified { code: String },
    SignupCodeResent,
}

pub struct ApiGateway {
    runtime: Runtime,
    tx: mpsc::Sender<ApiResult>,
    rx: mpsc::Receiver<ApiResult>,
    submit_delay: Duration,
    resend_delay: Duration,
}

impl ApiGateway {
    pub fn new(config: &UiConfig) -> Self {
        let runtime = Runtime::new().expect("Failed to create tokio runtime");
        let (tx, rx) = mpsc::channel();
        Self {
            runtime,
            tx,
            rx,
            submit_delay: Duration::from_millis(config.submit_delay_ms),
            resend_delay: Duration::from_millis(config.resend_delay_ms),
        }
    }

    fn delay_for(&self, request: &ApiRequest) -> Duration {
        match request {
            ApiRequest::ResendResetCode | ApiRequest::ResendSignupCode => self.resend_delay,
            _ => self.submit_delay,
        }
    }

    fn result_for(request: ApiRequest) -> ApiResult {
        match request {
            ApiRequest::SignIn { email } => ApiResult::SignedIn { email },
            ApiRequest::Register { name, email } => ApiResult::Registered { name, email },
            ApiRequest::SendResetCode { .. } => ApiResult::ResetCodeSent,
            ApiRequest::VerifyResetCode { code } => ApiResult::ResetCodeVerified { code },
            ApiRequest::ResendResetCode => ApiResult::ResetCodeResent,
            ApiRequest::ResetPassword => ApiResult::PasswordReset,
            ApiRequest::SendSignupCode { .. } => ApiResult::SignupCodeSent,
            ApiRequest::VerifySignupCode { code } => ApiResult::SignupCodeVerified { code },
            ApiRequest::ResendSignupCode => ApiResult::SignupCodeResent,
        }
    }

    /// 发起一次模拟调用：延迟结束后结果进入通道
    pub fn submit(&self, request: ApiRequest) {
        let delay = self.delay_for(&request);
        tracing::info!(?request, ?delay, "simulated api call");

        let result = Self::result_for(request);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(?result, "simulated api call completed");
            let _ = tx.send(result);
        });
    }

    /// 非阻塞地取走所有已完成的结果
    pub fn poll_results(&mut self) -> Vec<ApiResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            results.push(result);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn fast_config() -> UiConfig {
        UiConfig {
            submit_delay_ms: 5,
            resend_delay_ms: 1,
            ..UiConfig::default()
        }
    }

    fn wait_for_results(gateway: &mut ApiGateway, count: usize) -> Vec<ApiResult> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(gateway.poll_results());
            std::thread::sleep(Duration::from_millis(1));
        }
        results
    }

    #[test]
    fn test_submit_delivers_result_after_delay() {
        let mut gateway = ApiGateway::new(&fast_config());
        gateway.submit(ApiRequest::SendResetCode {
            email: "john@example.com".to_string(),
        });

        let results = wait_for_results(&mut gateway, 1);
        assert_eq!(results, vec![ApiResult::ResetCodeSent]);
    }

    #[test]
    fn test_verify_echoes_code() {
        let mut gateway = ApiGateway::new(&fast_config());
        gateway.submit(ApiRequest::VerifyResetCode {
            code: "123456".to_string(),
        });

        let results = wait_for_results(&mut gateway, 1);
        assert_eq!(
            results,
            vec![ApiResult::ResetCodeVerified {
                code: "123456".to_string()
            }]
        );
    }

    #[test]
    fn test_poll_is_nonblocking_when_empty() {
        let mut gateway = ApiGateway::new(&fast_config());
        assert!(gateway.poll_results().is_empty());
    }

    #[test]
    fn test_result_mapping() {
        assert_eq!(
            ApiGateway::result_for(ApiRequest::SignIn {
                email: "a@b.co".to_string()
            }),
            ApiResult::SignedIn {
                email: "a@b.co".to_string()
            }
        );
        assert_eq!(
            ApiGateway::result_for(ApiRequest::ResendSignupCode),
            ApiResult::SignupCodeResent
        );
        assert_eq!(
            ApiGateway::result_for(ApiRequest::ResetPassword),
            ApiResult::PasswordReset
        );
    }
}
