//! 视图层模块
//!
//! 店面的各个页面：
//! - HomeView: 商店首页
//! - AccountView: 登录 / 注册标签页
//! - ForgotPasswordView: 找回密码四步流程
//! - RegistrationView: 注册三步流程
//! - chrome: 导航栏与页脚等公共装饰

pub mod account;
pub mod chrome;
pub mod forgot_password;
pub mod home;
pub mod registration;

pub use account::{AccountTab, AccountView};
pub use forgot_password::{ForgotPasswordView, ForgotStep};
pub use home::HomeView;
pub use registration::{RegistrationStep, RegistrationView};
