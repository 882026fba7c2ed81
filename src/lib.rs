//! souk - 终端商店前端库
//!
//! 模块结构：
//! - core: 核心框架（View, Event, Route）
//! - services: 服务层（ConfigService, validation, ApiGateway）
//! - widgets: 可复用交互组件（CodeInput, TextField, Checkbox）
//! - views: 页面视图（HomeView, AccountView, ForgotPasswordView, RegistrationView）
//! - app: 应用层（Shell）

pub mod app;
pub mod core;
pub mod logging;
pub mod services;
pub mod views;
pub mod widgets;
