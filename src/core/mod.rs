//! 核心框架模块
//!
//! 提供页面框架的核心抽象：
//! - Event: 统一事件定义
//! - View: 视图 trait 与事件结果
//! - Route: 页面路由

pub mod event;
pub mod view;

pub use event::InputEvent;
pub use view::{EventResult, Route, View};
