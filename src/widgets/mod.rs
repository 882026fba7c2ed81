//! 组件层模块
//!
//! 可复用的交互式表单组件：
//! - CodeInput: 分段验证码输入（核心组件）
//! - TextField: 单行文本输入框
//! - Checkbox: 复选框

pub mod checkbox;
pub mod code_input;
pub mod text_field;

pub use checkbox::{Checkbox, CHECKBOX_HEIGHT};
pub use code_input::{CodeInput, CompleteCallback, DEFAULT_LENGTH};
pub use text_field::{TextField, FIELD_HEIGHT};
