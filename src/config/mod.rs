//! 配置管理模块
//!
//! 提供配置加载和验证功能

pub mod loader;
pub mod types;

// 重新导出主要类型
pub use loader::{load_matrix_config, load_report_config, vars, EnvSource, ProcessEnv};
pub use types::{DeliveryPolicy, MatrixConfig, ReportConfig};
