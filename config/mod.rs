use crate::kdtree::Rectangle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// kdplane 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdPlaneConfig {
    /// 树配置
    pub tree: TreeConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 树配置：初始边界矩形
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_min")]
    pub x_min: f64,

    #[serde(default = "default_min")]
    pub y_min: f64,

    #[serde(default = "default_max")]
    pub x_max: f64,

    #[serde(default = "default_max")]
    pub y_max: f64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stderr, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_min() -> f64 {
    0.0
}

fn default_max() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_output() -> String {
    "stderr".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for KdPlaneConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig {
                x_min: default_min(),
                y_min: default_min(),
                x_max: default_max(),
                y_max: default_max(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                output: default_log_output(),
                log_file: None,
            },
        }
    }
}

impl TreeConfig {
    /// 配置的边界矩形
    ///
    /// 宽度或高度溢出为无穷大的边界同样无效
    pub fn bounds(&self) -> Result<Rectangle, String> {
        let bounds = Rectangle::try_new(self.x_min, self.y_min, self.x_max, self.y_max)
            .map_err(|e| format!("Invalid tree bounds: {}", e))?;
        if !bounds.width().is_finite() || !bounds.height().is_finite() {
            return Err(format!(
                "Invalid tree bounds: {} is too wide, width and height must be finite",
                bounds
            ));
        }
        Ok(bounds)
    }
}

impl KdPlaneConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（KDPLANE__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use kdplane::config::KdPlaneConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = KdPlaneConfig::from_file("kdplane.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            // 1. 加载默认配置（内嵌）
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            // 2. 加载用户配置（可选，不存在不报错）
            .add_source(config::File::with_name(path).required(false))
            // 3. 加载环境变量（KDPLANE 前缀，双下划线分隔嵌套）
            .add_source(config::Environment::with_prefix("KDPLANE").separator("__"))
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        Ok(settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 验证配置
    ///
    /// 检查边界矩形、日志级别和日志输出
    pub fn validate(&self) -> Result<(), String> {
        self.tree.bounds()?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ))
            }
        }

        match self.logging.output.as_str() {
            "stderr" => {}
            "file" => {
                if self.logging.log_file.is_none() {
                    return Err(
                        "Log output is 'file' but log_file path is not specified".to_string()
                    );
                }
            }
            other => {
                return Err(format!(
                    "Invalid log output: '{}'. Must be one of: stderr, file",
                    other
                ))
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KdPlaneConfig::default();
        assert_eq!(config.tree.bounds().unwrap(), Rectangle::unit());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.output, "stderr");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = KdPlaneConfig::default();

        // 边界反转
        config.tree.x_min = 2.0;
        assert!(config.validate().is_err());
        config.tree.x_min = 0.0;

        // 非有限边界
        config.tree.y_max = f64::INFINITY;
        assert!(config.validate().is_err());
        config.tree.y_max = 1.0;

        // 各自有限但宽度溢出
        config.tree.x_min = -1e308;
        config.tree.x_max = 1e308;
        assert!(config.tree.bounds().is_err());
        assert!(config.validate().is_err());
        config.tree.x_min = -1e307;
        config.tree.x_max = 1e307;
        assert!(config.validate().is_ok());
        config.tree.x_min = 0.0;
        config.tree.x_max = 1.0;

        // 无效日志级别
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
        config.logging.level = "debug".to_string();

        // 文件输出但没有路径
        config.logging.output = "file".to_string();
        assert!(config.validate().is_err());
        config.logging.log_file = Some(PathBuf::from("kdplane.log"));
        assert!(config.validate().is_ok());

        config.logging.output = "syslog".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kdplane.toml");
        let path = path.to_str().unwrap();

        let mut config = KdPlaneConfig::default();
        config.tree.x_min = -10.0;
        config.tree.y_max = 25.0;
        config.logging.level = "debug".to_string();
        config.save_to_file(path).unwrap();

        let loaded = KdPlaneConfig::from_file(path).unwrap();
        assert_eq!(loaded.tree.x_min, -10.0);
        assert_eq!(loaded.tree.y_max, 25.0);
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(
            loaded.tree.bounds().unwrap(),
            Rectangle::new(-10.0, 0.0, 1.0, 25.0)
        );
    }

    #[test]
    fn test_load_without_user_file_uses_defaults() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let loaded = KdPlaneConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.tree.bounds().unwrap(), Rectangle::unit());
    }
}
