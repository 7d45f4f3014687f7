//! CLI 配置
//!
//! 把 `linal-config` 中的字符串日志级别解析为 `tracing::Level`

use linal_config::{LogConfig as LogLevels, Phase};
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    phases: Vec<(Phase, Level)>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            phases: Vec::new(),
        }
    }
}

impl LogConfig {
    /// `global_override` 来自命令行，优先于配置文件
    pub fn from_levels(levels: &LogLevels, global_override: Option<Level>) -> Self {
        let global = global_override
            .or_else(|| levels.global.as_deref().and_then(parse_log_level))
            .unwrap_or(Level::WARN);
        // 只取单独配置的阶段，其余跟随 global
        let specific = LogLevels {
            global: None,
            ..levels.clone()
        };
        let phases = Phase::ALL
            .iter()
            .filter_map(|&phase| {
                let level = specific.level_for(phase).and_then(parse_log_level)?;
                Some((phase, level))
            })
            .collect();
        Self { global, phases }
    }

    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> Level {
        self.phases
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, level)| *level)
            .unwrap_or(self.global)
    }
}

/// Parse log level string
pub fn parse_log_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "silent" => Some(Level::ERROR), // silent = only errors
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
