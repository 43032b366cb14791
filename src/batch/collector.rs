//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的网格文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 逗号分隔的多个 glob 模式
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/calibrate.rs` 调用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `glob::Pattern` 匹配文件名

use crate::error::{Result, XrfError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认匹配所有文件）
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    XrfError::InvalidArgument(format!("invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(PathBuf::from("."))
            .with_pattern("*.csv, map_??.txt")
            .unwrap();
        assert!(collector.matches_patterns(Path::new("a/b/map.csv")));
        assert!(collector.matches_patterns(Path::new("map_01.txt")));
        assert!(!collector.matches_patterns(Path::new("map_001.txt")));
        assert!(!collector.matches_patterns(Path::new("map.png")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FileCollector::new(PathBuf::from(".")).with_pattern("[*.csv");
        assert!(matches!(result, Err(XrfError::InvalidArgument(_))));
    }

    #[test]
    fn test_collect_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "1").unwrap();
        fs::write(dir.path().join("a.csv"), "1").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.csv"), "1").unwrap();

        let flat = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.csv")
            .unwrap()
            .collect();
        let names: Vec<_> = flat
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);

        let deep = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.csv")
            .unwrap()
            .recursive(true)
            .collect();
        assert_eq!(deep.len(), 3);

        let single = FileCollector::new(dir.path().join("notes.md")).collect();
        assert_eq!(single.len(), 1);
    }
}
