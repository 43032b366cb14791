//! # 区域布局解析器
//!
//! 从 CSV 读取区域样本列表。
//!
//! ## 格式说明
//! ```text
//! label,shape,x,y,w,h,r,rotation,class,loading
//! std-1,circle,12,8,,,3,,reference,120.5
//! std-2,circle,30,8,,,3,,reference,
//! filter,rect,40,20,-6,4,,15,unknown,
//! ```
//! - `circle`: (x, y) 为圆心，必须给出 r
//! - `rect`/`rectangle`: (x, y) 为锚点角，必须给出 w 和 h，rotation 默认 0
//! - `class`: reference/ref 或 unknown/sample
//! - 每一行都作为"绘制中的形状"提交，负宽高在此规范化
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `sampling/region.rs`, `models/shape.rs`
//! - 使用 `csv` + `serde` 反序列化

use crate::error::{Result, XrfError};
use crate::models::{ShapeDescriptor, ShapeKind};
use crate::sampling::{Classification, RegionSample};

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// 区域布局中的一行
#[derive(Debug, Deserialize)]
struct RegionRecord {
    #[serde(default)]
    label: Option<String>,
    shape: ShapeKind,
    x: f64,
    y: f64,
    #[serde(default)]
    w: Option<f64>,
    #[serde(default)]
    h: Option<f64>,
    #[serde(default)]
    r: Option<f64>,
    #[serde(default)]
    rotation: Option<f64>,
    class: Classification,
    #[serde(default)]
    loading: Option<f64>,
}

/// 解析后的区域布局
#[derive(Debug, Default)]
pub struct RegionLayout {
    pub samples: Vec<RegionSample>,
    /// 非致命问题（例如未知样本上给出了负载量）
    pub warnings: Vec<String>,
}

/// 解析区域布局文件
pub fn parse_regions_file(path: &Path) -> Result<RegionLayout> {
    let file = std::fs::File::open(path).map_err(|e| XrfError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_regions_reader(file)
}

/// 从字符串内容解析区域布局
pub fn parse_regions_content(content: &str) -> Result<RegionLayout> {
    parse_regions_reader(content.as_bytes())
}

fn parse_regions_reader<R: Read>(reader: R) -> Result<RegionLayout> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut layout = RegionLayout::default();

    for (idx, result) in rdr.deserialize::<RegionRecord>().enumerate() {
        let line = idx + 1;
        let record = result.map_err(|e| XrfError::InvalidRegion {
            line,
            reason: e.to_string(),
        })?;
        let sample = build_sample(record, line, &mut layout.warnings)?;
        layout.samples.push(sample);
    }

    Ok(layout)
}

fn build_sample(
    record: RegionRecord,
    line: usize,
    warnings: &mut Vec<String>,
) -> Result<RegionSample> {
    let missing = |field: &str| XrfError::InvalidRegion {
        line,
        reason: format!("{} requires '{}'", record.shape, field),
    };

    let draft = match record.shape {
        ShapeKind::Circle => {
            let r = record.r.ok_or_else(|| missing("r"))?;
            ShapeDescriptor::circle(record.x, record.y, r)
        }
        ShapeKind::Rect => {
            let w = record.w.ok_or_else(|| missing("w"))?;
            let h = record.h.ok_or_else(|| missing("h"))?;
            let rotation = record.rotation.unwrap_or(0.0);
            ShapeDescriptor::rotated_rect(record.x, record.y, w, h, rotation)
        }
    };

    if !draft.is_finite() {
        return Err(XrfError::InvalidRegion {
            line,
            reason: "geometry must be finite".to_string(),
        });
    }

    if record.class == Classification::Unknown && record.loading.is_some() {
        warnings.push(format!("line {}: loading ignored for unknown sample", line));
    }

    let mut sample =
        RegionSample::commit(draft, record.class).with_known_loading(record.loading);
    if let Some(label) = record.label.filter(|l| !l.is_empty()) {
        sample = sample.with_label(label);
    }
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "label,shape,x,y,w,h,r,rotation,class,loading\n";

    #[test]
    fn test_parse_layout() {
        let content = format!(
            "{}std-1,circle,12,8,,,3,,reference,120.5\n\
             ,rect,40,20,-6,4,,15,unknown,\n\
             std-2,rectangle,1,1,2,2,,,ref,\n",
            HEADER
        );
        let layout = parse_regions_content(&content).unwrap();
        assert_eq!(layout.samples.len(), 3);
        assert!(layout.warnings.is_empty());

        let first = &layout.samples[0];
        assert_eq!(first.label(), Some("std-1"));
        assert_eq!(*first.shape(), ShapeDescriptor::circle(12.0, 8.0, 3.0));
        assert_eq!(first.known_loading(), Some(120.5));

        let second = &layout.samples[1];
        assert_eq!(second.label(), None);
        assert_eq!(second.classification(), Classification::Unknown);
        assert_eq!(
            *second.shape(),
            ShapeDescriptor::rotated_rect(34.0, 20.0, 6.0, 4.0, 15.0)
        );

        let third = &layout.samples[2];
        assert!(third.is_reference());
        assert_eq!(third.known_loading(), None);
        assert_eq!(*third.shape(), ShapeDescriptor::rect(1.0, 1.0, 2.0, 2.0));
    }

    #[test]
    fn test_loading_on_unknown_warns() {
        let content = format!("{}s,circle,1,1,,,1,,unknown,5\n", HEADER);
        let layout = parse_regions_content(&content).unwrap();
        assert_eq!(layout.samples[0].known_loading(), None);
        assert_eq!(layout.warnings.len(), 1);
    }

    #[test]
    fn test_missing_geometry_reports_line() {
        let content = format!(
            "{}a,circle,1,1,,,1,,reference,1\nb,rect,1,1,2,,,,unknown,\n",
            HEADER
        );
        match parse_regions_content(&content) {
            Err(XrfError::InvalidRegion { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("'h'"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_bad_class_is_rejected() {
        let content = format!("{}a,circle,1,1,,,1,,standard,1\n", HEADER);
        assert!(matches!(
            parse_regions_content(&content),
            Err(XrfError::InvalidRegion { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_layout() {
        let layout = parse_regions_content(HEADER).unwrap();
        assert!(layout.samples.is_empty());
    }
}
