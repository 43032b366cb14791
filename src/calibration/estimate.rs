//! # 负载量估计
//!
//! 将标定曲线应用到样本的平均计数上。曲线或计数缺失时结果为 None
//! （显示为 "not enough data"）。
//!
//! ## 依赖关系
//! - 被 `session.rs` 调用
//! - 使用 `calibration/fit.rs` 的 CalibrationCurve

use crate::calibration::CalibrationCurve;

impl CalibrationCurve {
    /// slope · count + intercept
    pub fn estimate(&self, count: f64) -> f64 {
        self.slope * count + self.intercept
    }
}

/// 估计负载量（µg/cm²）
pub fn estimate_loading(curve: Option<&CalibrationCurve>, count: Option<f64>) -> Option<f64> {
    let curve = curve?;
    let count = count?;
    Some(curve.estimate(count)).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> CalibrationCurve {
        CalibrationCurve {
            slope: 0.5,
            intercept: 2.0,
            r: Some(1.0),
            points: 2,
        }
    }

    #[test]
    fn test_estimate() {
        assert_eq!(estimate_loading(Some(&curve()), Some(10.0)), Some(7.0));
        assert_eq!(curve().estimate(0.0), 2.0);
    }

    #[test]
    fn test_absent_inputs() {
        assert_eq!(estimate_loading(None, Some(10.0)), None);
        assert_eq!(estimate_loading(Some(&curve()), None), None);
        assert_eq!(estimate_loading(None, None), None);
    }

    #[test]
    fn test_non_finite_result_is_absent() {
        assert_eq!(estimate_loading(Some(&curve()), Some(f64::NAN)), None);
        assert_eq!(estimate_loading(Some(&curve()), Some(f64::INFINITY)), None);
    }
}
