//! # 标定曲线拟合
//!
//! 用普通最小二乘拟合 `loading ≈ slope · count + intercept`。
//!
//! ## 公式
//! ```text
//! Sxx = Σ(x − x̄)²   Sxy = Σ(x − x̄)(y − ȳ)   Syy = Σ(y − ȳ)²
//! slope     = Sxy / Sxx
//! intercept = ȳ − slope·x̄
//! r         = Sxy / sqrt(Sxx · Syy)
//! ```
//! 其中 x 为平均计数，y 为已知负载量。与 `n·Σxy − Σx·Σy` 形式的公式等价，
//! 但计数很大时不会丢失精度。
//!
//! ## 结果
//! - 少于 2 个可用点：`InsufficientData`
//! - 所有计数相同：`Degenerate`（斜率分母为 0）
//!
//! ## 依赖关系
//! - 被 `session.rs`, `commands/calibrate.rs` 调用
//! - 无外部模块依赖

use serde::Serialize;

/// 拟合得到的标定曲线
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationCurve {
    /// 斜率（µg/cm² 每计数）
    pub slope: f64,
    /// 截距（µg/cm²）
    pub intercept: f64,
    /// Pearson 相关系数；负载量方差为 0 时无定义
    pub r: Option<f64>,
    /// 参与拟合的点数
    pub points: usize,
}

impl CalibrationCurve {
    /// 决定系数 R²
    pub fn r_squared(&self) -> Option<f64> {
        self.r.map(|r| r * r)
    }
}

/// 标定结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration {
    /// 拟合成功
    Fitted(CalibrationCurve),
    /// 可用参考点少于 2 个
    InsufficientData { usable: usize },
    /// 参考点计数全部相同，斜率无定义
    Degenerate { count: f64 },
}

impl Calibration {
    pub fn curve(&self) -> Option<&CalibrationCurve> {
        match self {
            Calibration::Fitted(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, Calibration::Fitted(_))
    }
}

impl std::fmt::Display for Calibration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Calibration::Fitted(c) => {
                write!(
                    f,
                    "loading = {:.6} × counts {} {:.6}",
                    c.slope,
                    if c.intercept < 0.0 { "-" } else { "+" },
                    c.intercept.abs()
                )?;
                match c.r {
                    Some(r) => write!(f, " (r = {:.4}, n = {})", r, c.points),
                    None => write!(f, " (r undefined, n = {})", c.points),
                }
            }
            Calibration::InsufficientData { usable } => write!(
                f,
                "not enough data ({} usable reference{}, need 2)",
                usable,
                if *usable == 1 { "" } else { "s" }
            ),
            Calibration::Degenerate { count } => write!(
                f,
                "calibration undefined — references have identical counts ({:.4})",
                count
            ),
        }
    }
}

/// 拟合标定曲线
///
/// `pairs` 为 (平均计数, 已知负载量)，非有限值的点会被丢弃。
pub fn fit_calibration(pairs: &[(f64, f64)]) -> Calibration {
    let points: Vec<(f64, f64)> = pairs
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let n = points.len();
    if n < 2 {
        return Calibration::InsufficientData { usable: n };
    }

    let first_x = points[0].0;
    if points.iter().all(|&(x, _)| x == first_x) {
        return Calibration::Degenerate { count: first_x };
    }

    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / nf;

    // 先减去均值再累加，避免大计数时 Σx² 与 (Σx)² 相消
    let (sxx, sxy, syy) = points
        .iter()
        .fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), &(x, y)| {
            let (dx, dy) = (x - mean_x, y - mean_y);
            (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
        });

    if !sxx.is_finite() || sxx <= 0.0 {
        return Calibration::Degenerate { count: mean_x };
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Calibration::Degenerate { count: mean_x };
    }

    let r = if syy > 0.0 {
        Some(sxy / (sxx * syy).sqrt())
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(-1.0, 1.0))
    } else {
        None
    };

    Calibration::Fitted(CalibrationCurve {
        slope,
        intercept,
        r,
        points: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_collinear_points() {
        let fit = fit_calibration(&[(10.0, 5.0), (20.0, 10.0), (30.0, 15.0)]);
        let curve = fit.curve().expect("should fit");
        assert!((curve.slope - 0.5).abs() < TOL);
        assert!(curve.intercept.abs() < TOL);
        assert!((curve.r.unwrap() - 1.0).abs() < TOL);
        assert_eq!(curve.points, 3);
    }

    #[test]
    fn test_negative_correlation_with_offset() {
        // y = -2x + 100
        let fit = fit_calibration(&[(1.0, 98.0), (2.0, 96.0), (5.0, 90.0), (10.0, 80.0)]);
        let curve = fit.curve().unwrap();
        assert!((curve.slope + 2.0).abs() < TOL);
        assert!((curve.intercept - 100.0).abs() < TOL);
        assert!((curve.r.unwrap() + 1.0).abs() < TOL);
    }

    #[test]
    fn test_noisy_points() {
        let fit = fit_calibration(&[(1.0, 1.0), (2.0, 3.0), (3.0, 2.0)]);
        let curve = fit.curve().unwrap();
        // x̄=2 ȳ=2, Sxx=2 Sxy=1 Syy=2
        assert!((curve.slope - 0.5).abs() < TOL);
        assert!((curve.intercept - 1.0).abs() < TOL);
        assert!((curve.r.unwrap() - 0.5).abs() < TOL);
        assert!((curve.r_squared().unwrap() - 0.25).abs() < TOL);
    }

    #[test]
    fn test_large_count_offset_stays_exact() {
        let fit = fit_calibration(&[(1e8, 1.0), (1e8 + 1.0, 2.0), (1e8 + 2.0, 3.0)]);
        let curve = fit.curve().expect("distinct counts should fit");
        assert!((curve.slope - 1.0).abs() < TOL);
        assert!((curve.r.unwrap() - 1.0).abs() < TOL);
        assert!((curve.estimate(1e8 + 1.0) - 2.0).abs() < 1e-6);

        let fit = fit_calibration(&[(1e6 + 0.1, 1.0), (1e6 + 0.2, 2.0), (1e6 + 0.3, 3.0)]);
        let curve = fit.curve().unwrap();
        assert!((curve.slope - 10.0).abs() < 1e-6);
        assert!((curve.r.unwrap() - 1.0).abs() < TOL);
        assert!((curve.estimate(1e6 + 0.2) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            fit_calibration(&[]),
            Calibration::InsufficientData { usable: 0 }
        );
        assert_eq!(
            fit_calibration(&[(1.0, 2.0)]),
            Calibration::InsufficientData { usable: 1 }
        );
        // 非有限点不计入
        assert_eq!(
            fit_calibration(&[(1.0, 2.0), (f64::NAN, 3.0), (2.0, f64::INFINITY)]),
            Calibration::InsufficientData { usable: 1 }
        );
    }

    #[test]
    fn test_identical_counts_are_degenerate() {
        let fit = fit_calibration(&[(5.0, 1.0), (5.0, 2.0)]);
        assert_eq!(fit, Calibration::Degenerate { count: 5.0 });
        assert!(fit.curve().is_none());

        let fit = fit_calibration(&[(0.1, 1.0), (0.1, 2.0), (0.1, 3.0)]);
        assert!(matches!(fit, Calibration::Degenerate { .. }));
    }

    #[test]
    fn test_flat_loading_has_undefined_r() {
        let fit = fit_calibration(&[(1.0, 4.0), (2.0, 4.0), (3.0, 4.0)]);
        let curve = fit.curve().unwrap();
        assert!(curve.slope.abs() < TOL);
        assert!((curve.intercept - 4.0).abs() < TOL);
        assert_eq!(curve.r, None);
    }

    #[test]
    fn test_display_messages() {
        let msg = fit_calibration(&[(5.0, 1.0), (5.0, 2.0)]).to_string();
        assert!(msg.contains("identical counts"));

        let msg = fit_calibration(&[]).to_string();
        assert!(msg.contains("not enough data"));
    }
}
