//! One-way analysis of variance.
//!
//! `one_way` decomposes the total sum of squares of grouped observations
//! into between-group and within-group parts. `AnovaTable::summarize` then
//! attaches the F critical value and the p-value.

use std::fmt;

use serde::Serialize;

use crate::fdist::FDistribution;

/// Error type for ANOVA computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnovaError {
    /// No groups were supplied.
    #[error("at least one group is required")]
    NoGroups,

    /// A group has no observations.
    #[error("group {0} has no observations")]
    EmptyGroup(usize),

    /// An observation is NaN or infinite.
    #[error("group {group} contains a non-finite value at position {position}")]
    NonFinite { group: usize, position: usize },

    /// A sum, mean or ratio exceeded the range of `f64`.
    #[error("values are too large to analyze")]
    Overflow,

    /// Significance level outside (0, 1).
    #[error("significance level must be in (0, 1), got {0}")]
    InvalidAlpha(f64),
}

/// Source of variation in an ANOVA table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    #[serde(rename = "Between Groups")]
    BetweenGroups,
    #[serde(rename = "Within Groups")]
    WithinGroups,
    #[serde(rename = "Total")]
    Total,
}

impl Source {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Source::BetweenGroups => "Between Groups",
            Source::WithinGroups => "Within Groups",
            Source::Total => "Total",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of an ANOVA table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaRow {
    pub source: Source,
    /// Sum of squares.
    pub ss: f64,
    /// Degrees of freedom.
    pub df: usize,
    /// Mean square; absent on the total row.
    pub ms: Option<f64>,
    /// F statistic; only present on the between-groups row.
    pub f: Option<f64>,
}

/// Result of the sum-of-squares decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaTable {
    /// Number of groups.
    pub k: usize,
    /// Total number of observations.
    pub n_total: usize,
    pub grand_mean: f64,
    pub group_means: Vec<f64>,
    pub ss_between: f64,
    pub ss_within: f64,
    pub ss_total: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub ms_between: f64,
    pub ms_within: f64,
    pub f_statistic: f64,
}

/// Compute a one-way ANOVA over the given groups.
///
/// Mean squares with zero degrees of freedom are reported as 0, and the F
/// statistic is 0 when the within-group mean square is 0. Finite inputs whose
/// sums overflow are rejected with [`AnovaError::Overflow`].
pub fn one_way<G: AsRef<[f64]>>(groups: &[G]) -> Result<AnovaTable, AnovaError> {
    if groups.is_empty() {
        return Err(AnovaError::NoGroups);
    }

    for (group, values) in groups.iter().enumerate() {
        let values = values.as_ref();
        if values.is_empty() {
            return Err(AnovaError::EmptyGroup(group));
        }
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(AnovaError::NonFinite { group, position });
        }
    }

    let k = groups.len();
    let n_total: usize = groups.iter().map(|g| g.as_ref().len()).sum();
    let grand_sum: f64 = groups.iter().flat_map(|g| g.as_ref().iter()).sum();
    let grand_mean = grand_sum / n_total as f64;

    let group_means: Vec<f64> = groups
        .iter()
        .map(|g| {
            let g = g.as_ref();
            g.iter().sum::<f64>() / g.len() as f64
        })
        .collect();

    let ss_total: f64 = groups
        .iter()
        .flat_map(|g| g.as_ref().iter())
        .map(|x| (x - grand_mean).powi(2))
        .sum();

    let ss_between: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, mean)| g.as_ref().len() as f64 * (mean - grand_mean).powi(2))
        .sum();

    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, mean)| g.as_ref().iter().map(|x| (x - mean).powi(2)).sum::<f64>())
        .sum();

    let df_between = k - 1;
    let df_within = n_total - k;

    let ms_between = if df_between > 0 {
        ss_between / df_between as f64
    } else {
        0.0
    };
    let ms_within = if df_within > 0 {
        ss_within / df_within as f64
    } else {
        0.0
    };
    let f_statistic = if ms_within > 0.0 {
        ms_between / ms_within
    } else {
        0.0
    };

    let statistics = [
        grand_mean,
        ss_between,
        ss_within,
        ss_total,
        ms_between,
        ms_within,
        f_statistic,
    ];
    if statistics.iter().chain(&group_means).any(|v| !v.is_finite()) {
        return Err(AnovaError::Overflow);
    }

    Ok(AnovaTable {
        k,
        n_total,
        grand_mean,
        group_means,
        ss_between,
        ss_within,
        ss_total,
        df_between,
        df_within,
        ms_between,
        ms_within,
        f_statistic,
    })
}

impl AnovaTable {
    /// The between, within, and total rows in display order.
    #[must_use]
    pub fn rows(&self) -> [AnovaRow; 3] {
        [
            AnovaRow {
                source: Source::BetweenGroups,
                ss: self.ss_between,
                df: self.df_between,
                ms: Some(self.ms_between),
                f: Some(self.f_statistic),
            },
            AnovaRow {
                source: Source::WithinGroups,
                ss: self.ss_within,
                df: self.df_within,
                ms: Some(self.ms_within),
                f: None,
            },
            AnovaRow {
                source: Source::Total,
                ss: self.ss_total,
                df: self.n_total - 1,
                ms: None,
                f: None,
            },
        ]
    }

    /// F distribution for this table, if both degrees of freedom are positive.
    fn distribution(&self) -> Option<FDistribution> {
        if self.df_between == 0 || self.df_within == 0 {
            return None;
        }
        FDistribution::new(self.df_between as f64, self.df_within as f64).ok()
    }

    /// Attach the critical value at `1 - alpha` and the p-value.
    pub fn summarize(self, alpha: f64) -> Result<AnovaSummary, AnovaError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(AnovaError::InvalidAlpha(alpha));
        }

        let dist = self.distribution();
        let critical_value = dist.and_then(|d| d.inverse_cdf(1.0 - alpha).ok());
        let p_value = dist
            .filter(|_| self.ms_within > 0.0)
            .map(|d| d.sf(self.f_statistic));

        Ok(AnovaSummary {
            table: self,
            alpha,
            critical_value,
            p_value,
        })
    }
}

/// Hypothesis-test decision against the critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    Reject,
    FailToReject,
}

impl Decision {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Decision::Reject => "Reject the null hypothesis.",
            Decision::FailToReject => "Fail to reject the null hypothesis.",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of comparing the p-value with the significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Significance {
    Significant,
    NotSignificant,
    /// The p-value is undefined (too few groups or no within-group spread).
    Undetermined,
}

/// ANOVA table with its test statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaSummary {
    pub table: AnovaTable,
    pub alpha: f64,
    /// `None` when either degree of freedom is zero.
    pub critical_value: Option<f64>,
    /// `None` when the F statistic is undefined.
    pub p_value: Option<f64>,
}

impl AnovaSummary {
    #[must_use]
    pub fn f_statistic(&self) -> f64 {
        self.table.f_statistic
    }

    /// Reject when F exceeds the critical value.
    #[must_use]
    pub fn decision(&self) -> Decision {
        match self.critical_value {
            Some(cv) if self.table.f_statistic > cv => Decision::Reject,
            _ => Decision::FailToReject,
        }
    }

    #[must_use]
    pub fn significance(&self) -> Significance {
        match self.p_value {
            Some(p) if p < self.alpha => Significance::Significant,
            Some(p) if p >= self.alpha => Significance::NotSignificant,
            _ => Significance::Undetermined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn textbook_groups() -> Vec<Vec<f64>> {
        vec![
            vec![5.0, 6.0, 7.0, 8.0, 9.0],
            vec![3.0, 4.0, 5.0, 2.0, 6.0],
            vec![8.0, 7.0, 9.0, 6.0, 10.0],
        ]
    }

    #[test]
    fn textbook_decomposition() {
        let table = one_way(&textbook_groups()).unwrap();
        assert_eq!(table.k, 3);
        assert_eq!(table.n_total, 15);
        assert_close(table.grand_mean, 95.0 / 15.0);
        assert_close(table.ss_between, 130.0 / 3.0);
        assert_close(table.ss_within, 30.0);
        assert_close(table.ss_total, 220.0 / 3.0);
        assert_eq!(table.df_between, 2);
        assert_eq!(table.df_within, 12);
        assert_close(table.ms_between, 65.0 / 3.0);
        assert_close(table.ms_within, 2.5);
        assert_close(table.f_statistic, 26.0 / 3.0);
    }

    #[test]
    fn rows_layout() {
        let rows = one_way(&textbook_groups()).unwrap().rows();
        assert_eq!(rows[0].source, Source::BetweenGroups);
        assert_eq!(rows[1].source, Source::WithinGroups);
        assert_eq!(rows[2].source, Source::Total);
        assert!(rows[0].f.is_some());
        assert!(rows[1].f.is_none());
        assert!(rows[2].ms.is_none());
        assert_eq!(rows[2].df, 14);
    }

    #[test]
    fn summary_rejects_for_separated_groups() {
        let summary = one_way(&textbook_groups()).unwrap().summarize(0.05).unwrap();
        let cv = summary.critical_value.unwrap();
        assert!((cv - 3.885_293_834_652_393).abs() < 1e-8);
        assert_eq!(summary.decision(), Decision::Reject);
        assert_eq!(summary.significance(), Significance::Significant);
        let p = summary.p_value.unwrap();
        assert!((p - 0.004_687_259_216_589_213).abs() < 1e-10, "p = {p}");
    }

    #[test]
    fn identical_groups_fail_to_reject() {
        let groups = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]];
        let summary = one_way(&groups).unwrap().summarize(0.05).unwrap();
        assert_close(summary.f_statistic(), 0.0);
        assert_eq!(summary.decision(), Decision::FailToReject);
        assert_eq!(summary.significance(), Significance::NotSignificant);
        assert_close(summary.p_value.unwrap(), 1.0);
    }

    #[test]
    fn single_group_has_no_between_variation() {
        let table = one_way(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(table.df_between, 0);
        assert_close(table.ms_between, 0.0);
        assert_close(table.f_statistic, 0.0);
        let summary = table.summarize(0.05).unwrap();
        assert!(summary.critical_value.is_none());
        assert!(summary.p_value.is_none());
        assert_eq!(summary.decision(), Decision::FailToReject);
        assert_eq!(summary.significance(), Significance::Undetermined);
    }

    #[test]
    fn singleton_groups_have_no_within_df() {
        let table = one_way(&[vec![1.0], vec![4.0], vec![2.0]]).unwrap();
        assert_eq!(table.df_within, 0);
        assert_close(table.ms_within, 0.0);
        assert_close(table.f_statistic, 0.0);
        assert_close(table.ss_within, 0.0);
        assert_close(table.ss_total, table.ss_between);
    }

    #[test]
    fn zero_within_spread_gives_zero_f() {
        let table = one_way(&[vec![2.0, 2.0], vec![5.0, 5.0]]).unwrap();
        assert_close(table.ms_within, 0.0);
        assert_close(table.f_statistic, 0.0);
        let summary = table.summarize(0.05).unwrap();
        assert!(summary.critical_value.is_some());
        assert!(summary.p_value.is_none());
    }

    #[test]
    fn unequal_group_sizes() {
        let groups = vec![vec![10.0, 12.0], vec![20.0, 22.0, 24.0, 26.0]];
        let table = one_way(&groups).unwrap();
        assert_eq!(table.n_total, 6);
        assert_close(table.group_means[0], 11.0);
        assert_close(table.group_means[1], 23.0);
        assert_close(table.ss_total, table.ss_between + table.ss_within);
    }

    #[test]
    fn errors() {
        let empty: Vec<Vec<f64>> = Vec::new();
        assert_eq!(one_way(&empty), Err(AnovaError::NoGroups));
        assert_eq!(
            one_way(&[vec![1.0], vec![]]),
            Err(AnovaError::EmptyGroup(1))
        );
        assert_eq!(
            one_way(&[vec![1.0, f64::NAN]]),
            Err(AnovaError::NonFinite {
                group: 0,
                position: 1
            })
        );
    }

    #[test]
    fn overflowing_sums_are_rejected() {
        let groups = vec![vec![1e308, 1e308], vec![-1e308, 1.5e308]];
        assert_eq!(one_way(&groups), Err(AnovaError::Overflow));

        // Squared deviations overflow even though every sum fits
        let groups = vec![vec![-1e200, 1e200], vec![0.0, 0.0]];
        assert_eq!(one_way(&groups), Err(AnovaError::Overflow));
    }

    #[test]
    fn large_finite_values_still_analyze() {
        let groups = vec![vec![1e150, 2e150], vec![3e150, 4e150]];
        let table = one_way(&groups).unwrap();
        assert!(table.ss_total.is_finite());
        assert!((table.f_statistic - 8.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_alpha() {
        let table = one_way(&textbook_groups()).unwrap();
        assert_eq!(
            table.clone().summarize(0.0),
            Err(AnovaError::InvalidAlpha(0.0))
        );
        assert!(table.summarize(1.5).is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(Source::BetweenGroups.to_string(), "Between Groups");
        assert_eq!(Decision::Reject.to_string(), "Reject the null hypothesis.");
        assert_eq!(
            Decision::FailToReject.label(),
            "Fail to reject the null hypothesis."
        );
    }
}
