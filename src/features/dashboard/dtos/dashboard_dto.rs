use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregated complaint statistics for the caller's scope.
///
/// Citizens see their own complaints, agency staff their agency's, admins
/// everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub rejected: i64,
    /// Percentage of complaints with at least one response, rounded to the
    /// nearest integer. Zero when there are no complaints.
    pub response_rate: i64,
}

impl DashboardStatsDto {
    pub fn from_counts(
        total: i64,
        pending: i64,
        in_progress: i64,
        resolved: i64,
        rejected: i64,
        responded: i64,
    ) -> Self {
        let response_rate = if total > 0 {
            ((responded as f64 / total as f64) * 100.0).round() as i64
        } else {
            0
        };
        Self {
            total,
            pending,
            in_progress,
            resolved,
            rejected,
            response_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_rate_rounds_to_nearest_integer() {
        let stats = DashboardStatsDto::from_counts(3, 1, 1, 1, 0, 1);
        assert_eq!(stats.response_rate, 33);

        let stats = DashboardStatsDto::from_counts(3, 0, 0, 3, 0, 2);
        assert_eq!(stats.response_rate, 67);
    }

    #[test]
    fn response_rate_is_zero_without_complaints() {
        let stats = DashboardStatsDto::from_counts(0, 0, 0, 0, 0, 0);
        assert_eq!(stats.response_rate, 0);
    }

    #[test]
    fn full_coverage_is_one_hundred() {
        let stats = DashboardStatsDto::from_counts(4, 0, 0, 4, 0, 4);
        assert_eq!(stats.response_rate, 100);
    }
}
