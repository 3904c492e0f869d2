// ── Metric grouping ──

use indexmap::IndexMap;

use kinetic_api::Metric;

/// All metrics of one type, in the order the backend returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricGroup {
    pub metric_type: String,
    pub metrics: Vec<Metric>,
}

/// Group metrics by `metric_type`.
///
/// Groups appear in first-seen order; nothing is deduplicated or sorted.
pub fn group_metrics(metrics: &[Metric]) -> Vec<MetricGroup> {
    let mut groups: IndexMap<&str, Vec<Metric>> = IndexMap::new();
    for metric in metrics {
        groups
            .entry(metric.metric_type.as_str())
            .or_default()
            .push(metric.clone());
    }
    groups
        .into_iter()
        .map(|(metric_type, metrics)| MetricGroup {
            metric_type: metric_type.to_owned(),
            metrics,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn metric(metric_type: &str, timestamp: &str, value: f64) -> Metric {
        Metric {
            device_id: "100-1".into(),
            timestamp: timestamp.into(),
            metric_type: metric_type.into(),
            value,
            unit: "u".into(),
        }
    }

    #[test]
    fn groups_by_first_seen_type() {
        let metrics = vec![
            metric("temp", "2024-01-01T00:00:00Z", 20.0),
            metric("temp", "2024-01-01T01:00:00Z", 21.0),
            metric("volt", "2024-01-01T00:30:00Z", 230.0),
        ];

        let groups = group_metrics(&metrics);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].metric_type, "temp");
        assert_eq!(groups[0].metrics, metrics[..2].to_vec());
        assert_eq!(groups[1].metric_type, "volt");
        assert_eq!(groups[1].metrics, vec![metrics[2].clone()]);
    }

    #[test]
    fn interleaved_types_keep_relative_order() {
        let metrics = vec![
            metric("volt", "t1", 1.0),
            metric("temp", "t2", 2.0),
            metric("volt", "t3", 3.0),
            metric("volt", "t3", 3.0),
        ];

        let groups = group_metrics(&metrics);
        let volts: Vec<&str> = groups[0].metrics.iter().map(|m| m.timestamp.as_str()).collect();

        assert_eq!(groups[0].metric_type, "volt");
        assert_eq!(volts, ["t1", "t3", "t3"]);
        assert_eq!(groups[1].metric_type, "temp");
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_metrics(&[]).is_empty());
    }
}
