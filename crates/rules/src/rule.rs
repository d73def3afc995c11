use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Resource identifier that system-level rules are registered under.
/// Every rule guards the global inbound traffic entry, not one resource.
pub const TOTAL_INBOUND_RESOURCE: &str = "__total_inbound_traffic__";

/// System signal a rule watches. The integer discriminants are the wire
/// representation; decoding an unknown value fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MetricType {
    Load = 0,
    AvgRt = 1,
    Concurrency = 2,
    InboundQps = 3,
    CpuUsage = 4,
}

impl TryFrom<u8> for MetricType {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Load),
            1 => Ok(Self::AvgRt),
            2 => Ok(Self::Concurrency),
            3 => Ok(Self::InboundQps),
            4 => Ok(Self::CpuUsage),
            other => Err(RuleError::InvalidRule(format!(
                "invalid metric type {other}"
            ))),
        }
    }
}

impl From<MetricType> for u8 {
    fn from(m: MetricType) -> Self {
        m as u8
    }
}

/// How the threshold adapts at runtime. Carried through unchanged; only
/// the evaluation engine interprets it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdaptiveStrategy {
    #[default]
    NoAdaptive,
    Bbr,
}

/// One protection condition for one metric type. Immutable once accepted
/// into the active index; the store replaces whole rule sets, never
/// individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    pub metric_type: MetricType,
    pub trigger_count: f64,
    #[serde(default)]
    pub strategy: AdaptiveStrategy,
}

impl Rule {
    pub fn new(metric_type: MetricType, trigger_count: f64) -> Self {
        Self {
            id: String::new(),
            metric_type,
            trigger_count,
            strategy: AdaptiveStrategy::NoAdaptive,
        }
    }

    /// Resource this rule is registered under in the check-slot chain.
    pub fn resource_name(&self) -> &'static str {
        TOTAL_INBOUND_RESOURCE
    }
}

/// Checks one candidate rule. Pure; usable without a store.
pub fn validate(rule: &Rule) -> Result<(), RuleError> {
    if rule.trigger_count < 0.0 {
        return Err(RuleError::InvalidRule("negative threshold".into()));
    }
    if rule.metric_type == MetricType::CpuUsage && rule.trigger_count > 1.0 {
        return Err(RuleError::InvalidRule(
            "invalid CPU usage, valid range is [0.0, 1.0]".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_thresholds() {
        assert!(validate(&Rule::new(MetricType::Load, 8.0)).is_ok());
        assert!(validate(&Rule::new(MetricType::InboundQps, 0.0)).is_ok());
    }

    #[test]
    fn rejects_negative_threshold() {
        let r = Rule::new(MetricType::Concurrency, -1.0);
        assert!(validate(&r).is_err());
    }

    #[test]
    fn cpu_usage_boundaries() {
        assert!(validate(&Rule::new(MetricType::CpuUsage, 1.0)).is_ok());
        assert!(validate(&Rule::new(MetricType::CpuUsage, 1.0001)).is_err());
    }

    #[test]
    fn metric_type_out_of_range() {
        assert!(MetricType::try_from(4).is_ok());
        assert!(MetricType::try_from(5).is_err());
        assert!(MetricType::try_from(99).is_err());
    }

    #[test]
    fn metric_type_wire_round_trip() {
        for m in [
            MetricType::Load,
            MetricType::AvgRt,
            MetricType::Concurrency,
            MetricType::InboundQps,
            MetricType::CpuUsage,
        ] {
            assert_eq!(MetricType::try_from(u8::from(m)).unwrap(), m);
        }
    }

    #[test]
    fn deserialize_rejects_unknown_metric_type() {
        let json = r#"{"metric_type": 7, "trigger_count": 1.0}"#;
        assert!(serde_json::from_str::<Rule>(json).is_err());
    }

    #[test]
    fn deserialize_defaults() {
        let json = r#"{"metric_type": 4, "trigger_count": 0.8}"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.id.is_empty());
        assert_eq!(rule.metric_type, MetricType::CpuUsage);
        assert_eq!(rule.strategy, AdaptiveStrategy::NoAdaptive);
    }

    #[test]
    fn resource_name_is_global_inbound() {
        let r = Rule::new(MetricType::Load, 4.0);
        assert_eq!(r.resource_name(), TOTAL_INBOUND_RESOURCE);
    }
}
