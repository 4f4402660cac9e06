use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::filter::{FilterPolicy, LengthBounds};
use crate::fix::FixPolicy;
use crate::genome::Policy;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixConfig {
    pub terminal_ns: bool,
    pub start_stop_codons: bool,
    pub min_first_cds_segment: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BoundsConfig {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    pub cds_length: BoundsConfig,
    pub exon_length: BoundsConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    pub fixes: FixConfig,
    pub filters: FilterConfig,
}

impl PolicyConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.fixes.min_first_cds_segment == Some(0) {
            bail!("minFirstCdsSegment must be at least 1");
        }
        validate_bounds("cdsLength", &self.filters.cds_length)?;
        validate_bounds("exonLength", &self.filters.exon_length)?;
        Ok(())
    }

    #[must_use]
    pub fn to_policy(&self) -> Policy {
        let bounds = |b: &BoundsConfig| LengthBounds::new(b.min, b.max);
        Policy {
            fix: FixPolicy {
                terminal_ns: self.fixes.terminal_ns,
                start_stop_codons: self.fixes.start_stop_codons,
                min_first_cds_segment: self.fixes.min_first_cds_segment,
            },
            filter: FilterPolicy {
                cds_length: bounds(&self.filters.cds_length),
                exon_length: bounds(&self.filters.exon_length),
            },
        }
    }
}

fn validate_bounds(name: &str, bounds: &BoundsConfig) -> Result<()> {
    if let (Some(min), Some(max)) = (bounds.min, bounds.max)
        && min > max
    {
        bail!("invalid bounds for '{name}': min {min} exceeds max {max}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn valid_config_all_fields() {
        let json = r#"{
            "fixes": { "terminalNs": true, "startStopCodons": true, "minFirstCdsSegment": 3 },
            "filters": {
                "cdsLength": { "min": 150 },
                "exonLength": { "min": 3, "max": 10000 }
            }
        }"#;
        let f = write_config(json);
        let policy = PolicyConfig::from_file(f.path()).unwrap().to_policy();
        assert!(policy.fix.terminal_ns);
        assert!(policy.fix.start_stop_codons);
        assert_eq!(policy.fix.min_first_cds_segment, Some(3));
        assert_eq!(policy.filter.cds_length, LengthBounds::new(Some(150), None));
        assert_eq!(policy.filter.exon_length, LengthBounds::new(Some(3), Some(10000)));
    }

    #[test]
    fn empty_object_is_the_default_policy() {
        let f = write_config("{}");
        let policy = PolicyConfig::from_file(f.path()).unwrap().to_policy();
        assert_eq!(policy, Policy::default());
    }

    #[test]
    fn min_above_max() {
        let json = r#"{ "filters": { "cdsLength": { "min": 500, "max": 100 } } }"#;
        let f = write_config(json);
        let err = PolicyConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("invalid bounds for 'cdsLength'"));
    }

    #[test]
    fn zero_segment_minimum() {
        let f = write_config(r#"{ "fixes": { "minFirstCdsSegment": 0 } }"#);
        let err = PolicyConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("minFirstCdsSegment"));
    }

    #[test]
    fn malformed_json() {
        let f = write_config("{ fixes: ");
        let err = PolicyConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }
}
