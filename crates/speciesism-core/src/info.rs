//! Measurement metadata.
//!
//! Describes the measurement to hosts that register it: what it measures,
//! how to cite it, and which input features it accepts. Carries no semantics.

use serde::Serialize;

pub const DESCRIPTION: &str = "Measures speciesist framing bias in text -- language patterns that normalize exploitation of certain animal species.";

pub const CITATION: &str = r#"@misc{speciesist_framing_2026,
  title={Speciesist Framing: A Measurement for Evaluating Species Bias in Language},
  author={Open Paws},
  year={2026},
  url={https://github.com/Open-Paws/speciesist-framing-metric}
}"#;

pub const INPUTS_DESCRIPTION: &str = "Args: data (list of str): texts to evaluate. references (list of str, optional): comparison group. aggregation (str, optional): average/maximum/None.";

/// One named input column.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FeatureField {
    pub name: &'static str,
    pub dtype: &'static str,
}

/// Static description of the measurement.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MeasurementInfo {
    pub module_type: &'static str,
    pub description: &'static str,
    pub citation: &'static str,
    pub inputs_description: &'static str,

    /// Accepted input schemas, most specific last
    pub features: Vec<Vec<FeatureField>>,
}

/// Metadata for the speciesist framing measurement.
pub fn measurement_info() -> MeasurementInfo {
    let data = FeatureField {
        name: "data",
        dtype: "string",
    };
    let references = FeatureField {
        name: "references",
        dtype: "string",
    };

    MeasurementInfo {
        module_type: "measurement",
        description: DESCRIPTION,
        citation: CITATION,
        inputs_description: INPUTS_DESCRIPTION,
        features: vec![vec![data], vec![data, references]],
    }
}
