use crate::config::DictionaryMode;
use crate::resolver::Resolution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for a merge report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Version of the report format
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: DateTime<Utc>,

    /// Dictionary semantics used during normalization
    pub dictionary_mode: DictionaryMode,

    /// Whether conflict resolution was applied
    pub merge_enabled: bool,

    /// Crate version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composer_version: Option<String>,
}

/// Counts describing a single composition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportStatistics {
    /// Tokens produced by normalization
    pub token_count: usize,

    /// Classes after splitting tokens on whitespace
    pub class_count: usize,

    /// Classes surviving conflict resolution
    pub kept_count: usize,

    /// Classes dropped by a later conflicting class
    pub overridden_count: usize,

    /// Processing time in microseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_us: Option<u64>,
}

/// Everything produced by one collect-and-merge run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    pub metadata: ReportMetadata,

    /// Normalized tokens in traversal order
    pub tokens: Vec<String>,

    /// Final merged class string
    pub merged: String,

    /// Classes removed during conflict resolution, in input order
    pub overridden: Vec<String>,

    pub statistics: ReportStatistics,
}

impl MergeReport {
    /// Create an empty report with default metadata
    pub fn new() -> Self {
        Self {
            metadata: ReportMetadata {
                version: "1.0.0".to_string(),
                generated_at: Utc::now(),
                dictionary_mode: DictionaryMode::default(),
                merge_enabled: true,
                composer_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
            tokens: Vec::new(),
            merged: String::new(),
            overridden: Vec::new(),
            statistics: ReportStatistics::default(),
        }
    }

    /// Convert report to JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Convert report to pretty JSON string
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for MergeReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating merge reports
pub struct ReportBuilder {
    report: MergeReport,
    start_time: Option<std::time::Instant>,
}

impl ReportBuilder {
    /// Create a new report builder; processing time is measured from here
    pub fn new() -> Self {
        Self {
            report: MergeReport::new(),
            start_time: Some(std::time::Instant::now()),
        }
    }

    pub fn with_dictionary_mode(mut self, mode: DictionaryMode) -> Self {
        self.report.metadata.dictionary_mode = mode;
        self
    }

    pub fn with_merge_enabled(mut self, enabled: bool) -> Self {
        self.report.metadata.merge_enabled = enabled;
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.report.statistics.token_count = tokens.len();
        self.report.tokens = tokens;
        self
    }

    /// Record the outcome of conflict resolution
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        let stats = &mut self.report.statistics;
        stats.kept_count = resolution.kept.len();
        stats.overridden_count = resolution.overridden.len();
        stats.class_count = stats.kept_count + stats.overridden_count;

        self.report.merged = resolution.merged();
        self.report.overridden = resolution.overridden;
        self
    }

    pub fn build(mut self) -> MergeReport {
        self.report.statistics.processing_time_us =
            self.start_time.map(|t| t.elapsed().as_micros() as u64);
        self.report
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
