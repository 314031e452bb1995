use crate::dialect::DialectId;
use serde::{Deserialize, Serialize};

pub const URF_FORMAT_VERSION: &str = "1.0";

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// A raw rule file found on disk. Ephemeral: produced by the reader,
/// consumed by the canonicalizer.
#[derive(Debug, Clone)]
pub struct DetectedRuleFile {
    pub dialect: DialectId,
    pub relative_path: String,
    pub raw_content: String,
    pub size_bytes: u64,
}

/// The canonical, dialect-independent rule document. Immutable once built;
/// this is the unit that gets serialized and encrypted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UniversalRuleFormat {
    pub format_version: String,
    pub metadata: UrfMetadata,
    pub rules: RuleBuckets,
}

/// `source_dialect` stays a plain string on the wire so a payload produced
/// by a newer deployment with extra dialects still deserializes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrfMetadata {
    pub source_dialect: String,
    pub created_at: String,
    pub total_size_bytes: u64,
    pub file_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleBuckets {
    pub general: Vec<String>,
    pub code_style: Vec<String>,
    pub behavior: Vec<String>,
    pub project_specific: Vec<String>,
    /// Lossless fallback: full source content. Categorized buckets are a
    /// best-effort decomposition and may be empty while `raw` is not.
    pub raw: String,
}

impl RuleBuckets {
    pub fn categorized_count(&self) -> usize {
        self.general.len() + self.code_style.len() + self.behavior.len()
            + self.project_specific.len()
    }
}

/// Output of password-based authenticated encryption. All fields hex-encoded
/// and independently transportable. The password itself is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPayload {
    pub ciphertext: String,
    pub salt: String,
    pub iv: String,
    pub auth_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleFile {
    pub relative_path: String,
    pub content: String,
}

/// The renderer's output: one target dialect's file set.
/// `dialect` is a string so unknown targets can fall through to the
/// generic rendering instead of being unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedRuleSet {
    pub dialect: String,
    pub files: Vec<RuleFile>,
}

// --- CLI report structs (`--json` output schema) ---

#[derive(Serialize)]
pub struct DetectReport {
    pub dialect: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanItem {
    pub dialect: String,
    pub path: String,
    pub size_bytes: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareReport {
    pub share_code: String,
    pub password: String,
    pub source_dialect: String,
    pub files: Vec<String>,
    pub total_size_bytes: u64,
    pub expires_at: String,
    pub max_uses: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub source_dialect: String,
    pub target_dialect: String,
    pub files_written: Vec<String>,
    pub backups: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertReport {
    pub source_dialect: String,
    pub target_dialect: String,
    pub files_written: Vec<String>,
    pub backups: Vec<String>,
}
