//! @ai:module:intent Algorithm catalog entries and execution records
//! @ai:module:layer domain
//! @ai:module:public_api Algorithm, AlgorithmDraft, ExecutionRecord, ExecutionDraft
//! @ai:module:stateless true

use crate::catalog::category::AlgorithmCategory;
use crate::catalog::fields::FieldReader;
use crate::error::{ApiError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME_MAX_LEN: usize = 100;
pub const COMPLEXITY_MAX_LEN: usize = 50;

/// @ai:intent A catalogued algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Algorithm {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub algorithm_type: AlgorithmCategory,
    pub complexity_time: String,
    pub complexity_space: String,
    pub code_sample: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// @ai:intent Validated input for creating or replacing an algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmDraft {
    pub name: String,
    pub description: String,
    pub algorithm_type: AlgorithmCategory,
    pub complexity_time: String,
    pub complexity_space: String,
    pub code_sample: String,
}

impl AlgorithmDraft {
    /// @ai:intent Validate a request body into a draft
    /// @ai:effects pure
    pub fn from_json(body: &Value) -> Result<Self> {
        let mut reader = FieldReader::new(body);

        let name = reader.string("name", Some(NAME_MAX_LEN));
        let description = reader.string("description", None);
        let algorithm_type = reader.choice("algorithm_type", AlgorithmCategory::parse);
        let complexity_time = reader.string("complexity_time", Some(COMPLEXITY_MAX_LEN));
        let complexity_space = reader.string("complexity_space", Some(COMPLEXITY_MAX_LEN));
        let code_sample = reader.string("code_sample", None);

        let errors = reader.into_errors();

        match (
            name,
            description,
            algorithm_type,
            complexity_time,
            complexity_space,
            code_sample,
        ) {
            (
                Some(name),
                Some(description),
                Some(algorithm_type),
                Some(complexity_time),
                Some(complexity_space),
                Some(code_sample),
            ) if errors.is_empty() => Ok(Self {
                name,
                description,
                algorithm_type,
                complexity_time,
                complexity_space,
                code_sample,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }

    /// @ai:intent Validate a partial update by overlaying the given fields on the stored ones
    /// @ai:post errors can only name fields present in `patch`
    /// @ai:effects pure
    pub fn from_patch(current: &Algorithm, patch: &Value) -> Result<Self> {
        let Some(changes) = patch.as_object() else {
            return Self::from_json(patch);
        };

        let mut merged = serde_json::to_value(current.draft())?;
        if let Value::Object(fields) = &mut merged {
            for (field, value) in changes {
                fields.insert(field.clone(), value.clone());
            }
        }

        Self::from_json(&merged)
    }

    /// @ai:intent Re-check a draft built outside the HTTP path (seed files)
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        let body = serde_json::to_value(self)?;
        Self::from_json(&body).map(|_| ())
    }

    /// @ai:intent Materialize the draft as a stored algorithm
    /// @ai:effects pure
    pub fn into_algorithm(self, id: u64, now: DateTime<Utc>) -> Algorithm {
        Algorithm {
            id,
            name: self.name,
            description: self.description,
            algorithm_type: self.algorithm_type,
            complexity_time: self.complexity_time,
            complexity_space: self.complexity_space,
            code_sample: self.code_sample,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Algorithm {
    /// @ai:intent Editable fields of this algorithm as a draft
    /// @ai:effects pure
    pub fn draft(&self) -> AlgorithmDraft {
        AlgorithmDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            algorithm_type: self.algorithm_type,
            complexity_time: self.complexity_time.clone(),
            complexity_space: self.complexity_space.clone(),
            code_sample: self.code_sample.clone(),
        }
    }

    /// @ai:intent Replace all editable fields, keeping identity and creation time
    /// @ai:effects state:write
    pub fn apply(&mut self, draft: AlgorithmDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.algorithm_type = draft.algorithm_type;
        self.complexity_time = draft.complexity_time;
        self.complexity_space = draft.complexity_space;
        self.code_sample = draft.code_sample;
        self.updated_at = now;
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.algorithm_type)
    }
}

/// @ai:intent One measured run of an algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub id: u64,
    pub algorithm: u64,
    /// Resolved from the referenced algorithm at write time
    pub algorithm_name: String,
    pub array_size: u64,
    /// Milliseconds
    pub execution_time: f64,
    pub comparisons: u64,
    pub swaps: u64,
    pub created_at: DateTime<Utc>,
}

/// @ai:intent Validated input for recording an execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDraft {
    pub algorithm: u64,
    pub array_size: u64,
    pub execution_time: f64,
    #[serde(default)]
    pub comparisons: u64,
    #[serde(default)]
    pub swaps: u64,
}

impl ExecutionDraft {
    /// @ai:intent Validate a request body into a draft
    /// @ai:post algorithm existence is checked by the store, not here
    /// @ai:effects pure
    pub fn from_json(body: &Value) -> Result<Self> {
        let mut reader = FieldReader::new(body);

        let algorithm = reader.reference("algorithm");
        let array_size = reader.count("array_size", None);
        let execution_time = reader.duration_ms("execution_time");
        let comparisons = reader.count("comparisons", Some(0));
        let swaps = reader.count("swaps", Some(0));

        let errors = reader.into_errors();

        match (algorithm, array_size, execution_time, comparisons, swaps) {
            (
                Some(algorithm),
                Some(array_size),
                Some(execution_time),
                Some(comparisons),
                Some(swaps),
            ) if errors.is_empty() => Ok(Self {
                algorithm,
                array_size,
                execution_time,
                comparisons,
                swaps,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }

    /// @ai:intent Materialize the draft against its resolved algorithm
    /// @ai:effects pure
    pub fn into_record(self, id: u64, algorithm: &Algorithm, now: DateTime<Utc>) -> ExecutionRecord {
        ExecutionRecord {
            id,
            algorithm: algorithm.id,
            algorithm_name: algorithm.name.clone(),
            array_size: self.array_size,
            execution_time: self.execution_time,
            comparisons: self.comparisons,
            swaps: self.swaps,
            created_at: now,
        }
    }
}
