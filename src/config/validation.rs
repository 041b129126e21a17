//! Configuration validation.

use super::types::DedupConfig;

/// One validation finding: the offending field and what is wrong with it.
#[derive(Debug, Clone)]
pub struct ConfigFinding {
    /// The field that failed validation.
    pub field: &'static str,
    /// Description of the validation error.
    pub message: String,
}

impl std::fmt::Display for ConfigFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate, returning every finding rather than stopping at the first.
    fn validate(&self) -> Vec<ConfigFinding>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for DedupConfig {
    fn validate(&self) -> Vec<ConfigFinding> {
        let mut findings = Vec::new();

        if self.num_perm == 0 {
            findings.push(ConfigFinding {
                field: "num_perm",
                message: "must be at least 1".to_string(),
            });
        }

        if self.ngram == 0 {
            findings.push(ConfigFinding {
                field: "ngram",
                message: "must be at least 1".to_string(),
            });
        }

        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            findings.push(ConfigFinding {
                field: "threshold",
                message: format!("{} is outside the open interval (0, 1)", self.threshold),
            });
        }

        if self.batch_size == 0 {
            findings.push(ConfigFinding {
                field: "batch_size",
                message: "must be at least 1".to_string(),
            });
        }

        if self.num_threads == 0 {
            findings.push(ConfigFinding {
                field: "num_threads",
                message: "must be at least 1".to_string(),
            });
        }

        match (self.b, self.r) {
            (Some(0), _) => findings.push(ConfigFinding {
                field: "b",
                message: "must be at least 1".to_string(),
            }),
            (_, Some(0)) => findings.push(ConfigFinding {
                field: "r",
                message: "must be at least 1".to_string(),
            }),
            (Some(b), Some(r)) if b * r != self.num_perm => findings.push(ConfigFinding {
                field: "num_perm",
                message: format!("b * r = {} but num_perm = {}", b * r, self.num_perm),
            }),
            _ => {}
        }

        if self.fp_weight < 0.0 || self.fn_weight < 0.0 {
            findings.push(ConfigFinding {
                field: "fp_weight",
                message: "optimizer weights must be non-negative".to_string(),
            });
        } else if self.fp_weight + self.fn_weight == 0.0 {
            findings.push(ConfigFinding {
                field: "fp_weight",
                message: "optimizer weights must not both be zero".to_string(),
            });
        }

        findings
    }
}
