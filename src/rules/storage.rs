//! Rule set storage: rule-definition text and persisted JSON rule sets

use super::{parse_rules, Category, RuleSet};
use crate::error::{LensError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Current persisted rule set format version
const RULES_VERSION: u32 = 1;

/// On-disk form of a rule set
#[derive(Debug, Serialize, Deserialize)]
struct PersistedRules {
    /// Format version
    version: u32,
    /// Categories in definition order
    categories: Vec<Category>,
}

/// Load a rule set from a file.
///
/// Files ending in `.json` are read as persisted rule sets; everything else is
/// treated as rule-definition text.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    if !is_json {
        let text = fs::read_to_string(path).map_err(|e| LensError::FileNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        return Ok(parse_rules(&text));
    }

    let file = File::open(path).map_err(|e| LensError::FileNotFound {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let reader = BufReader::new(file);
    let persisted: PersistedRules = serde_json::from_reader(reader)
        .map_err(|e| LensError::RulesError(format!("Failed to parse rule set: {}", e)))?;

    if persisted.version != RULES_VERSION {
        return Err(LensError::RulesVersionMismatch {
            found: persisted.version,
            expected: RULES_VERSION,
        });
    }

    let rules = RuleSet {
        categories: persisted.categories,
    };
    Ok(rules.normalized())
}

/// Save a rule set as persisted JSON
pub fn save_rules(rules: &RuleSet, path: &Path) -> Result<()> {
    let persisted = PersistedRules {
        version: RULES_VERSION,
        categories: rules.categories().to_vec(),
    };

    let file = File::create(path).map_err(|e| {
        LensError::RulesError(format!(
            "Failed to create rules file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &persisted)
        .map_err(|e| LensError::RulesError(format!("Failed to write rule set: {}", e)))?;

    Ok(())
}
