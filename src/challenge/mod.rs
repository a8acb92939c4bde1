//! Challenge definitions and the dispatch of testcases to the exercises
//!
//! A challenge definition is a JSON object with a map of testcases, each with an [Action] and its
//! arguments:
//!
//! ```json
//! {
//!     "testcases": {
//!         "b856d760-023d-4b00-bad2-15d2b6da22fe": {
//!             "action": "sort_by_sum_ascending",
//!             "arguments": { "matrix": [[3, 2, 1], [2, 1]] }
//!         }
//!     }
//! }
//! ```
//!
//! The answer has the same shape, with the solution of each testcase under `responses`.

use std::collections::HashMap;
use std::sync::mpsc;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use threadpool::ThreadPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::settings::Settings;

pub mod jagged;
pub mod polynomial;

pub type ManyTestcases = HashMap<Uuid, Testcase>;
pub type Responses = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ragged matrices
    #[default]
    SortBySumAscending,
    SortBySumDescending,
    SortByMaxAscending,
    SortByMaxDescending,
    SortByMinAscending,
    SortByMinDescending,
    SortRows,

    // polynomials
    PolyDisplay,
    PolyHash,
    PolyCoefficient,
    PolyAdd,
    PolySub,
    PolyMul,
    PolyEquals,
    PolyCompare,
    PolyEvaluate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Testcase {
    pub action: Action,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Solve a single testcase.
pub fn run_testcase(testcase: &Testcase, settings: Settings) -> Result<serde_json::Value> {
    Ok(match testcase.action {
        Action::SortBySumAscending
        | Action::SortBySumDescending
        | Action::SortByMaxAscending
        | Action::SortByMaxDescending
        | Action::SortByMinAscending
        | Action::SortByMinDescending
        | Action::SortRows => jagged::run_testcase(testcase, settings)?,
        Action::PolyDisplay
        | Action::PolyHash
        | Action::PolyCoefficient
        | Action::PolyAdd
        | Action::PolySub
        | Action::PolyMul
        | Action::PolyEquals
        | Action::PolyCompare
        | Action::PolyEvaluate => polynomial::run_testcase(testcase, settings)?,
    })
}

/// Solve all testcases of a challenge definition on a pool of worker threads.
///
/// Testcases that fail are logged and left out of the responses, the others are still answered.
pub fn run_challenges(
    raw_json: &serde_json::Value,
    settings: Settings,
) -> Result<serde_json::Value> {
    if !raw_json["testcases"].is_object() {
        return Err(anyhow!("the challenge definition has no testcases object"));
    }
    let testcases: ManyTestcases = serde_json::from_value(raw_json["testcases"].clone())
        .inspect_err(|e| warn!("could not parse the testcases: {e}"))?;
    info!(
        "solving {} testcases with {} threads",
        testcases.len(),
        settings.worker_count()
    );

    let pool = ThreadPool::new(settings.worker_count());
    let (tx, rx) = mpsc::channel();
    for (uuid, testcase) in testcases {
        let tx = tx.clone();
        pool.execute(move || {
            debug!(%uuid, action = ?testcase.action, "starting testcase");
            let res = run_testcase(&testcase, settings);
            if tx.send((uuid, testcase.action, res)).is_err() {
                warn!(%uuid, "the solution could not be handed back");
            }
        });
    }
    // the receiver stops once the last worker is done with its sender
    drop(tx);

    let mut responses = Responses::new();
    for (uuid, action, res) in rx {
        match res {
            Ok(solution) => {
                responses.insert(uuid.to_string(), solution);
            }
            Err(e) => warn!(%uuid, ?action, "testcase failed: {e:#}"),
        }
    }

    if pool.panic_count() > 0 {
        warn!("{} testcases panicked", pool.panic_count());
    }

    Ok(serde_json::json!({ "responses": responses }))
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn settings() -> Settings {
        Settings {
            verbose: true,
            threads: Some(2),
        }
    }

    #[test]
    fn test_action_names() {
        assert_eq!(
            serde_json::to_value(Action::SortByMinDescending).unwrap(),
            json!("sort_by_min_descending")
        );
        assert_eq!(
            serde_json::from_value::<Action>(json!("poly_mul")).unwrap(),
            Action::PolyMul
        );
    }

    #[test]
    fn test_run_challenges() {
        let definition = json!({
            "testcases": {
                "b856d760-023d-4b00-bad2-15d2b6da22fe": {
                    "action": "sort_by_sum_ascending",
                    "arguments": { "matrix": [[3, 2, 1], [4, 3, 2, 1], [2, 1]] }
                },
                "254eaee7-05fd-4e0d-8292-9b658a852245": {
                    "action": "poly_display",
                    "arguments": { "coefficients": [2, 4, 5, 6, 8, 4, 2] }
                },
                "affbc7e0-ec4f-4a17-a0a2-a2b4ff4b9b1e": {
                    "action": "poly_mul",
                    "arguments": { "a": [3, 2, 1], "b": [1, 2, 3] }
                }
            }
        });

        let sol = run_challenges(&definition, settings()).expect("could not run the challenges");
        assert_eq!(
            sol,
            json!({
                "responses": {
                    "b856d760-023d-4b00-bad2-15d2b6da22fe": {
                        "matrix": [[1, 2], [1, 2, 3], [1, 2, 3, 4]]
                    },
                    "254eaee7-05fd-4e0d-8292-9b658a852245": {
                        "display": "2 + 4*x^1 + 5*x^2 + 6*x^3 + 8*x^4 + 4*x^5 + 2*x^6",
                        "degree": 7
                    },
                    "affbc7e0-ec4f-4a17-a0a2-a2b4ff4b9b1e": {
                        "coefficients": [3.0, 8.0, 14.0, 8.0, 3.0]
                    }
                }
            })
        );
    }

    #[test]
    fn test_run_challenges_skips_failures() {
        let definition = json!({
            "testcases": {
                "00000000-0000-0000-0000-000000000001": {
                    "action": "sort_by_sum_descending",
                    "arguments": { "matrix": [[1, 2, 3], [2147483647, 2147483647]] }
                },
                "00000000-0000-0000-0000-000000000002": {
                    "action": "poly_add",
                    "arguments": { "a": [1], "b": null }
                },
                "00000000-0000-0000-0000-000000000003": {
                    "action": "poly_sub",
                    "arguments": { "a": [3, 2, 1], "b": [1, 2, 3] }
                }
            }
        });

        let sol = run_challenges(&definition, settings()).expect("could not run the challenges");
        assert_eq!(
            sol,
            json!({
                "responses": {
                    "00000000-0000-0000-0000-000000000003": {
                        "coefficients": [2.0, 0.0, -2.0]
                    }
                }
            })
        );
    }

    #[test]
    fn test_run_challenges_without_testcases() {
        assert!(run_challenges(&json!({ "nothing": 1 }), settings()).is_err());
        assert_eq!(
            run_challenges(&json!({ "testcases": {} }), settings()).unwrap(),
            json!({ "responses": {} })
        );
    }

    #[test]
    fn test_default_testcase_roundtrip() {
        let raw = serde_json::to_value(Testcase::default()).unwrap();
        let back: Testcase = serde_json::from_value(raw).unwrap();
        assert_eq!(back, Testcase::default());
    }
}
