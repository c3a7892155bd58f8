//! Submission validation: free-form form state into a well-typed request.
//!
//! The gate here is structural, not numeric: the initial-condition text
//! must yield exactly as many numbers as the model's arity. Individual
//! malformed tokens are dropped rather than reported, so they surface only
//! through the count mismatch. Numeric plausibility (step counts,
//! parameter ranges) is left to the compute collaborator, which is
//! authoritative over what constitutes a valid trajectory.

use crate::error::Error;
use crate::form::SimForm;
use crate::registry;
use crate::run::RunRequest;

/// Splits the initial-condition text on commas and parses each trimmed
/// token as a number. Tokens that fail to parse are silently discarded.
pub fn parse_initial(text: &str) -> Vec<f64> {
    text.split(',')
        .map(str::trim)
        .filter_map(|token| token.parse::<f64>().ok())
        .collect()
}

/// Validates the form and assembles a run request for submission.
pub fn validate(form: &SimForm) -> Result<RunRequest, Error> {
    let desc = registry::descriptor(form.model());
    let values = parse_initial(form.initial_text());
    if values.len() != desc.initial_arity {
        return Err(Error::InvalidInitialConditions {
            expected: desc.initial_arity,
            got: values.len(),
        });
    }

    let mut params = form.params().clone();
    params.set_initial(&values)?;

    Ok(RunRequest {
        model: form.model(),
        steps: form.steps(),
        color: form.color().to_string(),
        params,
    })
}
