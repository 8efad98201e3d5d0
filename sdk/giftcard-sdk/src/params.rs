//! Parameter application for the gift-card validator pair.

use crate::error::{GiftCardError, Result};
use crate::session::Session;
use crate::types::{AppliedValidators, AssetName, OutputReference, ValidatorBundle};

/// Apply `(token_name, output_reference)` to the raw validator bundle,
/// producing the lock address, parameterized scripts and policy id.
///
/// Deterministic for identical inputs and an identical bundle. The
/// cryptographic parameterization is performed by the session's script
/// engine; its failures are propagated verbatim.
pub fn apply_params(
    token_name: &AssetName,
    output_reference: &OutputReference,
    validators: &ValidatorBundle,
    session: &Session,
) -> Result<AppliedValidators> {
    session
        .engine()
        .apply(validators, token_name, output_reference, session.network())
        .map_err(|e| GiftCardError::Engine(e.to_string()))
}
