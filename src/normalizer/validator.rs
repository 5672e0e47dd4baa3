//! Record validation
//!
//! After repair, the sentinel must sit exactly at the schema's sentinel
//! index. The check is strict equality: an early or late sentinel both
//! reject. With `strict_field_count` set, the record must also have exactly
//! the schema's field count.

use super::sentinel;
use crate::models::{
    CanonicalRecord, NormalizationOutcome, RawLine, RejectReason, Rejection, Repairs,
    TokenSequence,
};
use crate::schema::RecordSchema;

/// Check the layout rules, without building an outcome
pub fn check_layout(tokens: &[String], schema: &RecordSchema) -> Result<(), RejectReason> {
    let found = sentinel::locate(tokens).ok_or(RejectReason::SentinelNotFound)?;

    if found != schema.sentinel_index {
        return Err(RejectReason::SentinelMisplaced {
            expected: schema.sentinel_index,
            found,
        });
    }

    if schema.strict_field_count && tokens.len() != schema.field_count {
        return Err(RejectReason::FieldCountMismatch {
            expected: schema.field_count,
            found: tokens.len(),
        });
    }

    Ok(())
}

/// Accept the repaired tokens as a canonical record or reject the raw line
pub fn validate(
    raw: &RawLine,
    tokens: TokenSequence,
    repairs: Repairs,
    schema: &RecordSchema,
) -> NormalizationOutcome {
    match check_layout(&tokens, schema) {
        Ok(()) => {
            NormalizationOutcome::Accepted(CanonicalRecord::new(raw.line_number, tokens, repairs))
        }
        Err(reason) => NormalizationOutcome::Rejected(Rejection {
            raw: raw.clone(),
            reason,
        }),
    }
}
