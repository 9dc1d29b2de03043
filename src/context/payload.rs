//! Payload - compact per-token context annotation
//!
//! # Wire format (2 bytes)
//! - byte 0: bit0 negated, bit1 not asserted, bit2 historical, bit3 other is subject
//! - byte 1: bit0 negation trigger, bit1 assertion trigger, bit2 historical trigger,
//!   bit3 experiencer trigger
//!
//! Bits 4-7 of both bytes are reserved. All-zero bytes mean an unmarked token.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::ContextStatus;
use crate::error::PayloadError;

const NEGATED: u8 = 1 << 0;
const NOT_ASSERTED: u8 = 1 << 1;
const HISTORICAL: u8 = 1 << 2;
const OTHER_SUBJECT: u8 = 1 << 3;

const NEGATION_TRIGGER: u8 = 1 << 0;
const ASSERTION_TRIGGER: u8 = 1 << 1;
const HISTORICAL_TRIGGER: u8 = 1 << 2;
const EXPERIENCER_TRIGGER: u8 = 1 << 3;

const RESERVED: u8 = 0xF0;

/// Context of one token. Immutable once assigned.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Payload {
    pub positive: bool,
    pub asserted: bool,
    pub present: bool,
    pub patient_is_subject: bool,

    pub negation_trigger: bool,
    pub assertion_trigger: bool,
    pub historical_trigger: bool,
    pub experiencer_trigger: bool,
}

impl Default for Payload {
    fn default() -> Self {
        Self {
            positive: true,
            asserted: true,
            present: true,
            patient_is_subject: true,
            negation_trigger: false,
            assertion_trigger: false,
            historical_trigger: false,
            experiencer_trigger: false,
        }
    }
}

impl Payload {
    /// Payload for a token sampled at `status`
    pub fn from_status(status: &ContextStatus) -> Self {
        Self {
            positive: status.is_positive,
            asserted: status.is_asserted,
            present: status.is_present,
            patient_is_subject: status.experiencer_is_patient,
            negation_trigger: status.marks_negation(),
            assertion_trigger: status.marks_assertion(),
            historical_trigger: status.marks_historical(),
            experiencer_trigger: status.marks_experiencer(),
        }
    }

    pub fn encode(&self) -> [u8; 2] {
        let mut context = 0u8;
        if !self.positive {
            context |= NEGATED;
        }
        if !self.asserted {
            context |= NOT_ASSERTED;
        }
        if !self.present {
            context |= HISTORICAL;
        }
        if !self.patient_is_subject {
            context |= OTHER_SUBJECT;
        }

        let mut markers = 0u8;
        if self.negation_trigger {
            markers |= NEGATION_TRIGGER;
        }
        if self.assertion_trigger {
            markers |= ASSERTION_TRIGGER;
        }
        if self.historical_trigger {
            markers |= HISTORICAL_TRIGGER;
        }
        if self.experiencer_trigger {
            markers |= EXPERIENCER_TRIGGER;
        }

        [context, markers]
    }

    /// Decode a byte pair. Reserved bits are ignored.
    pub fn decode(bytes: [u8; 2]) -> Self {
        let [context, markers] = bytes;
        Self {
            positive: context & NEGATED == 0,
            asserted: context & NOT_ASSERTED == 0,
            present: context & HISTORICAL == 0,
            patient_is_subject: context & OTHER_SUBJECT == 0,
            negation_trigger: markers & NEGATION_TRIGGER != 0,
            assertion_trigger: markers & ASSERTION_TRIGGER != 0,
            historical_trigger: markers & HISTORICAL_TRIGGER != 0,
            experiencer_trigger: markers & EXPERIENCER_TRIGGER != 0,
        }
    }

    /// Strict decode of a stored payload: exactly 2 bytes, reserved bits clear
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        let pair: [u8; 2] = bytes
            .try_into()
            .map_err(|_| PayloadError::Length(bytes.len()))?;
        for (index, byte) in pair.iter().enumerate() {
            if byte & RESERVED != 0 {
                return Err(PayloadError::ReservedBits { index, byte: *byte });
            }
        }
        Ok(Self::decode(pair))
    }

    /// True if the token may be used as a query term.
    ///
    /// Tokens that are themselves negation, assertion or historical cues are
    /// not searched for. Experiencer cues are kept.
    pub fn is_query_term(&self) -> bool {
        !(self.negation_trigger || self.assertion_trigger || self.historical_trigger)
    }
}

impl From<Payload> for [u8; 2] {
    fn from(payload: Payload) -> Self {
        payload.encode()
    }
}

impl From<[u8; 2]> for Payload {
    fn from(bytes: [u8; 2]) -> Self {
        Payload::decode(bytes)
    }
}

impl TryFrom<&[u8]> for Payload {
    type Error = PayloadError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Payload::try_from_bytes(bytes)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[negated:{}; asserted:{}; historical:{}; experiencer: {}]",
            !self.positive,
            self.asserted,
            !self.present,
            if self.patient_is_subject { "patient" } else { "other" }
        )
    }
}
