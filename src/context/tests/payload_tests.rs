//! Tests for the 2-byte payload codec

use crate::context::payload::Payload;
use crate::context::status::ContextStatus;
use crate::context::trigger::ContextType;
use crate::error::PayloadError;

fn from_bits(bits: u8) -> Payload {
    Payload {
        positive: bits & 1 != 0,
        asserted: bits & 2 != 0,
        present: bits & 4 != 0,
        patient_is_subject: bits & 8 != 0,
        negation_trigger: bits & 16 != 0,
        assertion_trigger: bits & 32 != 0,
        historical_trigger: bits & 64 != 0,
        experiencer_trigger: bits & 128 != 0,
    }
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_every_payload_survives_encoding() {
    for bits in 0..=u8::MAX {
        let p = from_bits(bits);
        assert_eq!(Payload::decode(p.encode()), p, "payload bits {bits:#010b}");
    }
}

#[test]
fn test_every_byte_pair_survives_decoding() {
    for raw in 0..=u16::MAX {
        let bytes = raw.to_le_bytes();
        let masked = [bytes[0] & 0x0F, bytes[1] & 0x0F];
        assert_eq!(Payload::decode(bytes).encode(), masked);
        if bytes == masked {
            assert_eq!(Payload::try_from_bytes(&bytes), Ok(Payload::decode(bytes)));
        }
    }
}

#[test]
fn test_default_payload_is_all_zero() {
    assert_eq!(Payload::default().encode(), [0, 0]);
    assert_eq!(Payload::decode([0, 0]), Payload::default());
}

#[test]
fn test_bit_layout() {
    let p = Payload {
        positive: false,
        present: false,
        experiencer_trigger: true,
        ..Payload::default()
    };
    assert_eq!(p.encode(), [0b0101, 0b1000]);

    let p = Payload {
        asserted: false,
        patient_is_subject: false,
        negation_trigger: true,
        assertion_trigger: true,
        historical_trigger: true,
        ..Payload::default()
    };
    assert_eq!(p.encode(), [0b1010, 0b0111]);
}

// ============================================================================
// Strict Decoding
// ============================================================================

#[test]
fn test_strict_decode_rejects_bad_input() {
    assert_eq!(Payload::try_from_bytes(&[0]), Err(PayloadError::Length(1)));
    assert_eq!(Payload::try_from_bytes(&[0, 0, 0]), Err(PayloadError::Length(3)));
    assert_eq!(
        Payload::try_from_bytes(&[0x01, 0x10]),
        Err(PayloadError::ReservedBits { index: 1, byte: 0x10 })
    );
}

// ============================================================================
// Query Terms and Status Mapping
// ============================================================================

#[test]
fn test_query_term_ignores_experiencer_marker() {
    for bits in 0..=u8::MAX {
        let p = from_bits(bits);
        let has_blocking_marker = p.negation_trigger || p.assertion_trigger || p.historical_trigger;
        assert_eq!(p.is_query_term(), !has_blocking_marker);

        let flipped = Payload {
            experiencer_trigger: !p.experiencer_trigger,
            ..p
        };
        assert_eq!(flipped.is_query_term(), p.is_query_term());
    }
}

#[test]
fn test_from_status_mirrors_fields() {
    let mut status = ContextStatus::default();
    status.apply(ContextType::Historical);
    status.apply(ContextType::Experiencer);
    status.set_terminal(ContextType::Possible);

    let p = Payload::from_status(&status);
    assert!(p.positive && p.asserted);
    assert!(!p.present && !p.patient_is_subject);
    assert!(p.assertion_trigger);
    assert!(!p.negation_trigger && !p.historical_trigger && !p.experiencer_trigger);
}

#[test]
fn test_display_format() {
    let p = Payload {
        positive: false,
        patient_is_subject: false,
        ..Payload::default()
    };
    assert_eq!(
        p.to_string(),
        "[negated:true; asserted:true; historical:false; experiencer: other]"
    );
}
