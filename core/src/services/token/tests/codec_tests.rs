//! Unit tests for token signing and stateless verification

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::domain::clock::ManualClock;
use crate::domain::entities::token::{Audience, Claims, Rejection};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{ClaimsBuilder, TokenSigner, TokenVerifier};

use super::mocks::{fixed_start, test_user, TEST_SIGNER_KEY};

fn builder() -> ClaimsBuilder {
    ClaimsBuilder::new("authgate", "authgate-api", Duration::hours(1))
}

fn verifier(clock: Arc<ManualClock>) -> TokenVerifier {
    TokenVerifier::new(TEST_SIGNER_KEY.as_bytes(), "authgate-api", clock).unwrap()
}

fn signer() -> TokenSigner {
    TokenSigner::new(TEST_SIGNER_KEY.as_bytes()).unwrap()
}

#[test]
fn test_claims_builder_sets_every_claim() {
    let user = test_user();
    let claims = builder().build(&user, fixed_start()).unwrap();

    assert_eq!(claims.sub, "alice@example.com");
    assert_eq!(claims.iss, "authgate");
    assert!(claims.aud.contains("authgate-api"));
    assert_eq!(claims.iat, fixed_start().timestamp());
    assert_eq!(claims.exp, claims.iat + 3600);
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.scope, BTreeSet::from(["USER".to_string()]));
}

#[test]
fn test_jti_is_128_bit_hex_and_unique() {
    let user = test_user();
    let first = builder().build(&user, fixed_start()).unwrap();
    let second = builder().build(&user, fixed_start()).unwrap();

    assert_eq!(first.jti.len(), 32);
    assert!(first.jti.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(first.jti, second.jti);
}

#[test]
fn test_signing_is_deterministic() {
    let claims = builder().build(&test_user(), fixed_start()).unwrap();

    let first = signer().sign(&claims).unwrap();
    let second = signer().sign(&claims).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.split('.').count(), 3);
    assert_eq!(jsonwebtoken::decode_header(&first).unwrap().alg, Algorithm::HS512);
}

#[test]
fn test_claims_builder_refuses_unrepresentable_expiry() {
    let builder = ClaimsBuilder::new("authgate", "authgate-api", Duration::MAX);
    assert!(matches!(
        builder.build(&test_user(), fixed_start()),
        Err(DomainError::Token(TokenError::SigningFailed))
    ));
}

#[test]
fn test_empty_secret_rejected() {
    assert!(TokenSigner::new(b"").is_err());
    let clock = Arc::new(ManualClock::new(fixed_start()));
    assert!(TokenVerifier::new(b"", "authgate-api", clock).is_err());
}

#[test]
fn test_verify_round_trip() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let claims = builder().build(&test_user(), fixed_start()).unwrap();
    let token = signer().sign(&claims).unwrap();

    assert_eq!(verifier(clock).verify(&token).unwrap(), claims);
}

#[test]
fn test_structural_garbage_is_malformed() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let verifier = verifier(clock);

    for token in ["", "abc", "a.b", "a.b.c", "###.###.###"] {
        assert_eq!(verifier.verify(token), Err(Rejection::Malformed), "token {:?}", token);
    }
}

#[test]
fn test_wrong_algorithm_is_malformed() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let claims = builder().build(&test_user(), fixed_start()).unwrap();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SIGNER_KEY.as_bytes()),
    )
    .unwrap();

    assert_eq!(verifier(clock).verify(&token), Err(Rejection::Malformed));
}

#[test]
fn test_wrong_key_is_bad_signature() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let claims = builder().build(&test_user(), fixed_start()).unwrap();
    let token = TokenSigner::new(b"some-other-key").unwrap().sign(&claims).unwrap();

    assert_eq!(verifier(clock).verify(&token), Err(Rejection::BadSignature));
}

#[test]
fn test_any_single_character_change_is_rejected() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let verifier = verifier(clock);
    let claims = builder().build(&test_user(), fixed_start()).unwrap();
    let token = signer().sign(&claims).unwrap();

    for (index, original) in token.char_indices() {
        if original == '.' {
            continue;
        }
        let replacement = if original == 'A' { 'B' } else { 'A' };
        let mut tampered = token.clone();
        tampered.replace_range(index..index + 1, &replacement.to_string());

        assert!(
            verifier.verify(&tampered).is_err(),
            "tampering position {} was accepted",
            index
        );
    }
}

#[test]
fn test_expiry_is_strict_at_the_instant() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let verifier = verifier(clock.clone());
    let claims = builder().build(&test_user(), fixed_start()).unwrap();
    let token = signer().sign(&claims).unwrap();

    clock.advance(Duration::hours(1) - Duration::seconds(1));
    assert!(verifier.verify(&token).is_ok());

    clock.advance(Duration::seconds(1));
    assert_eq!(verifier.verify(&token), Err(Rejection::Expired));

    clock.set(fixed_start() + Duration::minutes(61));
    assert_eq!(verifier.verify(&token), Err(Rejection::Expired));
}

#[test]
fn test_audience_checks() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let verifier = verifier(clock);

    let foreign = ClaimsBuilder::new("authgate", "other-api", Duration::hours(1))
        .build(&test_user(), fixed_start())
        .unwrap();
    let token = signer().sign(&foreign).unwrap();
    assert_eq!(verifier.verify(&token), Err(Rejection::WrongAudience));

    let mut shared: Claims = builder().build(&test_user(), fixed_start()).unwrap();
    shared.aud = Audience::Multiple(vec!["other-api".to_string(), "authgate-api".to_string()]);
    let token = signer().sign(&shared).unwrap();
    assert!(verifier.verify(&token).is_ok());
}

#[test]
fn test_expiry_checked_before_audience() {
    let clock = Arc::new(ManualClock::new(fixed_start()));
    let verifier = verifier(clock.clone());
    let foreign = ClaimsBuilder::new("authgate", "other-api", Duration::hours(1))
        .build(&test_user(), fixed_start())
        .unwrap();
    let token = signer().sign(&foreign).unwrap();

    clock.advance(Duration::hours(2));
    assert_eq!(verifier.verify(&token), Err(Rejection::Expired));
}
