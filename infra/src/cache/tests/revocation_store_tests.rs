use chrono::{Duration, TimeZone, Utc};

use crate::cache::redis_client::prefixed_key;
use crate::cache::revocation_store::{revoked_token_suffix, ttl_seconds};

#[test]
fn test_key_layout() {
    let key = prefixed_key("authgate", &revoked_token_suffix("0a1b2c"));
    assert_eq!(key, "authgate:revoked_token:0a1b2c");
}

#[test]
fn test_ttl_matches_remaining_lifetime() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(ttl_seconds(now + Duration::hours(1), now), 3600);
}

#[test]
fn test_ttl_is_at_least_one_second() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(ttl_seconds(now, now), 1);
    assert_eq!(ttl_seconds(now - Duration::minutes(5), now), 1);
}
