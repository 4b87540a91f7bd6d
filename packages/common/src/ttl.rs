use soroban_sdk::{Env, IntoVal, Val};

// One day worth of ledgers, assuming ~5s close time.
pub const DAY_IN_LEDGERS: u32 = 17280;

// The instance TTL is reset to a week whenever a bump is triggered.
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
// Bumps happen only once less than six days are left.
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// Staker records live for a month between touches.
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;

/// Keeps the contract instance (and everything in instance storage) alive.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

/// Extends the TTL of a persistent entry. The key must exist.
pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}
