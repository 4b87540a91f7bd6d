use soroban_sdk::{Env, U256};

/// 100% expressed in basis points.
pub const MAX_BPS: i64 = 10_000;

// Validate if int value is bigger then 0
#[macro_export]
macro_rules! validate_int_parameters {
    ($($arg:expr),*) => {
        {
            $(
                let value: Option<i128> = Into::<Option<_>>::into($arg);
                if let Some(val) = value {
                    if val <= 0 {
                        panic!("value cannot be less than or equal zero")
                    }
                }
            )*
        }
    };
}

pub fn validate_bps(bps: i64) -> bool {
    (0..=MAX_BPS).contains(&bps)
}

/// Returns `floor(amount * bps / 10_000)`, or `None` if the product overflows.
///
/// Callers are expected to pass a non-negative `amount` and a `bps` value that
/// already went through [`validate_bps`].
pub fn bps_portion(amount: i128, bps: i64) -> Option<i128> {
    amount
        .checked_mul(bps as i128)
        .map(|scaled| scaled / MAX_BPS as i128)
}

/// Returns `floor(a * b / c)` for non-negative operands.
///
/// The product is taken in 256 bits, so it never overflows. `None` when an
/// operand is negative, `c` is zero, or the result does not fit in `i128`.
pub fn mul_div(env: &Env, a: i128, b: i128, c: i128) -> Option<i128> {
    if a < 0 || b < 0 || c <= 0 {
        return None;
    }

    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let quotient = product.div(&U256::from_u128(env, c as u128)).to_u128()?;

    i128::try_from(quotient).ok()
}
