use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    NegativeAmount = 800,
    InsufficientBalance = 801,
    InsufficientAllowance = 802,
    ExpirationInPast = 803,
    DecimalTooLarge = 804,
    AdminNotSet = 805,
    SupplyOverflow = 806,
}
