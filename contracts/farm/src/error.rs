use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidAmount = 700,
    NothingToClaim = 701,
    NothingStaked = 702,
    RewardOutOfRange = 703,
    InvalidRewardRange = 704,
    InvalidFeeBps = 705,
    InsufficientFeeBalance = 706,
    SameAdmin = 707,
    AdminNotSet = 708,
    ConfigNotSet = 709,
    ContractMathError = 710,
    TokensIdentical = 711,
    RewardRoundNotFound = 712,
}
