#![no_std]
mod contract;
mod distribution;
mod error;
mod storage;

#[cfg(test)]
mod tests;
