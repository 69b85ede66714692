use anchor_lang::prelude::*;

use crate::errors::RandomTierNftError;
use crate::state::{TierEntry, MAX_METADATA_URI_LEN, MAX_TIERS};

/// Randomness as delivered by the oracle: a 256-bit unsigned integer,
/// big-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomScalar([u8; 32]);

impl RandomScalar {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns `self mod modulus`. `modulus` must be non-zero, which every
    /// validated `TierTable` guarantees for its final threshold.
    pub fn reduce(&self, modulus: u64) -> u64 {
        let modulus = u128::from(modulus);
        // Horner over the bytes; the accumulator stays below 2^72.
        let remainder = self
            .0
            .iter()
            .fold(0u128, |acc, &byte| ((acc << 8) | u128::from(byte)) % modulus);
        remainder as u64
    }
}

impl From<u128> for RandomScalar {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<u64> for RandomScalar {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

/// A validated, ordered view over tier entries.
///
/// Entry `i` owns the reduced range `[entries[i - 1].threshold,
/// entries[i].threshold)`, with the first entry starting at 0. The final
/// threshold is the modulus applied to every scalar, so the buckets cover
/// the whole reduced range with no gaps or overlaps.
#[derive(Clone, Copy, Debug)]
pub struct TierTable<'a> {
    entries: &'a [TierEntry],
}

impl<'a> TierTable<'a> {
    pub fn new(entries: &'a [TierEntry]) -> Result<Self> {
        require!(!entries.is_empty(), RandomTierNftError::EmptyTierTable);
        require!(entries.len() <= MAX_TIERS, RandomTierNftError::TooManyTiers);

        let mut floor = 0u64;
        for entry in entries {
            require!(
                entry.threshold > floor,
                RandomTierNftError::NonIncreasingThresholds
            );
            require!(
                entry.metadata_uri.len() <= MAX_METADATA_URI_LEN,
                RandomTierNftError::MetadataUriTooLong
            );
            floor = entry.threshold;
        }

        Ok(Self { entries })
    }

    /// The final threshold.
    pub fn modulus(&self) -> u64 {
        // Non-empty by construction.
        self.entries[self.entries.len() - 1].threshold
    }

    /// Maps a scalar to its tier index and entry. A reduced value equal to
    /// a threshold belongs to the next tier.
    pub fn select(&self, scalar: &RandomScalar) -> (u8, &'a TierEntry) {
        let reduced = scalar.reduce(self.modulus());
        let index = self
            .entries
            .partition_point(|entry| entry.threshold <= reduced);
        // reduced < modulus, so index < len <= MAX_TIERS
        (index as u8, &self.entries[index])
    }
}
