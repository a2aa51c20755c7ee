// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::{CryptoError, Result};
use subtle::{ConstantTimeEq, ConstantTimeLess};

/// PKCS#7 padding (PKCS#5 for 8-byte blocks), for engines that pad.
pub struct Pkcs7Padding;

impl Pkcs7Padding {
    /// Appends PKCS#7 padding. A block-aligned input still gains one full
    /// block of padding.
    pub fn pad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        check_block_size(block_size)?;

        let padding_len = Self::get_padding_length(data.len(), block_size);
        let mut result = Vec::with_capacity(data.len() + padding_len);
        result.extend_from_slice(data);
        result.resize(data.len() + padding_len, padding_len as u8);
        Ok(result)
    }

    /// Strips PKCS#7 padding, checking every padding byte.
    pub fn unpad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        let len = Self::unpadded_len(data, block_size)?;
        Ok(data[..len].to_vec())
    }

    /// Length of `data` once its padding is stripped.
    pub fn unpadded_len(data: &[u8], block_size: usize) -> Result<usize> {
        check_block_size(block_size)?;

        if data.len() < block_size || data.len() % block_size != 0 {
            return Err(CryptoError::IllegalBlockSize(format!(
                "padded input of {} bytes is not a positive multiple of {}",
                data.len(),
                block_size
            )));
        }

        let padding_len = data[data.len() - 1];
        let last_block = &data[data.len() - block_size..];

        // every byte inside the claimed padding must equal the padding length
        let mut valid = !padding_len.ct_eq(&0) & !(block_size as u8).ct_lt(&padding_len);
        for (i, byte) in last_block.iter().rev().enumerate() {
            let in_padding = (i as u8).ct_lt(&padding_len);
            valid &= !in_padding | byte.ct_eq(&padding_len);
        }

        if !bool::from(valid) {
            return Err(CryptoError::BadPadding("pad block corrupted".into()));
        }
        Ok(data.len() - padding_len as usize)
    }

    /// Number of padding bytes `pad` appends to `data_len` bytes.
    pub fn get_padding_length(data_len: usize, block_size: usize) -> usize {
        if block_size == 0 {
            return 0;
        }
        block_size - (data_len % block_size)
    }
}

fn check_block_size(block_size: usize) -> Result<()> {
    if !(2..=255).contains(&block_size) {
        return Err(CryptoError::IllegalArgument(format!(
            "Invalid block size: {}",
            block_size
        )));
    }
    Ok(())
}
