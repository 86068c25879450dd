//! Positional base-N encoding over an arbitrary byte alphabet.
//!
//! The input is read as one big-endian number and written out in base
//! `alphabet.len()`. Leading zero bytes carry no numeric value, so each one is
//! written as `alphabet[0]` to keep the length recoverable.

use cp_core::{ByteSet, CpError, Result};

#[derive(Debug, Clone)]
pub struct BaseN {
    alphabet: Vec<u8>,
    /// Digit value per byte, `None` outside the alphabet.
    digits: [Option<u8>; 256],
}

impl BaseN {
    pub fn new(alphabet: &[u8]) -> Result<Self> {
        if !(2..=256).contains(&alphabet.len()) {
            return Err(CpError::Config(format!(
                "base-N alphabet needs 2 to 256 bytes, got {}",
                alphabet.len()
            )));
        }
        let mut seen = ByteSet::new();
        let mut digits = [None; 256];
        for (value, &b) in alphabet.iter().enumerate() {
            if !seen.insert(b) {
                return Err(CpError::Config(format!(
                    "base-N alphabet repeats '{}'",
                    b.escape_ascii()
                )));
            }
            digits[b as usize] = Some(value as u8);
        }
        Ok(Self { alphabet: alphabet.to_vec(), digits })
    }

    pub fn base(&self) -> usize {
        self.alphabet.len()
    }

    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let base = self.base() as u32;
        let zeros = data.iter().take_while(|&&b| b == 0).count();

        // Little-endian digits of the value accumulated so far.
        let mut value: Vec<u8> = Vec::with_capacity(data.len() * 2);
        for &byte in &data[zeros..] {
            let mut carry = byte as u32;
            for digit in value.iter_mut() {
                carry += (*digit as u32) << 8;
                *digit = (carry % base) as u8;
                carry /= base;
            }
            while carry > 0 {
                value.push((carry % base) as u8);
                carry /= base;
            }
        }

        let mut out = vec![self.alphabet[0]; zeros];
        out.extend(value.iter().rev().map(|&d| self.alphabet[d as usize]));
        out
    }

    pub fn decode(&self, text: &[u8]) -> Result<Vec<u8>> {
        let base = self.base() as u32;
        let zero = self.alphabet[0];
        let zeros = text.iter().take_while(|&&c| c == zero).count();

        let mut value: Vec<u8> = Vec::with_capacity(text.len());
        for (offset, &c) in text[zeros..].iter().enumerate() {
            let digit = self.digits[c as usize].ok_or_else(|| {
                CpError::Encoding(format!(
                    "byte '{}' at {} is not in the alphabet",
                    c.escape_ascii(),
                    zeros + offset
                ))
            })?;
            let mut carry = digit as u32;
            for byte in value.iter_mut() {
                carry += (*byte as u32) * base;
                *byte = (carry & 0xff) as u8;
                carry >>= 8;
            }
            while carry > 0 {
                value.push((carry & 0xff) as u8);
                carry >>= 8;
            }
        }

        let mut out = vec![0u8; zeros];
        out.extend(value.iter().rev());
        Ok(out)
    }
}
