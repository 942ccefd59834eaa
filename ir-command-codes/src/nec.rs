//! NEC frame inspection
//!
//! The 32-bit codes in the table are NEC frames as delivered by common IR
//! receiver libraries, most significant byte first:
//!
//! ```text
//! [Address][~Address][Command][~Command]
//!  31..24    23..16    15..8     7..0
//! ```
//!
//! A frame is valid when each inverse byte is the bitwise complement of the
//! byte before it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code sent by NEC remotes while a button is held down
///
/// Never bound in a table; callers decide whether to repeat the last command.
pub const NEC_REPEAT_CODE: u32 = 0xFFFF_FFFF;

/// Address and command bytes of a checked NEC frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NecFrame {
    /// Remote address byte
    pub address: u8,
    /// Button command byte
    pub command: u8,
}

impl NecFrame {
    /// Create a frame from its address and command bytes
    pub const fn new(address: u8, command: u8) -> Self {
        Self { address, command }
    }

    /// Split a raw code into address and command
    ///
    /// Returns `None` if either inverse byte does not match.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        let [address, address_inv, command, command_inv] = raw.to_be_bytes();

        // Byte + ~Byte must equal 0xFF
        if address.wrapping_add(address_inv) != 0xFF || command.wrapping_add(command_inv) != 0xFF {
            return None;
        }

        Some(Self { address, command })
    }

    /// Encode back into the 32-bit code
    pub const fn to_raw(&self) -> u32 {
        u32::from_be_bytes([self.address, !self.address, self.command, !self.command])
    }
}

impl fmt::Display for NecFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr=0x{:02X} cmd=0x{:02X}", self.address, self.command)
    }
}
