//! Fixed-size byte values carried by a transaction, displayed in base58.

use std::fmt;

/// Length of an account key in bytes.
pub const PUBKEY_BYTES: usize = 32;
/// Length of an ed25519 signature in bytes.
pub const SIGNATURE_BYTES: usize = 64;
/// Length of a blockhash in bytes.
pub const HASH_BYTES: usize = 32;

macro_rules! base58_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const fn new_from_array(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&bs58::encode(&self.0).into_string())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

base58_bytes!(
    /// A 32-byte account address.
    Pubkey,
    PUBKEY_BYTES
);

base58_bytes!(
    /// A 64-byte transaction signature.
    Signature,
    SIGNATURE_BYTES
);

base58_bytes!(
    /// A 32-byte recent blockhash.
    Hash,
    HASH_BYTES
);
