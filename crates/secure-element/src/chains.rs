//! Static table of supported blockchains

use derive_more::Display;

use crate::constants::curves;

/// Blockchain descriptor resolved from an asset's leading byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{name}")]
pub struct Blockchain {
    /// Numeric chain identifier stored on the element
    pub id: u8,
    /// Curve the chain signs with
    pub curve: u8,
    /// Display name
    pub name: &'static str,
}

impl Blockchain {
    /// Solana
    pub const SOLANA: Self = Self::new(1, curves::ED25519, "Solana");
    /// Ethereum
    pub const ETHEREUM: Self = Self::new(2, curves::SECP256K1, "Ethereum");
    /// Bitcoin
    pub const BITCOIN: Self = Self::new(3, curves::SECP256K1, "Bitcoin");
    /// Polygon
    pub const POLYGON: Self = Self::new(4, curves::SECP256K1, "Polygon");

    /// Every supported chain
    pub const ALL: [Self; 4] = [Self::SOLANA, Self::ETHEREUM, Self::BITCOIN, Self::POLYGON];

    const fn new(id: u8, curve: u8, name: &'static str) -> Self {
        Self { id, curve, name }
    }

    /// Look up a chain by its numeric identifier
    pub fn by_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.id == id)
    }

    /// Look up a chain by name, ignoring case
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Blockchain::by_id(2), Some(Blockchain::ETHEREUM));
        assert_eq!(Blockchain::by_id(0), None);
        assert_eq!(Blockchain::by_id(0xFF), None);
        assert_eq!(Blockchain::by_name("solana"), Some(Blockchain::SOLANA));
        assert_eq!(Blockchain::POLYGON.to_string(), "Polygon");
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in Blockchain::ALL.iter().enumerate() {
            for b in &Blockchain::ALL[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
