/// Application identifier of the secure element applet
pub const SE_APPLET_AID: [u8; 16] = [
    0xA0, 0x00, 0x00, 0x03, 0x96, 0x54, 0x53, 0x00, 0x00, 0x00, 0x01, 0x03, 0x00, 0x00, 0x00, 0x00,
];

/// Manufacturer root public key (uncompressed P-256 point) certifying the attestation key
pub const ROOT_PUBLIC_KEY: [u8; 65] = [
    0x04, 0xC4, 0xFC, 0x6F, 0x4A, 0xF9, 0xC1, 0x1D, 0xE8, 0xDC, 0x19, 0xCC, 0x7B, 0x60, 0x77, 0x2B,
    0xB3, 0x92, 0xE7, 0x1F, 0xB6, 0x25, 0x1F, 0x00, 0x56, 0x66, 0x97, 0xF0, 0x88, 0x31, 0x1F, 0x4C,
    0x6A, 0xCE, 0x94, 0xD0, 0xC7, 0x33, 0xE0, 0x45, 0xF4, 0x02, 0xC7, 0x02, 0xFF, 0x67, 0x38, 0x9F,
    0xDF, 0xC8, 0xE4, 0x61, 0xD5, 0xF7, 0xF3, 0x53, 0x39, 0x38, 0xE9, 0x46, 0xCD, 0x12, 0xEA, 0x20,
    0x25,
];

/// Maximum size of a raw payload accepted for signing
pub const MAX_SIGN_PAYLOAD_LEN: usize = 900;

/// Exchange timeout applied on transports with a short default
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Secure object identifiers
pub mod objects {
    /// Asset identifier slot
    pub const ASSET: u32 = 0x1000_0002;
    /// Chain public key slot
    pub const PUBLIC_KEY: u32 = 0x1000_0001;
    /// Provisioned attestation key
    pub const ATTESTATION_KEY: u32 = 0xF000_0012;
    /// Attestation key certificate
    pub const ATTESTATION_CERTIFICATE: u32 = 0xF000_0013;
}

/// Instruction bytes
pub mod ins {
    /// SELECT by AID
    pub const SELECT: u8 = 0xA4;
    /// Create a secure object
    pub const WRITE: u8 = 0x01;
    /// Read a secure object
    pub const READ: u8 = 0x02;
    /// Sign a raw payload
    pub const SIGN: u8 = 0x03;
}

/// Tags used inside command payloads
pub mod command_tags {
    /// 4-byte object identifier
    pub const OBJECT_ID: u8 = 0x41;
    /// 1-byte curve identifier
    pub const CURVE: u8 = 0x42;
    /// Asset data (chain id followed by asset bytes)
    pub const ASSET_DATA: u8 = 0x44;
    /// 4-byte attestation key identifier
    pub const ATTESTATION_KEY_ID: u8 = 0x45;
}

/// Tags found in secure object responses
pub mod tags {
    /// Object data
    pub const TAG_1: u8 = 0x41;
    /// Object attributes
    pub const TAG_2: u8 = 0x42;
    /// Attestation timestamp
    pub const TAG_3: u8 = 0x43;
    /// Freshness value
    pub const TAG_4: u8 = 0x44;
    /// Chip unique identifier
    pub const TAG_5: u8 = 0x45;
    /// Signature over TAG_1..TAG_5
    pub const TAG_6: u8 = 0x46;
}

/// Curve identifiers understood by the element
pub mod curves {
    /// NIST P-256
    pub const NIST_P256: u8 = 0x03;
    /// secp256k1
    pub const SECP256K1: u8 = 0x10;
    /// Ed25519
    pub const ED25519: u8 = 0x40;
}

/// Expected attribute values
pub mod attributes {
    /// Object class of key objects
    pub const CLASS_KEY: u8 = 0x01;
    /// Origin of keys generated inside the element
    pub const ORIGIN_INTERNAL: u8 = 0x02;
    /// Authentication indicator of authentication objects
    pub const AUTH_OBJECT: u8 = 0x02;

    /// Policy of a hardware-generated signing key: sign, read and attest only
    pub const KEY_POLICY: [u8; 9] = [0x08, 0x00, 0x00, 0x00, 0x00, 0x10, 0x10, 0x08, 0x00];
    /// Policy of a write-once data object: read and attest only
    pub const DATA_POLICY: [u8; 9] = [0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x08, 0x00];
}

/// Chain identifier sent with every sign command
pub const SIGN_CHAIN_ID: u8 = 0x01;
