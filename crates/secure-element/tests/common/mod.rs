//! Simulated secure element for integration tests
#![allow(dead_code)]

use std::time::Duration;

use bytes::Bytes;
use nexum_se::constants::{SE_APPLET_AID, attributes, objects};
use nexum_se::{CardTransport, SessionConfig, Technology, TechnologyOptions};
use nexum_se_apdu::{TransportError, utils::encode_tlv_length};
use p256::ecdsa::{Signature, SigningKey, signature::Signer};

const OID_ECDSA_WITH_SHA256: &[u8] = &[0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02];
const OID_EC_PUBLIC_KEY: &[u8] = &[0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01];
const OID_PRIME256V1: &[u8] = &[0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07];
const OID_COMMON_NAME: &[u8] = &[0x06, 0x03, 0x55, 0x04, 0x03];

pub fn root_key() -> SigningKey {
    SigningKey::from_slice(&[0x07; 32]).unwrap()
}

pub fn attestation_key() -> SigningKey {
    SigningKey::from_slice(&[0x21; 32]).unwrap()
}

pub fn uncompressed(key: &SigningKey) -> Vec<u8> {
    key.verifying_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec()
}

/// Session configuration trusting [`root_key`]
pub fn test_config() -> SessionConfig {
    SessionConfig::default().with_root_public_key(uncompressed(&root_key()))
}

fn der(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend_from_slice(&encode_tlv_length(content.len()).unwrap());
    out.extend_from_slice(content);
    out
}

fn name(common_name: &str) -> Vec<u8> {
    let mut attribute = OID_COMMON_NAME.to_vec();
    attribute.extend_from_slice(&der(0x0C, common_name.as_bytes()));
    der(0x30, &der(0x31, &der(0x30, &attribute)))
}

/// Minimal X.509 v3 certificate for `subject`, signed by `issuer`
pub fn certificate(subject: &SigningKey, issuer: &SigningKey) -> Vec<u8> {
    let algorithm = der(0x30, OID_ECDSA_WITH_SHA256);

    let mut key_algorithm = OID_EC_PUBLIC_KEY.to_vec();
    key_algorithm.extend_from_slice(OID_PRIME256V1);
    let mut key_bits = vec![0x00];
    key_bits.extend_from_slice(&uncompressed(subject));
    let mut spki = der(0x30, &key_algorithm);
    spki.extend_from_slice(&der(0x03, &key_bits));

    let mut validity = der(0x17, b"250101000000Z");
    validity.extend_from_slice(&der(0x17, b"350101000000Z"));

    let mut tbs = der(0xA0, &der(0x02, &[0x02]));
    tbs.extend_from_slice(&der(0x02, &[0x01]));
    tbs.extend_from_slice(&algorithm);
    tbs.extend_from_slice(&name("Test Manufacturer Root"));
    tbs.extend_from_slice(&der(0x30, &validity));
    tbs.extend_from_slice(&name("Test Attestation Key"));
    tbs.extend_from_slice(&der(0x30, &spki));
    let tbs = der(0x30, &tbs);

    let signature: Signature = issuer.sign(&tbs);
    let mut signature_bits = vec![0x00];
    signature_bits.extend_from_slice(signature.to_der().as_bytes());

    let mut certificate = tbs;
    certificate.extend_from_slice(&algorithm);
    certificate.extend_from_slice(&der(0x03, &signature_bits));
    der(0x30, &certificate)
}

/// Attribute blob in the element's fixed layout
pub fn attribute_blob(object_id: u32, class: u8, auth_indicator: u8, policy: &[u8], origin: u8) -> Vec<u8> {
    let mut blob = object_id.to_be_bytes().to_vec();
    blob.push(class);
    blob.push(auth_indicator);
    blob.extend_from_slice(&[0x00, 0x00]);
    blob.extend_from_slice(&[0x00; 4]);
    blob.push(0x00);
    blob.extend_from_slice(policy);
    blob.push(origin);
    blob
}

/// Object stored in the simulated element
#[derive(Debug, Clone)]
pub struct SimObject {
    pub data: Vec<u8>,
    pub attributes: Vec<u8>,
}

impl SimObject {
    /// Hardware-generated chain key with the canonical key policy
    pub fn key(data: Vec<u8>) -> Self {
        Self {
            attributes: attribute_blob(
                objects::PUBLIC_KEY,
                attributes::CLASS_KEY,
                0x00,
                &attributes::KEY_POLICY,
                attributes::ORIGIN_INTERNAL,
            ),
            data,
        }
    }

    /// Asset with the canonical data policy
    pub fn asset(chain_id: u8, asset: &[u8]) -> Self {
        let mut data = vec![chain_id];
        data.extend_from_slice(asset);
        Self {
            attributes: attribute_blob(objects::ASSET, 0x00, 0x00, &attributes::DATA_POLICY, 0x01),
            data,
        }
    }
}

/// Public key the simulated element generates on create-address
pub fn generated_key() -> Vec<u8> {
    uncompressed(&SigningKey::from_slice(&[0x55; 32]).unwrap())
}

/// In-memory secure element answering the applet's APDUs
#[derive(Debug)]
pub struct SimulatedElement {
    pub supported: bool,
    pub start_fails: bool,
    pub requires_timeout: bool,
    pub cancel_fails: bool,
    pub transmission_fails: bool,
    /// Create-address answers 90 00 without storing a key
    pub create_is_noop: bool,
    /// Create-address answers with this status instead of generating a key
    pub create_status: Option<[u8; 2]>,
    /// Flip a signed byte after signing attested reads
    pub tamper_attestation: bool,
    /// Sign attested reads with raw r||s instead of DER
    pub raw_signatures: bool,
    pub certificate: Vec<u8>,
    pub attestation_key: SigningKey,
    pub public_key: Option<SimObject>,
    pub asset: Option<SimObject>,
    pub sign_response: Vec<u8>,

    pub technology_requests: usize,
    pub cancellations: usize,
    pub exchanges: usize,
    pub timeouts: Vec<Duration>,
    pub commands: Vec<Vec<u8>>,
    pub alert_messages: Vec<Option<String>>,
    /// Set between a technology request and its cancellation
    pub technology_active: bool,
}

impl Default for SimulatedElement {
    fn default() -> Self {
        let attestation_key = attestation_key();
        Self {
            supported: true,
            start_fails: false,
            requires_timeout: false,
            cancel_fails: false,
            transmission_fails: false,
            create_is_noop: false,
            create_status: None,
            tamper_attestation: false,
            raw_signatures: false,
            certificate: certificate(&attestation_key, &root_key()),
            attestation_key,
            public_key: None,
            asset: None,
            sign_response: (0..64).collect(),
            technology_requests: 0,
            cancellations: 0,
            exchanges: 0,
            timeouts: Vec::new(),
            commands: Vec::new(),
            alert_messages: Vec::new(),
            technology_active: false,
        }
    }
}

impl SimulatedElement {
    /// Element with a provisioned chain key and no asset
    pub fn provisioned() -> Self {
        Self {
            public_key: Some(SimObject::key(generated_key())),
            ..Self::default()
        }
    }

    /// Commands received with the given instruction byte
    pub fn commands_with_ins(&self, ins: u8) -> usize {
        self.commands.iter().filter(|c| c[1] == ins).count()
    }

    fn attested(&self, object: &SimObject) -> Vec<u8> {
        let values: [(u8, &[u8]); 5] = [
            (0x41, &object.data),
            (0x42, &object.attributes),
            (0x43, &[0x00, 0x00, 0x01, 0x2C]),
            (0x44, &[0x5A; 16]),
            (0x45, &[0x04, 0x05, 0x00, 0x00, 0x00, 0x00, 0x01, 0x23, 0x45, 0x67]),
        ];

        let mut signed = Vec::new();
        let mut body = Vec::new();
        for (tag, value) in values {
            signed.extend_from_slice(value);
            body.extend_from_slice(&der(tag, value));
        }

        let signature: Signature = self.attestation_key.sign(&signed);
        let signature = if self.raw_signatures {
            signature.to_bytes().to_vec()
        } else {
            signature.to_der().as_bytes().to_vec()
        };
        body.extend_from_slice(&der(0x46, &signature));

        if self.tamper_attestation {
            // Last byte of the chip id value
            let index = body.len() - signature.len() - 3;
            body[index] ^= 0xFF;
        }
        body
    }

    fn respond(&mut self, command: &[u8]) -> Vec<u8> {
        const OK: [u8; 2] = [0x90, 0x00];
        const NOT_FOUND: [u8; 2] = [0x6A, 0x82];

        let with_status = |mut payload: Vec<u8>, status: [u8; 2]| {
            payload.extend_from_slice(&status);
            payload
        };

        match (command[0], command[1]) {
            (0x00, 0xA4) => {
                let len = command[4] as usize;
                if command[5..5 + len] == SE_APPLET_AID {
                    OK.to_vec()
                } else {
                    NOT_FOUND.to_vec()
                }
            }
            (0x80, 0x02) => {
                let len = u16::from_be_bytes([command[5], command[6]]) as usize;
                let data = &command[7..7 + len];
                let object_id = u32::from_be_bytes([data[2], data[3], data[4], data[5]]);
                let object = match object_id {
                    objects::ATTESTATION_CERTIFICATE => {
                        return with_status(self.certificate.clone(), OK);
                    }
                    objects::PUBLIC_KEY => self.public_key.clone(),
                    objects::ASSET => self.asset.clone(),
                    _ => None,
                };
                match object {
                    Some(object) => with_status(self.attested(&object), OK),
                    None => NOT_FOUND.to_vec(),
                }
            }
            (0x80, 0x01) => {
                let len = command[4] as usize;
                let data = &command[5..5 + len];
                match data[6] {
                    0x42 => {
                        if let Some(status) = self.create_status {
                            return status.to_vec();
                        }
                        if !self.create_is_noop {
                            self.public_key = Some(SimObject::key(generated_key()));
                        }
                        OK.to_vec()
                    }
                    0x44 => {
                        let value = &data[8..];
                        self.asset = Some(SimObject::asset(value[0], &value[1..]));
                        OK.to_vec()
                    }
                    _ => vec![0x6A, 0x80],
                }
            }
            (0x80, 0x03) => with_status(self.sign_response.clone(), OK),
            _ => vec![0x6D, 0x00],
        }
    }
}

impl CardTransport for SimulatedElement {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn start(&mut self) -> Result<(), TransportError> {
        if self.start_fails {
            return Err(TransportError::NotStarted);
        }
        Ok(())
    }

    fn request_technology(
        &mut self,
        technology: Technology,
        options: &TechnologyOptions,
    ) -> Result<(), TransportError> {
        assert_eq!(technology, Technology::IsoDep);
        self.technology_requests += 1;
        self.alert_messages.push(options.alert_message.clone());
        self.technology_active = true;
        Ok(())
    }

    fn cancel_technology_request(&mut self) -> Result<(), TransportError> {
        self.cancellations += 1;
        self.technology_active = false;
        if self.cancel_fails {
            return Err(TransportError::other("reader gone"));
        }
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        self.timeouts.push(timeout);
        Ok(())
    }

    fn requires_timeout(&self) -> bool {
        self.requires_timeout
    }

    fn do_transceive(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.technology_active {
            return Err(TransportError::NoSession);
        }
        self.exchanges += 1;
        self.commands.push(command.to_vec());
        if self.transmission_fails {
            return Err(TransportError::Transmission);
        }
        Ok(Bytes::from(self.respond(command)))
    }
}
