mod common;

use std::time::Duration;

use common::*;
use nexum_se::constants::{attributes, curves, objects};
use nexum_se::{
    Blockchain, Error, ObjectKind, Session, SessionState, TechnologyOptions,
    constants::SE_APPLET_AID,
};
use nexum_se_apdu::{StatusWord, utils::to_little_endian_chunks};
use p256::ecdsa::SigningKey;

#[test]
fn scenario_missing_key_is_created_then_read() {
    let mut session = Session::new(SimulatedElement::default(), test_config());
    assert_eq!(session.state(), SessionState::Ready);

    let identity = session.read_identity().unwrap();

    assert_eq!(
        identity.wallet_address,
        to_little_endian_chunks(&generated_key())
    );
    assert_eq!(identity.public_key.data.as_ref(), generated_key().as_slice());
    assert!(identity.key_created);
    assert!(identity.asset.is_none());
    assert!(identity.blockchain.is_none());
    assert_eq!(session.state(), SessionState::Done);

    let element = session.transport();
    assert_eq!(element.commands_with_ins(0x01), 1);
    // certificate, key (absent), key (after create), asset
    assert_eq!(element.commands_with_ins(0x02), 4);
    assert_eq!(element.technology_requests, 1);
    assert_eq!(element.cancellations, 1);

    // Create-address names the key slot and the default curve
    let create = element.commands.iter().find(|c| c[1] == 0x01).unwrap();
    assert_eq!(&create[7..11], &objects::PUBLIC_KEY.to_be_bytes());
    assert_eq!(create[13], curves::NIST_P256);
}

#[test]
fn scenario_key_and_asset_provisioned() {
    let element = SimulatedElement {
        asset: Some(SimObject::asset(Blockchain::ETHEREUM.id, &[0xC0, 0xFF, 0xEE])),
        ..SimulatedElement::provisioned()
    };
    let mut session = Session::new(element, test_config());

    let identity = session.read_identity().unwrap();

    assert!(!identity.key_created);
    assert_eq!(identity.asset.as_deref(), Some(&[0xC0, 0xFF, 0xEE][..]));
    assert_eq!(identity.blockchain, Some(Blockchain::ETHEREUM));
    assert_eq!(session.transport().commands_with_ins(0x01), 0);
    assert_eq!(session.transport().cancellations, 1);
}

#[test]
fn command_sequence_starts_with_select() {
    let mut session = Session::new(SimulatedElement::provisioned(), test_config());
    session.read_identity().unwrap();

    let commands = &session.transport().commands;
    assert_eq!(&commands[0][..5], &[0x00, 0xA4, 0x04, 0x00, 0x10]);
    assert_eq!(&commands[0][5..], &SE_APPLET_AID);

    // Plain certificate read
    assert_eq!(
        commands[1],
        [
            0x80, 0x02, 0x00, 0x00, 0x00, 0x00, 0x06, 0x41, 0x04, 0xF0, 0x00, 0x00, 0x13, 0x00,
            0x00
        ]
    );
    // Attested key read names the attestation key
    assert_eq!(&commands[2][5..7], &[0x00, 0x0C]);
    assert_eq!(&commands[2][15..19], &objects::ATTESTATION_KEY.to_be_bytes());
}

#[test]
fn raw_signatures_are_accepted() {
    let element = SimulatedElement {
        raw_signatures: true,
        ..SimulatedElement::provisioned()
    };
    let mut session = Session::new(element, test_config());
    assert!(session.read_identity().is_ok());
}

#[test]
fn certificate_from_other_issuer_is_untrusted() {
    let impostor = SigningKey::from_slice(&[0x66; 32]).unwrap();
    let element = SimulatedElement {
        certificate: certificate(&attestation_key(), &impostor),
        ..SimulatedElement::provisioned()
    };
    let mut session = Session::new(element, test_config());

    assert!(matches!(
        session.read_identity(),
        Err(Error::UntrustedCertificate(_))
    ));
    assert_eq!(session.state(), SessionState::Closed);

    // Never retried: only select and the certificate read went out
    let element = session.transport();
    assert_eq!(element.exchanges, 2);
    assert_eq!(element.cancellations, 1);
}

#[test]
fn certificate_key_becomes_attestation_key() {
    let subject = attestation_key();
    let der = certificate(&subject, &root_key());
    let key = nexum_se::verify_certificate(&der, &uncompressed(&root_key())).unwrap();
    assert_eq!(key.to_uncompressed(), uncompressed(&subject));
    assert_eq!(key.verifying_key(), subject.verifying_key());
}

#[test]
fn objects_signed_by_other_key_fail_verification() {
    let element = SimulatedElement {
        attestation_key: SigningKey::from_slice(&[0x77; 32]).unwrap(),
        ..SimulatedElement::provisioned()
    };
    let mut session = Session::new(element, test_config());

    assert!(matches!(
        session.read_identity(),
        Err(Error::Verification(ObjectKind::PublicKey))
    ));
    assert_eq!(session.transport().commands_with_ins(0x01), 0);
}

#[test]
fn tampered_attestation_is_rejected() {
    let element = SimulatedElement {
        tamper_attestation: true,
        ..SimulatedElement::provisioned()
    };
    let mut session = Session::new(element, test_config());

    assert!(matches!(
        session.read_identity(),
        Err(Error::Verification(ObjectKind::PublicKey))
    ));
    assert_eq!(session.transport().cancellations, 1);
}

#[test]
fn key_policy_single_byte_deviation_is_rejected() {
    for i in 0..attributes::KEY_POLICY.len() {
        let mut policy = attributes::KEY_POLICY;
        policy[i] ^= 0x80;

        let mut key = SimObject::key(generated_key());
        key.attributes = attribute_blob(
            objects::PUBLIC_KEY,
            attributes::CLASS_KEY,
            0x00,
            &policy,
            attributes::ORIGIN_INTERNAL,
        );
        let element = SimulatedElement {
            public_key: Some(key),
            ..SimulatedElement::default()
        };
        let mut session = Session::new(element, test_config());

        assert!(matches!(
            session.read_identity(),
            Err(Error::PolicyViolation {
                kind: ObjectKind::PublicKey,
                ..
            })
        ));
        assert_eq!(session.transport().cancellations, 1);
    }
}

#[test]
fn asset_policy_single_byte_deviation_is_rejected() {
    for i in 0..attributes::DATA_POLICY.len() {
        let mut policy = attributes::DATA_POLICY;
        policy[i] ^= 0x01;

        let mut asset = SimObject::asset(Blockchain::SOLANA.id, &[0x01, 0x02]);
        asset.attributes = attribute_blob(objects::ASSET, 0x00, 0x00, &policy, 0x01);
        let element = SimulatedElement {
            asset: Some(asset),
            ..SimulatedElement::provisioned()
        };
        let mut session = Session::new(element, test_config());

        assert!(matches!(
            session.read_identity(),
            Err(Error::PolicyViolation {
                kind: ObjectKind::Asset,
                ..
            })
        ));
    }
}

#[test]
fn key_attribute_checks() {
    let cases = [
        // class, auth indicator, origin
        (0x02, 0x00, attributes::ORIGIN_INTERNAL),
        (attributes::CLASS_KEY, attributes::AUTH_OBJECT, attributes::ORIGIN_INTERNAL),
        (attributes::CLASS_KEY, 0x00, 0x01),
    ];

    for (class, auth_indicator, origin) in cases {
        let mut key = SimObject::key(generated_key());
        key.attributes = attribute_blob(
            objects::PUBLIC_KEY,
            class,
            auth_indicator,
            &attributes::KEY_POLICY,
            origin,
        );
        let element = SimulatedElement {
            public_key: Some(key),
            ..SimulatedElement::default()
        };
        let mut session = Session::new(element, test_config());

        assert!(matches!(
            session.read_identity(),
            Err(Error::PolicyViolation { .. })
        ));
    }
}

#[test]
fn second_read_failure_after_create_is_fatal() {
    let element = SimulatedElement {
        create_is_noop: true,
        ..SimulatedElement::default()
    };
    let mut session = Session::new(element, test_config());

    match session.read_identity() {
        Err(Error::ChipCommand {
            description,
            status,
        }) => {
            assert_eq!(description, "Read public key");
            assert_eq!(status, StatusWord::new(0x6A, 0x82));
        }
        other => panic!("expected chip command error, got {other:?}"),
    }

    // Exactly one create and one retry
    let element = session.transport();
    assert_eq!(element.commands_with_ins(0x01), 1);
    assert_eq!(element.commands_with_ins(0x02), 3);
    assert_eq!(element.cancellations, 1);
}

#[test]
fn rejected_create_is_surfaced() {
    let element = SimulatedElement {
        create_status: Some([0x6A, 0x84]),
        ..SimulatedElement::default()
    };
    let mut session = Session::new(element, test_config());

    assert!(matches!(
        session.read_identity(),
        Err(Error::ChipCommand {
            description: "Create address",
            ..
        })
    ));
}

#[test]
fn asset_is_never_created_on_read() {
    let mut session = Session::new(SimulatedElement::provisioned(), test_config());
    let identity = session.read_identity().unwrap();

    assert!(identity.asset.is_none());
    assert_eq!(session.transport().commands_with_ins(0x01), 0);
}

#[test]
fn wrong_applet_fails_selection() {
    let config = test_config().with_aid(vec![0xA0, 0x00, 0x00, 0x00, 0x01]);
    let mut session = Session::new(SimulatedElement::provisioned(), config);

    assert!(matches!(
        session.read_identity(),
        Err(Error::ChipCommand {
            description: "Select applet",
            ..
        })
    ));
    assert_eq!(session.transport().exchanges, 1);
    assert_eq!(session.transport().cancellations, 1);
    assert_eq!(session.state(), SessionState::Closed);

    let mut session = Session::new(SimulatedElement::provisioned(), test_config());
    session.sign_raw_payload(&[0x01]).unwrap();
    assert_eq!(session.state(), SessionState::Done);
}

#[test]
fn timeout_only_set_when_required() {
    let mut session = Session::new(SimulatedElement::provisioned(), test_config());
    session.read_identity().unwrap();
    assert!(session.transport().timeouts.is_empty());

    let element = SimulatedElement {
        requires_timeout: true,
        ..SimulatedElement::provisioned()
    };
    let mut session = Session::new(element, test_config());
    session.read_identity().unwrap();
    assert_eq!(session.transport().timeouts, vec![Duration::from_millis(5000)]);
}

#[test]
fn technology_options_are_forwarded() {
    let config = test_config()
        .with_technology_options(TechnologyOptions::default().with_alert_message("Tap card"));
    let mut session = Session::new(SimulatedElement::provisioned(), config);
    session.read_identity().unwrap();

    assert_eq!(
        session.transport().alert_messages,
        vec![Some("Tap card".to_string())]
    );
}

#[test]
fn each_read_rederives_attestation() {
    let mut session = Session::new(SimulatedElement::provisioned(), test_config());
    let first = session.read_identity().unwrap();
    let second = session.read_identity().unwrap();

    assert_eq!(first, second);
    let element = session.transport();
    assert_eq!(element.technology_requests, 2);
    assert_eq!(element.cancellations, 2);
    // select, certificate, key, asset per read
    assert_eq!(element.exchanges, 8);
}
