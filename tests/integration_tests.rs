//! Integration tests for token-conservation

use secp256k1::SecretKey;
use token_conservation::pushdrop::create_token_script;
use token_conservation::transaction::{compute_txid, txid_to_hex};
use token_conservation::*;

fn key(seed: u8) -> SecretKey {
    SecretKey::from_slice(&[seed; 32]).unwrap()
}

fn token(amount: TokenAmount) -> ByteString {
    create_token_script(&key(0x42), amount).unwrap()
}

fn spent(amount: TokenAmount) -> SpentOutput {
    SpentOutput {
        outpoint: OutPoint { hash: [5; 32], index: 0 },
        output_script: token(amount),
    }
}

fn transaction(scripts: Vec<ByteString>) -> Transaction {
    Transaction {
        version: 1,
        inputs: vec![TransactionInput {
            prevout: OutPoint { hash: [5; 32], index: 0 },
            script_sig: vec![0x51],
            sequence: 0xffffffff,
        }],
        outputs: scripts
            .into_iter()
            .map(|script_pubkey| TransactionOutput { value: 1, script_pubkey })
            .collect(),
        lock_time: 0,
    }
}

#[test]
fn test_issuance_admits_first_output_without_spends() {
    let tx = transaction(vec![token(21_000_000)]);
    let manager = TokenManager::new(compute_txid(&tx).unwrap());

    assert_eq!(manager.admissible_outputs(&[], &tx).unwrap(), vec![0]);
}

#[test]
fn test_issuance_ignores_spent_output_contents() {
    let tx = transaction(vec![vec![0x6a], token(5)]);
    let manager = TokenManager::new(compute_txid(&tx).unwrap());
    let junk = SpentOutput {
        outpoint: OutPoint { hash: [0; 32], index: 3 },
        output_script: vec![0xff, 0xff],
    };

    let result = manager.identify_admissible_outputs(&[junk], &tx).unwrap();
    assert_eq!(result, AdmissionResult::Issuance);
    assert_eq!(result.admissible_outputs(), vec![0]);
}

#[test]
fn test_split_conserving_transfer() {
    let manager = TokenManager::new([0; 32]);
    let tx = transaction(vec![token(4), token(6)]);

    assert_eq!(manager.admissible_outputs(&[spent(10)], &tx).unwrap(), vec![0, 1]);
}

#[test]
fn test_inflating_transfer_admits_nothing() {
    let manager = TokenManager::new([0; 32]);
    let tx = transaction(vec![token(4), token(7)]);

    let result = manager.identify_admissible_outputs(&[spent(10)], &tx).unwrap();
    assert_eq!(
        result,
        AdmissionResult::Rejected(Rejection::ConservationViolated { created: 11, redeemed: 10 })
    );
    assert!(result.admissible_outputs().is_empty());
}

#[test]
fn test_non_token_output_is_excluded() {
    let manager = TokenManager::new([0; 32]);
    let mut p2pkh = vec![0x76, 0xa9, 0x14];
    p2pkh.extend_from_slice(&[0xab; 20]);
    p2pkh.extend_from_slice(&[0x88, 0xac]);
    let tx = transaction(vec![token(3), p2pkh]);

    let result = manager.identify_admissible_outputs(&[spent(10)], &tx).unwrap();
    match result {
        AdmissionResult::Admitted(tally) => {
            assert_eq!(tally.admitted, vec![0]);
            assert_eq!(tally.created, 3);
            assert_eq!(tally.redeemed, 10);
            assert_eq!(tally.excluded.len(), 1);
            assert_eq!(tally.excluded[0].output_index, 1);
            assert!(matches!(
                tally.excluded[0].reason,
                DecodeFailure::Script(ScriptError::NotPushDrop(_))
            ));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_merge_of_several_spends() {
    let manager = TokenManager::new([0; 32]);
    let tx = transaction(vec![token(12)]);
    let spends = vec![spent(5), spent(4), spent(3)];

    assert_eq!(manager.admissible_outputs(&spends, &tx).unwrap(), vec![0]);
    assert!(manager
        .admissible_outputs(&spends[..2], &tx)
        .unwrap()
        .is_empty());
}

#[test]
fn test_burning_is_allowed() {
    let manager = TokenManager::new([0; 32]);
    let tx = transaction(vec![token(1)]);

    assert_eq!(manager.admissible_outputs(&[spent(100)], &tx).unwrap(), vec![0]);
}

#[test]
fn test_tokens_from_any_key_count() {
    let manager = TokenManager::new([0; 32]);
    let tx = transaction(vec![
        create_token_script(&key(1), 2).unwrap(),
        create_token_script(&key(2), 3).unwrap(),
    ]);

    assert_eq!(manager.admissible_outputs(&[spent(5)], &tx).unwrap(), vec![0, 1]);
}

#[test]
fn test_admitted_indices_follow_output_order() {
    let manager = TokenManager::new([0; 32]);
    let tx = transaction(vec![vec![0x6a], token(1), vec![0x6a], token(2), token(3)]);

    assert_eq!(manager.admissible_outputs(&[spent(6)], &tx).unwrap(), vec![1, 3, 4]);
}

#[test]
fn test_from_config_matches_issuance() {
    let tx = transaction(vec![token(50)]);
    let json = format!(r#"{{ "issuanceTxid": "{}" }}"#, txid_to_hex(&compute_txid(&tx).unwrap()));
    let config = TokenConfig::from_json_str(&json).unwrap();
    let manager = TokenManager::from_config(&config).unwrap();

    assert_eq!(manager.issuance_txid(), &compute_txid(&tx).unwrap());
    assert_eq!(manager.admissible_outputs(&[], &tx).unwrap(), vec![0]);
}

#[test]
fn test_from_config_file() {
    let path = std::env::temp_dir().join(format!("token-topic-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::json!({ "issuanceTxid": "00".repeat(32) }).to_string())
        .unwrap();

    let config = TokenConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let manager = TokenManager::from_config(&config).unwrap();
    assert_eq!(manager.issuance_txid(), &[0u8; 32]);
}

#[test]
fn test_manager_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenManager>();

    let manager = std::sync::Arc::new(TokenManager::new([0; 32]));
    let handles: Vec<_> = (1..=4u64)
        .map(|n| {
            let manager = manager.clone();
            std::thread::spawn(move || {
                let tx = transaction(vec![token(n)]);
                manager.admissible_outputs(&[spent(n)], &tx).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec![0]);
    }
}

/// Codec where a script is `T:` followed by comma-separated fields
struct TextCodec;

impl ScriptCodec for TextCodec {
    fn decode(&self, script: &[u8]) -> std::result::Result<TokenFields, ScriptError> {
        let body = script
            .strip_prefix(b"T:")
            .ok_or_else(|| ScriptError::NotPushDrop("missing prefix".to_string()))?;
        Ok(TokenFields {
            locking_public_key: vec![],
            fields: body.split(|b| *b == b',').map(|f| f.to_vec()).collect(),
        })
    }

    fn encode(&self, token: &TokenFields) -> std::result::Result<ByteString, ScriptError> {
        let mut script = b"T:".to_vec();
        script.extend_from_slice(&token.fields.join(&b','));
        Ok(script)
    }
}

#[test]
fn test_custom_codec() {
    let manager = TokenManager::with_codec([0; 32], TextCodec);
    let spends = vec![SpentOutput {
        outpoint: OutPoint { hash: [5; 32], index: 0 },
        output_script: b"T:9,sig".to_vec(),
    }];
    let tx = transaction(vec![b"T:4,sig".to_vec(), b"T:5".to_vec(), b"T:0".to_vec()]);

    assert_eq!(manager.admissible_outputs(&spends, &tx).unwrap(), vec![0, 1]);
}
