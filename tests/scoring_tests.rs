// tests/scoring_tests.rs
//
// Pure-logic coverage: scoring semantics, answer-key crypto, and the
// hand-rolled ABI/signing helpers against known vectors.

use std::collections::HashMap;

use creatordao_backend::chain::registry::decode_quiz;
use creatordao_backend::chain::{Signer, abi};
use creatordao_backend::handlers::quiz::{decrypt_answer_key, score_submission};
use creatordao_backend::models::quiz::QuizQuestion;
use creatordao_backend::utils::crypto;
use serde_json::{Value, json};

const SECRET: &str = "scoring_tests_secret";

fn questions(prompts: &[&str]) -> Vec<QuizQuestion> {
    prompts
        .iter()
        .map(|prompt| QuizQuestion {
            question: prompt.to_string(),
            options: vec!["a".to_string(), "b".to_string()],
        })
        .collect()
}

fn value_map(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn scoring_counts_only_exact_matches() {
    let questions = questions(&["Q0", "Q1", "Q2"]);
    let answer_key = value_map(json!({"0": "1", "2": "0"}));
    let user_answers = value_map(json!({"0": 1, "2": 1}));

    // Q0 correct, Q2 wrong, Q1 unanswered
    assert_eq!(score_submission(&questions, &answer_key, &user_answers), 1);
}

#[test]
fn scoring_empty_submission_is_zero() {
    let questions = questions(&["Q0", "Q1", "Q2"]);
    let answer_key = value_map(json!({"0": "1", "2": "0"}));

    assert_eq!(score_submission(&questions, &answer_key, &HashMap::new()), 0);
}

#[test]
fn scoring_coerces_numbers_and_strings() {
    let questions = questions(&["Q0", "Q1"]);
    // Key values stored as numbers, submitted answers as strings.
    let answer_key = value_map(json!({"0": 1, "1": 0}));
    let user_answers = value_map(json!({"0": "1", "1": "2"}));

    assert_eq!(score_submission(&questions, &answer_key, &user_answers), 1);
}

#[test]
fn scoring_ignores_answers_outside_question_list() {
    let questions = questions(&["Q0"]);
    let answer_key = value_map(json!({"0": "0"}));
    let user_answers = value_map(json!({"0": 0, "5": 1}));

    assert_eq!(score_submission(&questions, &answer_key, &user_answers), 1);
}

#[test]
fn crypto_round_trips() {
    let plaintext = r#"{"0":"1","2":"0"}"#;

    let first = crypto::encrypt(plaintext, SECRET).unwrap();
    let second = crypto::encrypt(plaintext, SECRET).unwrap();

    // Both ciphertexts decrypt to the original; equality of the ciphertexts
    // themselves is not part of the contract (random nonce per call).
    assert_eq!(crypto::decrypt(&first, SECRET).unwrap(), plaintext);
    assert_eq!(crypto::decrypt(&second, SECRET).unwrap(), plaintext);
}

#[test]
fn crypto_rejects_wrong_secret() {
    let encrypted = crypto::encrypt("payload", SECRET).unwrap();
    assert!(crypto::decrypt(&encrypted, "another_secret").is_err());
}

#[test]
fn crypto_rejects_tampered_ciphertext() {
    let encrypted = crypto::encrypt("payload", SECRET).unwrap();
    let mut bytes = encrypted.into_bytes();
    let middle = bytes.len() / 2;
    bytes[middle] = if bytes[middle] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert!(crypto::decrypt(&tampered, SECRET).is_err());
}

#[test]
fn answer_key_must_decrypt_to_json() {
    let encrypted = crypto::encrypt("not a json object", SECRET).unwrap();
    assert!(decrypt_answer_key(&encrypted, SECRET).is_err());

    let encrypted = crypto::encrypt(r#"{"0":"1"}"#, SECRET).unwrap();
    let key = decrypt_answer_key(&encrypted, SECRET).unwrap();
    assert_eq!(key.get("0"), Some(&json!("1")));
}

#[test]
fn selector_matches_known_vector() {
    // keccak256("transfer(address,uint256)") starts with a9059cbb
    assert_eq!(abi::selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
}

#[test]
fn signer_derives_known_address() {
    let signer = Signer::from_hex(
        "0x0000000000000000000000000000000000000000000000000000000000000001",
    )
    .unwrap();

    // Well-known address for private key 1.
    assert_eq!(
        signer.address.to_string(),
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    );
}

#[test]
fn decode_quiz_reads_hand_built_tuple() {
    let uri = b"ipfs://QmExampleQuiz";

    let mut data = Vec::new();
    data.extend(abi::encode_uint(3)); // maxTrials
    data.extend(abi::encode_uint(2)); // minScore
    data.extend(abi::encode_uint(1)); // exists
    data.extend(abi::encode_uint(1234)); // deadline
    data.extend(abi::encode_uint(5000)); // prizeAmount
    data.extend(abi::encode_uint(6 * 32)); // offset of metadataURI
    data.extend(abi::encode_uint(uri.len() as u128));
    let mut tail = uri.to_vec();
    tail.resize(32, 0);
    data.extend(tail);

    let quiz = decode_quiz(&data).unwrap();
    assert_eq!(quiz.max_trials, 3);
    assert_eq!(quiz.min_score, 2);
    assert!(quiz.exists);
    assert_eq!(quiz.deadline, 1234);
    assert_eq!(quiz.prize_amount, 5000);
    assert_eq!(quiz.metadata_uri, "ipfs://QmExampleQuiz");
}

#[test]
fn sign_legacy_produces_raw_transaction() {
    let signer = Signer::from_hex(
        "0x0000000000000000000000000000000000000000000000000000000000000001",
    )
    .unwrap();
    let to = "0x0000000000000000000000000000000000000002".parse().unwrap();

    let raw = signer
        .sign_legacy(1315, 0, 1_000_000_000, 100_000, to, 0, &[0xde, 0xad])
        .unwrap();

    // RLP list header over hex payload; signing is deterministic (RFC 6979),
    // so the same inputs always produce the same raw transaction.
    assert!(raw.starts_with("0xf8"));
    assert_eq!(raw, signer.sign_legacy(1315, 0, 1_000_000_000, 100_000, to, 0, &[0xde, 0xad]).unwrap());
}
