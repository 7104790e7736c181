use shulebase::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_and_verify() {
    let hashed = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password("correct horse battery staple", &hashed).unwrap());
}

#[test]
fn test_wrong_password_fails_verification() {
    let hashed = hash_password("correct horse battery staple").unwrap();
    assert!(!verify_password("incorrect horse", &hashed).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("same-input").unwrap();
    let second = hash_password("same-input").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_hash_is_not_plaintext() {
    let hashed = hash_password("sensitive").unwrap();
    assert!(!hashed.contains("sensitive"));
}
