use super::*;

#[test]
fn test_is_yes() {
    assert!(is_yes("y"));
    assert!(is_yes(" YES \n"));
    assert!(is_yes("Yes"));
    assert!(!is_yes(""));
    assert!(!is_yes("n"));
    assert!(!is_yes("yep"));
}
