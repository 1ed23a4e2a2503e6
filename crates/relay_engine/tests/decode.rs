use pretty_assertions::assert_eq;
use relay_engine::decode_body;

#[test]
fn plain_utf8_passes_through() {
    let decoded = decode_body("<p>héllo</p>".as_bytes(), None);
    assert_eq!(decoded.text, "<p>héllo</p>");
    assert_eq!(decoded.encoding_label, "UTF-8");
    assert!(!decoded.had_errors);
}

#[test]
fn content_type_charset_is_honoured() {
    // "café" in windows-1252
    let bytes = [0x63, 0x61, 0x66, 0xE9];
    let decoded = decode_body(&bytes, Some("text/html; charset=\"windows-1252\""));
    assert_eq!(decoded.text, "café");
    assert_eq!(decoded.encoding_label, "windows-1252");
}

#[test]
fn bom_wins_over_header() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("ok".as_bytes());
    let decoded = decode_body(&bytes, Some("text/html; charset=iso-8859-1"));
    assert_eq!(decoded.text, "ok");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn invalid_bytes_fall_back_to_detection_without_failing() {
    let bytes = [b'a', 0xFF, b'b'];
    let decoded = decode_body(&bytes, Some("text/html"));
    assert!(decoded.text.starts_with('a'));
    assert!(decoded.text.ends_with('b'));
}
