use std::collections::HashMap;

use simulac_core::{from_json_slice, to_canonical_json_bytes, Fate};

#[test]
fn object_keys_come_out_sorted() {
    let mut counts = HashMap::new();
    counts.insert("lytic", 3);
    counts.insert("lysogenic", 1);
    counts.insert("aborted", 0);
    let bytes = to_canonical_json_bytes(&counts).expect("serialize");
    let text = String::from_utf8(bytes).expect("utf-8");
    let aborted = text.find("aborted").expect("aborted");
    let lysogenic = text.find("lysogenic").expect("lysogenic");
    let lytic = text.find("lytic").expect("lytic");
    assert!(aborted < lysogenic && lysogenic < lytic);
}

#[test]
fn slices_decode_and_failures_carry_a_code() {
    let fates: Vec<Fate> = from_json_slice(b"[1, 0]").expect("decode");
    assert_eq!(fates, vec![Fate::Lysogenic, Fate::Lytic]);
    let err = from_json_slice::<Vec<Fate>>(b"[2]").expect_err("bad code");
    assert_eq!(err.code(), "json_deserialize");
}
