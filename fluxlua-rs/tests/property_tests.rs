use proptest::prelude::*;
use fluxlua::number::parse_number;
use fluxlua::{Script, Value};

/// Build a script binding `v` to the given Lua literal.
fn script_with(literal: &str) -> Script {
    Script::from_source("prop.lua", &format!("v = {literal}")).unwrap()
}

/// Quote `s` as a Lua string literal made of decimal byte escapes.
fn lua_quote(s: &str) -> String {
    let mut out = String::from("\"");
    for b in s.bytes() {
        out.push_str(&format!("\\{b:03}"));
    }
    out.push('"');
    out
}

proptest! {
    /// Every resolved scalar carries num == parse_number(str).
    #[test]
    fn scalar_num_matches_str(s in "\\PC{0,24}") {
        let script = script_with(&lua_quote(&s));
        let v = script.get("v").unwrap();
        prop_assert_eq!(v.str(), s.as_str());
        prop_assert_eq!(v.num().to_bits(), parse_number(&s).to_bits());
    }
}

proptest! {
    /// Integers render in plain decimal and parse back exactly.
    #[test]
    fn integers_render_exactly(n in -(1i64 << 53)..(1i64 << 53)) {
        let script = script_with(&n.to_string());
        let v = script.get("v").unwrap();
        prop_assert_eq!(v.str(), n.to_string());
        prop_assert_eq!(v.num(), n as f64);
    }
}

proptest! {
    /// Booleans are always the canonical ("0"|"1", 0|1) pair.
    #[test]
    fn booleans_canonical(b in any::<bool>()) {
        let script = script_with(if b { "true" } else { "false" });
        let v = script.get("v").unwrap();
        prop_assert!(v.str() == "0" || v.str() == "1");
        prop_assert_eq!(v.num(), if b { 1.0 } else { 0.0 });
        prop_assert_eq!(v.value, Value::boolean(b));
    }
}

proptest! {
    /// Table header count equals the number of entries, and integer keys
    /// come back as their exact decimal text.
    #[test]
    fn table_count_and_integer_keys(keys in prop::collection::btree_set(-(1i64 << 53)..(1i64 << 53), 0..16)) {
        let body: Vec<String> = keys.iter().map(|k| format!("[{k}] = {k}")).collect();
        let script = script_with(&format!("{{ {} }}", body.join(", ")));
        let v = script.get("v").unwrap();

        prop_assert_eq!(v.num() as usize, keys.len());
        let records = v.to_records();
        prop_assert_eq!(records[0].num as usize, records.len() - 1);

        for k in &keys {
            let entry = v.value.get(&k.to_string());
            prop_assert!(entry.is_some(), "key {} missing", k);
            prop_assert_eq!(entry.unwrap().str(), k.to_string());
        }
    }
}

proptest! {
    /// Resolution never panics on arbitrary paths; it succeeds or errors.
    #[test]
    fn arbitrary_paths_do_not_panic(path in "[a-z.]{0,12}") {
        let script = script_with("{ a = { b = 1 } }");
        let _ = script.get(&path);
        prop_assert_eq!(script.get("v.a.b").unwrap().num(), 1.0);
    }
}
