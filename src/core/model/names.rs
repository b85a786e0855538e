/// Turn an engine type descriptor such as `Lcom/acme/Outer$Inner;` into a
/// qualified name (`com.acme.Outer$Inner`) and a short display name
/// (`Outer_Inner`).
///
/// The first character is always treated as the descriptor marker. A trailing
/// `;` terminator is dropped when present.
pub fn normalize_class_name(raw: &str) -> (String, String) {
    let mut chars = raw.chars();
    chars.next();
    let body = chars.as_str();
    let body = body.strip_suffix(';').unwrap_or(body);

    let qualified = body.replace('/', ".");
    let short = qualified
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .replace('$', "_");

    (qualified, short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_with_nested_class() {
        let (qualified, short) = normalize_class_name("LFoo/Bar$Baz;");
        assert_eq!(qualified, "Foo.Bar$Baz");
        assert_eq!(short, "Bar_Baz");
    }

    #[test]
    fn test_descriptor_without_terminator() {
        let (qualified, short) = normalize_class_name("Lcom/ibm/daytrader/TradeAction");
        assert_eq!(qualified, "com.ibm.daytrader.TradeAction");
        assert_eq!(short, "TradeAction");
    }

    #[test]
    fn test_default_package() {
        let (qualified, short) = normalize_class_name("LMain");
        assert_eq!(qualified, "Main");
        assert_eq!(short, "Main");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(normalize_class_name(""), (String::new(), String::new()));
        assert_eq!(normalize_class_name("L"), (String::new(), String::new()));
    }
}
