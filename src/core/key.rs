//! Message key derivation.
//!
//! A key is built from the literal fragments of a template, with the
//! interpolated expressions replaced by positional markers:
//!
//! ```text
//! `Hello ${name}!`  ->  ["Hello ", "!"]  ->  "Hello $1!"
//! ```

/// Canonical lookup string derived from a message's literal fragments.
pub type Key = String;

/// Derive the key for an ordered sequence of template fragments.
///
/// Every literal `$` is doubled, fragment `i` is prefixed with the decimal
/// digits of `i` and the fragments are joined with `$`. The leading `0` of
/// the first fragment is dropped, so a template without expressions maps to
/// its own (escaped) text.
///
/// # Examples
///
/// ```
/// use i18n_bake::core::key::derive_key;
///
/// assert_eq!(derive_key(&["hi"]), "hi");
/// assert_eq!(derive_key(&["hi", "there"]), "hi$1there");
/// assert_eq!(derive_key(&["h$i", "t$$$here"]), "h$$i$1t$$$$$$here");
/// ```
pub fn derive_key<S: AsRef<str>>(fragments: &[S]) -> Key {
    let mut key = String::new();
    for (index, fragment) in fragments.iter().enumerate() {
        if index > 0 {
            key.push('$');
            key.push_str(&index.to_string());
        }
        key.push_str(&fragment.as_ref().replace('$', "$$"));
    }
    key
}
