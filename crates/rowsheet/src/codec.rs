//! Record codec: one delimited text record <-> ordered fields.
//!
//! There is no quoting or escaping. A field that contains the separator
//! splits into two fields when the record is read back.

/// The only field separator records use
pub const SEPARATOR: char = ',';

/// Split a record on every occurrence of `separator`.
///
/// Empty input yields a single empty field and a trailing separator yields a
/// trailing empty field. Fields are not trimmed.
///
/// ```
/// use rowsheet::codec::{split, SEPARATOR};
///
/// assert_eq!(split("a,,c", SEPARATOR), vec!["a", "", "c"]);
/// assert_eq!(split("", SEPARATOR), vec![""]);
/// ```
pub fn split(record: &str, separator: char) -> Vec<String> {
    record.split(separator).map(str::to_string).collect()
}

/// Join fields with `separator` between consecutive entries
pub fn join<S: AsRef<str>>(fields: &[S], separator: char) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(field.as_ref());
    }
    out
}
