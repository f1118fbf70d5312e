//! cleartool format strings for stable output parsing
//!
//! `lshistory -fmt` expands `%` directives per event. The escapes (`\"`, `\n`)
//! are interpreted by cleartool itself, so they are passed through literally.

/// Delimiter wrapped around every field of a history header line
pub const FIELD_DELIMITER: char = '"';

/// Number of quoted fields in a history header line
pub const FIELD_COUNT: usize = 6;

/// Format strings for cleartool commands
pub struct Formats;

impl Formats {
    /// Format for `cleartool lshistory`
    ///
    /// Fields (each double-quoted, separated by a space):
    /// 1. `%Nd` date (`YYYYMMDD.HHMMSS`)
    /// 2. `%u` user
    /// 3. `%e` event kind (e.g. "create version")
    /// 4. `%En` element path
    /// 5. `%Vn` version label
    /// 6. `%o` operation code (e.g. "checkin")
    ///
    /// followed by a newline, the free-text comment (`%c`) and a final newline.
    pub fn lshistory() -> &'static str {
        concat!(
            r#"\"%Nd\" "#,
            r#"\"%u\" "#,
            r#"\"%e\" "#,
            r#"\"%En\" "#,
            r#"\"%Vn\" "#,
            r#"\"%o\" "#,
            r#"\n%c\n"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lshistory_format_is_stable() {
        assert_eq!(
            Formats::lshistory(),
            r#"\"%Nd\" \"%u\" \"%e\" \"%En\" \"%Vn\" \"%o\" \n%c\n"#
        );
    }

    #[test]
    fn test_lshistory_format_has_every_field() {
        let format = Formats::lshistory();
        for directive in ["%Nd", "%u", "%e", "%En", "%Vn", "%o", "%c"] {
            assert!(format.contains(directive), "missing {directive}");
        }
        assert_eq!(format.matches(r#"\""#).count(), FIELD_COUNT * 2);
    }
}
