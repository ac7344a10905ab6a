//! Growable byte string with path and extension helpers.
//!
//! [`UiString`] behaves like a NUL-terminated C string held in a growable
//! buffer: it never contains an interior NUL (construction stops at the
//! first one) and every index past the end reads as `0`.
//!
//! # Permissive edits
//!
//! Out-of-range edits are not errors. [`UiString::insert_at`] and
//! [`UiString::delete_at`] leave the string untouched and report
//! [`Edit::Ignored`]. Note that `delete_at` also ignores a range that starts
//! inside the string but runs past its end instead of trimming to the end;
//! callers that want a clamp must compute it themselves.
//!
//! # Path helpers
//!
//! The path helpers scan backwards from the terminating NUL, which gives a
//! few edge cases that callers rely on:
//!
//! - a separator at index 0 is kept by [`UiString::strip_path`]
//!   (`"/song.xm"` stays `"/song.xm"`),
//! - a dot at index 0 is not treated as an extension separator by
//!   [`UiString::strip_extension`],
//! - [`UiString::compare_extensions`] only recognizes `/` as a separator and
//!   its "no extension" handling is asymmetric (see the method).

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

/// Outcome of an edit that may be silently refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Edit {
    Applied,
    /// Index or length out of range; the string is unchanged.
    Ignored,
}

/// Growable byte string.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct UiString {
    bytes: Vec<u8>,
}

#[inline]
fn lower(c: u8) -> u8 {
    c.to_ascii_lowercase()
}

/// C-style comparison over NUL-terminated views: difference of the first
/// differing bytes, `0` when equal.
fn compare_bytes(a: &[u8], b: &[u8], fold: bool) -> i32 {
    let mut i = 0;
    loop {
        let mut ca = a.get(i).copied().unwrap_or(0);
        let mut cb = b.get(i).copied().unwrap_or(0);
        if fold {
            ca = lower(ca);
            cb = lower(cb);
        }
        if ca != cb || ca == 0 {
            return ca as i32 - cb as i32;
        }
        i += 1;
    }
}

impl UiString {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Copy `bytes` up to (not including) the first NUL.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Self {
            bytes: bytes[..end].to_vec(),
        }
    }

    pub fn from_char(c: u8) -> Self {
        Self::from_bytes(&[c])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes followed by a terminating NUL.
    pub fn to_asciiz(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + 1);
        out.extend_from_slice(&self.bytes);
        out.push(0);
        out
    }

    /// Text for rendering; invalid UTF-8 is replaced.
    pub fn to_str_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Byte at `index`, or `0` past the end.
    pub fn char_at(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    /// Insert `other` before `index`. Ignored when `index > len`.
    pub fn insert_at(&mut self, index: usize, other: &UiString) -> Edit {
        if index > self.bytes.len() {
            return Edit::Ignored;
        }
        self.bytes
            .splice(index..index, other.bytes.iter().copied());
        Edit::Applied
    }

    pub fn append(&mut self, other: &UiString) {
        self.bytes.extend_from_slice(&other.bytes);
    }

    /// Append one byte; a NUL is dropped.
    pub fn append_char(&mut self, c: u8) {
        if c != 0 {
            self.bytes.push(c);
        }
    }

    /// Remove `count` bytes starting at `index`.
    ///
    /// Ignored when `index` is at or past the end, when `count` exceeds the
    /// length, or when the range would run past the end.
    pub fn delete_at(&mut self, index: usize, count: usize) -> Edit {
        let len = self.bytes.len();
        if index >= len || count > len || index + count > len {
            return Edit::Ignored;
        }
        self.bytes.drain(index..index + count);
        Edit::Applied
    }

    /// Bytes `lo..hi`, truncated at the end of the string.
    pub fn sub_string(&self, lo: usize, hi: usize) -> UiString {
        let hi = hi.min(self.bytes.len());
        if lo >= hi {
            return UiString::new();
        }
        UiString {
            bytes: self.bytes[lo..hi].to_vec(),
        }
    }

    /// Take over the contents of `other`.
    pub fn replace(&mut self, other: &UiString) {
        self.bytes.clone_from(&other.bytes);
    }

    pub fn compare_to(&self, other: &UiString) -> i32 {
        compare_bytes(&self.bytes, &other.bytes, false)
    }

    /// ASCII case-insensitive comparison, locale independent.
    pub fn compare_to_no_case(&self, other: &UiString) -> i32 {
        compare_bytes(&self.bytes, &other.bytes, true)
    }

    pub fn starts_with(&self, prefix: &UiString) -> bool {
        self.bytes.starts_with(&prefix.bytes)
    }

    /// Leading decimal integer (whitespace and a sign allowed), `0` if none.
    pub fn int_value(&self) -> i32 {
        let mut iter = self
            .bytes
            .iter()
            .copied()
            .skip_while(|c| c.is_ascii_whitespace())
            .peekable();
        let negative = match iter.peek() {
            Some(b'-') => {
                iter.next();
                true
            }
            Some(b'+') => {
                iter.next();
                false
            }
            _ => false,
        };
        let mut value: i32 = 0;
        for c in iter {
            if !c.is_ascii_digit() {
                break;
            }
            value = value.wrapping_mul(10).wrapping_add((c - b'0') as i32);
        }
        if negative { value.wrapping_neg() } else { value }
    }

    /// Number of lines; a trailing newline does not start a new one.
    pub fn count_lines(&self) -> usize {
        let len = self.bytes.len();
        1 + self
            .bytes
            .iter()
            .enumerate()
            .filter(|&(i, &c)| c == b'\n' && i + 1 != len)
            .count()
    }

    pub fn to_upper(&mut self) {
        self.bytes.make_ascii_uppercase();
    }

    pub fn to_lower(&mut self) {
        self.bytes.make_ascii_lowercase();
    }

    /// Scan back from the terminating NUL until `stop` matches or index 0.
    fn scan_back(&self, stop: impl Fn(u8) -> bool) -> usize {
        let mut pos = self.bytes.len();
        while pos > 0 && !stop(self.char_at(pos)) {
            pos -= 1;
        }
        pos
    }

    /// File name part of a path.
    pub fn strip_path(&self) -> UiString {
        let mut pos = self.scan_back(|c| c == b'/' || c == b'\\');
        if pos != 0 {
            pos += 1;
        }
        UiString::from_bytes(&self.bytes[pos..])
    }

    /// Path without its extension (and without the dot).
    pub fn strip_extension(&self) -> UiString {
        let pos = self.scan_back(|c| c == b'.' || c == b'/' || c == b'\\');
        match self.char_at(pos) {
            b'/' | b'\\' => self.clone(),
            _ if pos != 0 => UiString::from_bytes(&self.bytes[..pos]),
            _ => self.clone(),
        }
    }

    /// Extension including the leading dot, or an empty string.
    pub fn get_extension(&self) -> UiString {
        let pos = self.scan_back(|c| c == b'.' || c == b'/' || c == b'\\');
        if self.char_at(pos) != b'.' {
            return UiString::new();
        }
        UiString::from_bytes(&self.bytes[pos..])
    }

    /// Position just past the extension dot, and whether the extension is
    /// missing (no dot, or nothing after it).
    fn extension_start(&self) -> (usize, bool) {
        let pos = self.scan_back(|c| c == b'.' || c == b'/');
        let mut missing = self.char_at(pos) != b'.';
        let start = pos + 1;
        if self.char_at(start) == 0 {
            missing = true;
        }
        (start.min(self.bytes.len()), missing)
    }

    /// Case-insensitive comparison of the two extensions.
    ///
    /// When `other` has no extension the result is `0` if `self` has none
    /// either and `1` otherwise. When only `self` lacks one, the bytes after
    /// its scan position are compared against `other`'s extension, so
    /// `"abc"` compares equal to `"x.bc"`.
    pub fn compare_extensions(&self, other: &UiString) -> i32 {
        let (src, no_ext) = self.extension_start();
        let (dst, other_missing) = other.extension_start();
        if other_missing {
            return if no_ext { 0 } else { 1 };
        }
        compare_bytes(&self.bytes[src..], &other.bytes[dst..], true)
    }

    /// Whether the extension equals `extension` (no dot), ignoring case.
    pub fn compare_to_extension(&self, extension: &UiString) -> bool {
        let (start, missing) = self.extension_start();
        if missing {
            return false;
        }
        compare_bytes(&self.bytes[start..], &extension.bytes, true) == 0
    }

    /// Append `c` unless the string is empty or already ends with it.
    pub fn ensure_trailing_char(&mut self, c: u8) {
        if let Some(&last) = self.bytes.last()
            && last != c
        {
            self.append_char(c);
        }
    }
}

impl From<&str> for UiString {
    fn from(s: &str) -> Self {
        UiString::from_bytes(s.as_bytes())
    }
}

impl PartialOrd for UiString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UiString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other).cmp(&0)
    }
}

impl fmt::Display for UiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for UiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.bytes))
    }
}

/// File-type filter entry: an extension (without dot) and a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub extension: UiString,
    pub description: UiString,
}

impl Descriptor {
    pub fn new(extension: &str, description: &str) -> Self {
        Self {
            extension: extension.into(),
            description: description.into(),
        }
    }

    /// Whether `path` carries this descriptor's extension.
    pub fn matches(&self, path: &UiString) -> bool {
        path.compare_to_extension(&self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> UiString {
        UiString::from(text)
    }

    #[test]
    fn construction_stops_at_nul() {
        let v = UiString::from_bytes(b"abc\0def");
        assert_eq!(v.as_bytes(), b"abc");
        assert_eq!(v.to_asciiz(), b"abc\0".to_vec());
    }

    #[test]
    fn char_at_past_end_is_zero() {
        let v = s("ab");
        assert_eq!(v.char_at(1), b'b');
        assert_eq!(v.char_at(2), 0);
        assert_eq!(v.char_at(100), 0);
    }

    #[test]
    fn insert_and_append() {
        let mut v = s("tracker");
        assert_eq!(v.insert_at(0, &s("milky")), Edit::Applied);
        assert_eq!(v.as_bytes(), b"milkytracker");
        assert_eq!(v.insert_at(v.len(), &s("!")), Edit::Applied);
        assert_eq!(v.as_bytes(), b"milkytracker!");
        assert_eq!(v.insert_at(100, &s("x")), Edit::Ignored);
        assert_eq!(v.as_bytes(), b"milkytracker!");

        v.append_char(b'?');
        v.append(&s("ok"));
        assert_eq!(v.as_bytes(), b"milkytracker!?ok");
    }

    #[test]
    fn delete_at_is_permissive() {
        let mut v = s("abcdef");
        assert_eq!(v.delete_at(1, 2), Edit::Applied);
        assert_eq!(v.as_bytes(), b"adef");

        assert_eq!(v.delete_at(4, 1), Edit::Ignored);
        assert_eq!(v.delete_at(0, 5), Edit::Ignored);
        // Starts inside, runs past the end: refused rather than trimmed.
        assert_eq!(v.delete_at(2, 3), Edit::Ignored);
        assert_eq!(v.as_bytes(), b"adef");

        assert_eq!(v.delete_at(2, 2), Edit::Applied);
        assert_eq!(v.as_bytes(), b"ad");
    }

    #[test]
    fn sub_string_truncates() {
        let v = s("pattern");
        assert_eq!(v.sub_string(1, 4).as_bytes(), b"att");
        assert_eq!(v.sub_string(3, 100).as_bytes(), b"tern");
        assert!(v.sub_string(5, 2).is_empty());
    }

    #[test]
    fn comparisons() {
        assert_eq!(s("abc").compare_to(&s("abc")), 0);
        assert!(s("abc").compare_to(&s("abd")) < 0);
        assert!(s("abcd").compare_to(&s("abc")) > 0);
        assert_eq!(s("Song.XM").compare_to_no_case(&s("song.xm")), 0);
        assert!(s("A").compare_to_no_case(&s("b")) < 0);
        assert!(s("instrument").starts_with(&s("instr")));
        assert!(!s("ins").starts_with(&s("instr")));
    }

    #[test]
    fn int_value_reads_leading_number() {
        assert_eq!(s("  42abc").int_value(), 42);
        assert_eq!(s("-17").int_value(), -17);
        assert_eq!(s("+8").int_value(), 8);
        assert_eq!(s("x12").int_value(), 0);
        assert_eq!(s("").int_value(), 0);
    }

    #[test]
    fn count_lines_ignores_trailing_newline() {
        assert_eq!(s("").count_lines(), 1);
        assert_eq!(s("one\ntwo").count_lines(), 2);
        assert_eq!(s("one\ntwo\n").count_lines(), 2);
        assert_eq!(s("\n\n").count_lines(), 2);
    }

    #[test]
    fn case_folding_is_ascii_only() {
        let mut v = UiString::from_bytes(&[b'a', b'Z', 0xE4, b'1']);
        v.to_upper();
        assert_eq!(v.as_bytes(), &[b'A', b'Z', 0xE4, b'1']);
        v.to_lower();
        assert_eq!(v.as_bytes(), &[b'a', b'z', 0xE4, b'1']);
    }

    #[test]
    fn strip_path_variants() {
        assert_eq!(s("mods/song.xm").strip_path().as_bytes(), b"song.xm");
        assert_eq!(s("C:\\mods\\song.xm").strip_path().as_bytes(), b"song.xm");
        assert_eq!(s("song.xm").strip_path().as_bytes(), b"song.xm");
        assert_eq!(s("mods/").strip_path().as_bytes(), b"");
        // Leading separator is kept.
        assert_eq!(s("/song.xm").strip_path().as_bytes(), b"/song.xm");
    }

    #[test]
    fn strip_extension_variants() {
        assert_eq!(s("song.xm").strip_extension().as_bytes(), b"song");
        assert_eq!(s("a.b.mod").strip_extension().as_bytes(), b"a.b");
        assert_eq!(s("dir.v2/song").strip_extension().as_bytes(), b"dir.v2/song");
        assert_eq!(s("song").strip_extension().as_bytes(), b"song");
        assert_eq!(s(".xm").strip_extension().as_bytes(), b".xm");
    }

    #[test]
    fn get_extension_variants() {
        assert_eq!(s("song.xm").get_extension().as_bytes(), b".xm");
        assert_eq!(s("song.").get_extension().as_bytes(), b".");
        assert!(s("song").get_extension().is_empty());
        assert!(s("dir.v2\\song").get_extension().is_empty());
    }

    #[test]
    fn compare_extensions_keeps_observed_tie_breaking() {
        assert_eq!(s("a.XM").compare_extensions(&s("b.xm")), 0);
        assert!(s("a.mod").compare_extensions(&s("b.xm")) < 0);

        // Neither has an extension, or an empty one: equal.
        assert_eq!(s("a").compare_extensions(&s("b")), 0);
        assert_eq!(s("a.").compare_extensions(&s("b")), 0);
        assert_eq!(s("a").compare_extensions(&s("b.")), 0);

        // Present against absent: 1.
        assert_eq!(s("a.xm").compare_extensions(&s("b")), 1);

        // Absent against present compares the scanned-over bytes.
        assert_eq!(s("abc").compare_extensions(&s("x.bc")), 0);
        assert_ne!(s("abc").compare_extensions(&s("x.xm")), 0);
    }

    #[test]
    fn compare_to_extension_and_descriptor() {
        assert!(s("song.XM").compare_to_extension(&s("xm")));
        assert!(!s("song.").compare_to_extension(&s("")));
        assert!(!s("song").compare_to_extension(&s("xm")));

        let xm = Descriptor::new("xm", "Fasttracker II module");
        assert!(xm.matches(&s("mods/Tune.Xm")));
        assert!(!xm.matches(&s("mods/tune.mod")));
    }

    #[test]
    fn ensure_trailing_char() {
        let mut v = s("mods");
        v.ensure_trailing_char(b'/');
        v.ensure_trailing_char(b'/');
        assert_eq!(v.as_bytes(), b"mods/");

        let mut empty = UiString::new();
        empty.ensure_trailing_char(b'/');
        assert!(empty.is_empty());
    }

    #[test]
    fn replace_copies() {
        let mut v = s("old");
        v.replace(&s("newer"));
        assert_eq!(v.as_bytes(), b"newer");
    }
}
