/// Converts a 1-based line and column (as reported by `serde_json`) into a byte offset
/// into `source`. Positions past the end of the input are clamped to its length.
/// This is only called on the error path, so it walks the source line by line.
pub fn get_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let column = column.saturating_sub(1).min(text.len());
            return (offset + column).min(source.len());
        }
        offset += text.len();
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::get_offset;

    #[test]
    fn test_offset_first_line() {
        assert_eq!(get_offset("{\"a\":1}", 1, 1), 0);
        assert_eq!(get_offset("{\"a\":1}", 1, 5), 4);
    }

    #[test]
    fn test_offset_later_line() {
        let source = "{\n  \"a\": 1,\n  x\n}";
        assert_eq!(get_offset(source, 3, 3), 14);
    }

    #[test]
    fn test_offset_is_clamped() {
        assert_eq!(get_offset("{}", 1, 99), 2);
        assert_eq!(get_offset("{}", 7, 1), 2);
        assert_eq!(get_offset("", 0, 0), 0);
    }
}
