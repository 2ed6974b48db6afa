/// Strips every leading occurrence of `c`.
pub fn ltrim(s: &str, c: char) -> &str {
    s.trim_start_matches(c)
}
