//! Normalizes raw model output before it is parsed.
//!
//! Models like to wrap JSON in markdown fences (```` ```json ... ``` ````).
//! Rather than parse markdown, every backtick and every literal `json` is
//! removed and the result trimmed. This also strips `json` from inside
//! string values, e.g. a target of `"jsonland"` becomes `"land"`.

const FENCE_CHAR: char = '`';
const FENCE_LANG: &str = "json";

/// Strip backticks and the literal `json`, then trim surrounding whitespace.
///
/// Removal of `json` repeats until none is left, so that removing one
/// occurrence cannot expose another (`jsjsonon`). That makes the function
/// idempotent for every input.
pub fn sanitize(raw: &str) -> String {
    let mut text: String = raw.chars().filter(|&c| c != FENCE_CHAR).collect();
    while text.contains(FENCE_LANG) {
        text = text.replace(FENCE_LANG, "");
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n{\"action\":\"display_text\",\"target\":\"hi\"}\n```";
        assert_eq!(sanitize(raw), r#"{"action":"display_text","target":"hi"}"#);
    }

    #[test]
    fn strips_plain_fence() {
        assert_eq!(sanitize("```\n{\"a\": 1}\n```"), r#"{"a": 1}"#);
    }

    #[test]
    fn strips_inline_backticks() {
        assert_eq!(sanitize("`{}`"), "{}");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize("  \n {\"a\": 1}  \n "), r#"{"a": 1}"#);
    }

    #[test]
    fn plain_json_unchanged() {
        let raw = r#"{"action":"unknown","target":"?"}"#;
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn removes_json_inside_values() {
        let raw = r#"{"action":"display_text","target":"jsonland"}"#;
        assert_eq!(sanitize(raw), r#"{"action":"display_text","target":"land"}"#);
    }

    #[test]
    fn json_removal_is_case_sensitive() {
        assert_eq!(sanitize("JSON Json"), "JSON Json");
    }

    #[test]
    fn nested_json_fully_removed() {
        assert_eq!(sanitize("jsjsonon"), "");
        assert_eq!(sanitize("js`on"), "");
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("```json\n```"), "");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "",
            "   ",
            "```json\n{\"a\": 1}\n```",
            "jsjsonon",
            "js`on",
            "j`s`o`n json",
            " \n```json  {\"target\": \"json json\"} ``` \n",
            "I don't understand",
            "jjsonsonx",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }
}
