/// File name helpers for document uploads / 上传文件名工具函数

use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex"));

/// Get file extension (lowercase), empty when there is no `.` / 获取文件扩展名
pub fn get_ext(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Check the extension of `filename` against an allow-list of lowercase extensions
pub fn allowed_file(filename: &str, allowed: &[String]) -> bool {
    filename.contains('.') && allowed.iter().any(|ext| *ext == get_ext(filename))
}

/// Reduce a client supplied file name to something safe to join onto the upload directory.
///
/// 1. Drop non-ASCII characters / 去除非 ASCII 字符
/// 2. Path separators become spaces, whitespace runs become `_` / 路径分隔符转为空格, 空白转为 `_`
/// 3. Remove anything outside `[A-Za-z0-9_.-]` / 移除其他字符
/// 4. Strip leading/trailing `.` and `_` / 去除首尾的 `.` 和 `_`
///
/// May return an empty string.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");

    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        ["pdf", "txt", "doc", "docx"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_get_ext() {
        assert_eq!(get_ext("notes.TXT"), "txt");
        assert_eq!(get_ext("archive.tar.gz"), "gz");
        assert_eq!(get_ext("README"), "");
    }

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("glossary.pdf", &allowed()));
        assert!(allowed_file("Glossary.DOCX", &allowed()));
        assert!(!allowed_file("script.sh", &allowed()));
        assert!(!allowed_file("pdf", &allowed()));
        assert!(!allowed_file("", &allowed()));
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("..\\windows\\notes.txt"), "windows_notes.txt");
        assert_eq!(secure_filename("isiZulu (draft).pdf"), "isiZulu_draft.pdf");
        assert_eq!(secure_filename("über.txt"), "ber.txt");
        assert_eq!(secure_filename("..."), "");
    }
}
