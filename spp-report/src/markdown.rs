use std::{fs, io, path::Path};

/// Removes every line that consists of a single `%`.
///
/// Converting a script with `#%%` cell markers into a notebook leaves a lone `%` behind for each
/// cell, which would otherwise end up in the report.
pub fn strip_percent_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| line.trim_end_matches(['\r', '\n']) != "%")
        .collect()
}

/// Applies [`strip_percent_lines`] to the file at the given path, in place.
pub fn strip_percent_lines_in_file(path: &Path) -> io::Result<()> {
    let text = fs::read_to_string(path)?;
    fs::write(path, strip_percent_lines(&text))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn only_lone_percent_lines() {
        let text = "# Title\n%\nThe 5% rule\n%%\n%\r\nend";
        assert_eq!(strip_percent_lines(text), "# Title\nThe 5% rule\n%%\nend");
    }

    #[test]
    fn last_line_without_newline() {
        assert_eq!(strip_percent_lines("text\n%"), "text\n");
    }

    #[test]
    fn in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        fs::write(&path, "a\n%\nb\n").unwrap();
        strip_percent_lines_in_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
