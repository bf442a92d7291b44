use console::style;
use std::fmt::Write;

/// Size of a rendered output, as shown in the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub files: usize,
    pub snippets: usize,
    pub lines: usize,
    pub chars: usize,
    pub tokens: usize,
}

impl Stats {
    /// Measure `content`. Tokens are estimated at four bytes each.
    pub fn from_content(content: &str, files: usize) -> Self {
        let chars = content.len();
        Self {
            files,
            snippets: content.matches("```").count() / 2,
            lines: content.matches('\n').count() + 1,
            chars,
            tokens: chars.div_ceil(4),
        }
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", style("📋 Codeclip Summary:").bold());
        let _ = writeln!(out, "  Files: {}", self.files);
        let _ = writeln!(out, "  Snippets: {}", self.snippets);
        let _ = writeln!(out, "  Lines: {}", self.lines);
        let _ = writeln!(out, "  Characters: {}", self.chars);
        let _ = writeln!(
            out,
            "{}\n",
            style(format!("  Est. Tokens: {}", self.tokens)).blue()
        );
        if self.snippets > 0 {
            let _ = writeln!(out, "{}", style("✓ Code successfully copied!").green());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_fenced_blocks_and_lines() {
        let content = "```go filename=a.go\npackage a\n```\n\n";
        let stats = Stats::from_content(content, 1);
        assert_eq!(
            stats,
            Stats {
                files: 1,
                snippets: 1,
                lines: 5,
                chars: content.len(),
                tokens: (content.len() + 3) / 4,
            }
        );
    }

    #[test]
    fn empty_content() {
        let stats = Stats::from_content("", 0);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.tokens, 0);
        assert!(!console::strip_ansi_codes(&stats.summary()).contains("copied"));
    }

    #[test]
    fn summary_lists_counts() {
        let summary = Stats::from_content("```\nx\n```", 1).summary();
        let plain = console::strip_ansi_codes(&summary);
        assert!(plain.contains("Codeclip Summary:"));
        assert!(plain.contains("  Snippets: 1\n"));
        assert!(plain.contains("  Est. Tokens: 3\n"));
        assert!(plain.contains("✓ Code successfully copied!"));
    }
}
