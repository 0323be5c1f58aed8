use anyhow::Result;

use crate::resolver::Resolution;

/// How a resolution is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single line, comma separated
    #[default]
    Text,
    /// One identifier per line
    Lines,
    /// JSON array
    Json,
}

impl OutputFormat {
    pub fn render(self, resolution: &Resolution) -> Result<String> {
        Ok(match self {
            OutputFormat::Text => resolution.to_string(),
            OutputFormat::Lines => resolution.join("\n"),
            OutputFormat::Json => serde_json::to_string(resolution)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Resolution {
        Resolution::new(vec!["C".into(), "B".into(), "A".into()])
    }

    #[test]
    fn test_render_text() {
        assert_eq!(OutputFormat::Text.render(&sample()).unwrap(), "C, B, A");
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(OutputFormat::Lines.render(&sample()).unwrap(), "C\nB\nA");
    }

    #[test]
    fn test_render_json() {
        assert_eq!(
            OutputFormat::Json.render(&sample()).unwrap(),
            r#"["C","B","A"]"#
        );
        assert_eq!(
            OutputFormat::Json.render(&Resolution::default()).unwrap(),
            "[]"
        );
    }
}
