//! Hub page stylesheet and CSS minification.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The hub page stylesheet.
    pub fn hub_css() -> String {
        HUB_CSS.to_string()
    }

    /// The hub stylesheet, minified when requested.
    ///
    /// Minification errors fall back to the original CSS.
    pub fn hub_css_for(minify: bool) -> String {
        let css = Self::hub_css();
        if !minify {
            return css;
        }

        match Self::minify_css(&css) {
            Ok(min) => min,
            Err(e) => {
                tracing::warn!("Failed to minify hub CSS: {}", e);
                css
            }
        }
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const HUB_CSS: &str = r#":root {
  --background: #0f1115;
  --card: #181b22;
  --border: #2a2f3a;
  --foreground: #e7e9ee;
  --muted: #9aa3b2;
  --accent: #7aa2f7;
  --radius: 14px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
  min-height: 100vh;
}

.hub-header {
  max-width: 1100px;
  margin: 0 auto;
  padding: 3rem 1.5rem 1.5rem;
}

.hub-header h1 {
  font-size: 2.25rem;
  letter-spacing: -0.02em;
}

.hub-header p {
  color: var(--muted);
  margin-top: 0.5rem;
}

.hub-grid {
  max-width: 1100px;
  margin: 0 auto;
  padding: 1rem 1.5rem 4rem;
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
  gap: 1.25rem;
}

.card {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
  transition: transform 0.15s ease, border-color 0.15s ease;
}

.card:hover {
  transform: translateY(-2px);
  border-color: var(--accent);
}

.card-subtitle {
  color: var(--accent);
  font-size: 0.8rem;
  text-transform: uppercase;
  letter-spacing: 0.08em;
}

.card-title {
  font-size: 1.25rem;
}

.card-description {
  color: var(--muted);
  flex: 1;
}

.card-tags {
  display: flex;
  flex-wrap: wrap;
  gap: 0.4rem;
  list-style: none;
}

.tag {
  border: 1px solid var(--border);
  border-radius: 999px;
  padding: 0.1rem 0.6rem;
  font-size: 0.75rem;
  color: var(--muted);
}

.card-link {
  align-self: flex-start;
  color: var(--background);
  background: var(--accent);
  border-radius: 8px;
  padding: 0.45rem 0.9rem;
  text-decoration: none;
  font-weight: 600;
}

.hub-empty {
  color: var(--muted);
  grid-column: 1 / -1;
  text-align: center;
  padding: 3rem 0;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minifies_hub_css() {
        let full = AssetPipeline::hub_css();
        let min = AssetPipeline::hub_css_for(true);

        assert!(min.len() < full.len());
        assert!(min.contains(".card"));
        assert!(!min.contains("\n  "));
    }

    #[test]
    fn keeps_css_when_not_minifying() {
        assert_eq!(AssetPipeline::hub_css_for(false), AssetPipeline::hub_css());
    }
}
