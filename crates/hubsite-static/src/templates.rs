//! Template engine for rendering the hub page.

use minijinja::{context, Environment};

use crate::hub::HubEntry;

/// Context for rendering the hub template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HubContext {
    /// Site title
    pub title: String,
    /// Normalized base path, e.g. `/hub`
    pub base_path: String,
    /// Cards to show, in order
    pub projects: Vec<HubEntry>,
    /// Inline stylesheet
    pub css: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in hub template.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("hub.html".to_string(), HUB_TEMPLATE.to_string())
            .expect("Failed to add hub template");

        Self { env }
    }

    /// Render the hub page.
    pub fn render_hub(&self, context: &HubContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("hub.html")?;

        tmpl.render(context! {
            title => &context.title,
            base_path => &context.base_path,
            projects => &context.projects,
            css => &context.css,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const HUB_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <style>{{ css | safe }}</style>
</head>
<body>
  <header class="hub-header">
    <h1>{{ title }}</h1>
    <p>{{ projects | length }} published project{% if projects | length != 1 %}s{% endif %}</p>
  </header>
  <main id="projects" class="hub-grid" data-base-path="{{ base_path }}"></main>
  <script>
const PROJECTS = {{ projects | tojson }};

function projectCard(project) {
  const card = document.createElement("article");
  card.className = "card";

  const subtitle = document.createElement("span");
  subtitle.className = "card-subtitle";
  subtitle.textContent = project.subtitle;
  card.appendChild(subtitle);

  const title = document.createElement("h2");
  title.className = "card-title";
  title.textContent = project.title;
  card.appendChild(title);

  const description = document.createElement("p");
  description.className = "card-description";
  description.textContent = project.description;
  card.appendChild(description);

  if (project.tags.length > 0) {
    const tags = document.createElement("ul");
    tags.className = "card-tags";
    for (const tag of project.tags) {
      const badge = document.createElement("li");
      badge.className = "tag";
      badge.textContent = tag;
      tags.appendChild(badge);
    }
    card.appendChild(tags);
  }

  const link = document.createElement("a");
  link.className = "card-link";
  link.textContent = project.linkText;
  if (project.externalUrl) {
    link.href = project.externalUrl;
    link.target = "_blank";
    link.rel = "noopener noreferrer";
  } else {
    link.href = project.href;
  }
  card.appendChild(link);

  return card;
}

document.addEventListener("DOMContentLoaded", () => {
  const grid = document.getElementById("projects");
  if (PROJECTS.length === 0) {
    const empty = document.createElement("p");
    empty.className = "hub-empty";
    empty.textContent = "No projects have been published yet.";
    grid.appendChild(empty);
    return;
  }
  for (const project of PROJECTS) {
    grid.appendChild(projectCard(project));
  }
});
  </script>
</body>
</html>
"##;
