use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use hubsite_meta::MetadataCatalog;
use hubsite_static::{
    embedded_entries, BuildConfig, BuildError, BuildOutcome, CommandRunner, CommandSpec,
    CommandStatus, HubPage, Pipeline, PipelineError, ProjectBuilder,
};
use tempfile::tempdir;

/// Pretends to be npm: the build step writes `dist/index.html`.
#[derive(Default)]
struct FakeNpm {
    calls: Rc<RefCell<Vec<(String, PathBuf)>>>,
}

impl CommandRunner for FakeNpm {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> io::Result<CommandStatus> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), cwd.to_path_buf()));

        if command.args.iter().any(|a| a == "build") {
            fs::create_dir_all(cwd.join("dist"))?;
            fs::write(cwd.join("dist/index.html"), "<h1>alpha</h1>")?;
        }

        Ok(CommandStatus::from_code(0))
    }
}

/// Build "succeeds" but never produces an artifact directory.
struct NoOutputNpm;

impl CommandRunner for NoOutputNpm {
    fn run(&self, _command: &CommandSpec, _cwd: &Path) -> io::Result<CommandStatus> {
        Ok(CommandStatus::from_code(0))
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_projects(root: &Path) -> BuildConfig {
    let projects = root.join("Projects");

    write(
        &projects.join("alpha/package.json"),
        r#"{"name": "alpha", "scripts": {"build": "vite build"}}"#,
    );
    write(&projects.join("alpha/src/main.js"), "console.log('alpha')");
    write(&projects.join("alpha/node_modules/dep/index.js"), "dep");
    write(&projects.join("BetaSite/docs/index.html"), "<h1>beta</h1>");
    write(&projects.join("BetaSite/notes.txt"), "not published");

    BuildConfig {
        projects_dir: projects,
        output_dir: root.join("output"),
        ..Default::default()
    }
}

#[test]
fn publishes_projects_and_hub_page() {
    let temp = tempdir().unwrap();
    let config = setup_projects(temp.path());
    let output = config.output_dir.clone();

    let builder = ProjectBuilder::new(config, MetadataCatalog::default(), FakeNpm::default());
    let pipeline = Pipeline::new(builder, HubPage::new("Project Hub", "/hub", true));

    let result = pipeline.run().unwrap();

    assert_eq!(
        fs::read_to_string(output.join("alpha/index.html")).unwrap(),
        "<h1>alpha</h1>"
    );
    assert_eq!(
        fs::read_to_string(output.join("beta-site/index.html")).unwrap(),
        "<h1>beta</h1>"
    );
    assert!(!output.join("beta-site/notes.txt").exists());
    assert_eq!(result.hub_page, output.join("index.html"));

    let outcomes: Vec<_> = result
        .summary
        .entries
        .iter()
        .map(|e| e.outcome.clone())
        .collect();
    assert_eq!(
        outcomes,
        vec![
            BuildOutcome::Copied {
                source: "docs/".to_string()
            },
            BuildOutcome::Built {
                output: "dist".to_string()
            },
        ]
    );

    let html = fs::read_to_string(output.join("index.html")).unwrap();
    let entries = embedded_entries(&html).unwrap();
    let mut hrefs: Vec<_> = entries.iter().map(|e| e.href.as_str()).collect();
    hrefs.sort();
    assert_eq!(hrefs, vec!["/hub/alpha/", "/hub/beta-site/"]);
}

#[test]
fn runs_install_then_build_in_project_dir() {
    let temp = tempdir().unwrap();
    let config = setup_projects(temp.path());
    let alpha = config.projects_dir.join("alpha");
    let runner = FakeNpm::default();
    let calls = Rc::clone(&runner.calls);

    let builder = ProjectBuilder::new(config, MetadataCatalog::default(), runner);
    builder.build_all().unwrap();

    assert_eq!(
        *calls.borrow(),
        vec![
            ("npm ci".to_string(), alpha.clone()),
            ("npm run build".to_string(), alpha),
        ]
    );
}

#[test]
fn uses_catalog_metadata_on_cards() {
    let temp = tempdir().unwrap();
    let config = setup_projects(temp.path());
    let output = config.output_dir.clone();
    let catalog = MetadataCatalog::from_json(
        r#"[
            {"directory": "BetaSite", "title": "Beta Docs", "tags": ["docs"]},
            {"slug": "alpha", "externalUrl": "https://alpha.example.com", "linkText": "Launch"}
        ]"#,
    )
    .unwrap();

    let builder = ProjectBuilder::new(config, catalog, FakeNpm::default());
    Pipeline::new(builder, HubPage::new("Hub", "/hub", false))
        .run()
        .unwrap();

    let html = fs::read_to_string(output.join("index.html")).unwrap();
    let entries = embedded_entries(&html).unwrap();

    let beta = entries.iter().find(|e| e.slug == "beta-site").unwrap();
    assert_eq!(beta.title, "Beta Docs");
    assert_eq!(beta.tags, vec!["docs".to_string()]);

    let alpha = entries.iter().find(|e| e.slug == "alpha").unwrap();
    assert_eq!(alpha.title, "alpha");
    assert_eq!(alpha.link_text, "Launch");
    assert_eq!(alpha.external_url.as_deref(), Some("https://alpha.example.com"));
    assert_eq!(alpha.href, "/hub/alpha/");
}

#[test]
fn missing_build_output_aborts_before_hub_page() {
    let temp = tempdir().unwrap();
    let config = setup_projects(temp.path());
    let output = config.output_dir.clone();

    let builder = ProjectBuilder::new(config, MetadataCatalog::default(), NoOutputNpm);
    let result = Pipeline::new(builder, HubPage::new("Hub", "/hub", false)).run();

    assert!(matches!(
        result,
        Err(PipelineError::Build(BuildError::MissingOutput { .. }))
    ));
    // BetaSite sorts before alpha and was already published.
    assert!(output.join("beta-site/index.html").exists());
    assert_eq!(fs::read_dir(output.join("alpha")).unwrap().count(), 0);
    assert!(!output.join("index.html").exists());
}
