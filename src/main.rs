//! Renders every dashboard page once and writes the results to `OUT_DIR`.
//!
//! `<page>.html` holds the embeddable artifact, `<page>.md` the text shown
//! around it (or the notice when there is nothing to draw). `options.json`
//! lists the sidebar choices.

use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;

use portfolio::artifact::present;
use portfolio::config::{Config, Selections};
use portfolio::logging::{log, obj, v_str, Domain, Level};
use portfolio::pages::{render_all, sidebar_options, PageOutcome};
use portfolio::visual::HtmlRenderer;

fn write_notes(out_dir: &Path, page: &str, title: &str, lines: &[String]) -> Result<()> {
    let mut body = format!("# {}\n\n", title);
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    let path = out_dir.join(format!("{}.md", page));
    fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let selections = Selections::from_env().context("invalid page selections")?;
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("data_dir", v_str(&cfg.data_dir.display().to_string())),
            ("out_dir", v_str(&cfg.out_dir.display().to_string())),
            ("edge_policy", json!(cfg.edge_policy)),
        ]),
    );

    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("failed to create {}", cfg.out_dir.display()))?;

    let options_path = cfg.out_dir.join("options.json");
    let options = serde_json::to_string_pretty(&sidebar_options(&cfg))?;
    fs::write(&options_path, options)
        .with_context(|| format!("failed to write {}", options_path.display()))?;

    let renderer = HtmlRenderer::new();
    for (page, outcome) in render_all(&cfg, &selections, &renderer) {
        let outcome = outcome.with_context(|| format!("rendering page {}", page))?;
        match &outcome {
            PageOutcome::Rendered(view) => {
                let target = cfg.out_dir.join(format!("{}.html", page));
                present(&view.artifact, |staged| -> Result<()> {
                    fs::write(&target, staged.html)
                        .with_context(|| format!("failed to write {}", target.display()))
                })?;
                write_notes(&cfg.out_dir, page, &view.title, &view.notes)?;
                println!("{}: wrote {}", page, target.display());
            }
            PageOutcome::NoData {
                title,
                notes,
                notice,
            } => {
                let mut lines = notes.clone();
                lines.push(notice.clone());
                write_notes(&cfg.out_dir, page, title, &lines)?;
                println!("{}: {}", page, notice);
            }
            PageOutcome::Unavailable { title, message } => {
                write_notes(&cfg.out_dir, page, title, &[message.clone()])?;
                eprintln!("{}: {}", page, message);
            }
        }
    }
    Ok(())
}
