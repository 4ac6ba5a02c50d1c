//! Static site generation: one dashboard page per person plus an index.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::chart::ChartJs;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::menu::create_team;
use crate::page::Page;
use crate::stats::{Backlog, BandSeries, GLOBAL};
use crate::team::{manager_trees, person_to_manager, TeamNode, TeamTree};

const STYLESHEET: &str = r#"body { font-family: Arial, sans-serif; margin: 24px; color: #222; }
h1 { color: #2c3e50; }
h3 { color: #7f8c8d; }
.team-nav { display: flex; gap: 24px; margin-bottom: 24px; }
.dropdown-toggle { font-weight: bold; cursor: pointer; }
.dropdown-menu { list-style: none; margin: 4px 0 0 0; padding-left: 16px; }
.dropdown-item > a, .dropdown-submenu > a { text-decoration: none; color: #3498db; }
.dropdown-submenu > .dropdown-menu { border-left: 1px solid #ddd; }
ul.people { list-style: none; padding: 0; }
ul.people a { text-decoration: none; color: #3498db; }
section.chart { max-width: 900px; margin-bottom: 32px; }
"#;

/// Writes a complete dashboard site for a backlog.
pub struct SiteGenerator {
    config: ReportConfig,
    backend: ChartJs,
}

impl SiteGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config, backend: ChartJs }
    }

    /// Generate the site; returns the output directory.
    pub fn generate(&self, backlog: &Backlog) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.output_dir)?;

        let people: BTreeSet<String> = backlog
            .managers
            .keys()
            .chain(backlog.owners.keys())
            .cloned()
            .collect();
        let trees = manager_trees(&backlog.teams, &people);
        let to_manager = person_to_manager(&backlog.teams);

        info!(people = people.len(), "generating dashboard pages");

        for name in &people {
            let tree = trees.get(name);
            let manager_tree = to_manager.get(name).and_then(|m| trees.get(m).map(|t| (m, t)));
            let page = self.person_page(name, backlog, tree, manager_tree)?;
            let path = self.config.output_dir.join(format!("{}.html", name));
            fs::write(&path, page.render(&self.backend)?)?;
            debug!(page = %name, "page written");
        }

        let index = self.index_page(&people);
        fs::write(
            self.config.output_dir.join("index.html"),
            index.render(&self.backend)?,
        )?;
        fs::write(self.config.output_dir.join("triage.css"), STYLESHEET)?;

        info!(output = %self.config.output_dir.display(), "site written");
        Ok(self.config.output_dir.clone())
    }

    fn person_page(
        &self,
        name: &str,
        backlog: &Backlog,
        tree: Option<&TeamNode>,
        manager_tree: Option<(&String, &TeamNode)>,
    ) -> Result<Page> {
        let mut page = Page::new(name, format!("{} - {}", name, self.config.title))
            .chart_height(self.config.chart_height);

        page.add_menu_container("team", "Team");
        page.add_menu_container("manager-team", "Manager's team");

        let own_tree = tree
            .map(|node| TeamTree::new(name, node.children.clone()))
            .unwrap_or_else(|| TeamTree::empty(name));
        create_team(&mut page, &own_tree, "team");

        let managers_tree = manager_tree
            .map(|(manager, node)| TeamTree::new(manager.clone(), node.children.clone()))
            .unwrap_or_else(|| TeamTree::empty("manager"));
        create_team(&mut page, &managers_tree, "manager-team");

        if let Some(rollup) = backlog.managers.get(name) {
            self.add_chart_pair(
                &mut page,
                "Global as manager",
                &rollup.raw,
                &rollup.cumulate,
                &backlog.labels,
            )?;
        }

        if let Some(owner) = backlog.owners.get(name) {
            if let (Some(raw), Some(cumulate)) =
                (owner.raw.get(GLOBAL), owner.cumulate.get(GLOBAL))
            {
                self.add_chart_pair(&mut page, "Global as owner", raw, cumulate, &backlog.labels)?;
            }
            for component in owner.components() {
                if let (Some(raw), Some(cumulate)) =
                    (owner.raw.get(component), owner.cumulate.get(component))
                {
                    self.add_chart_pair(&mut page, component, raw, cumulate, &backlog.labels)?;
                }
            }
        }

        Ok(page)
    }

    fn add_chart_pair(
        &self,
        page: &mut Page,
        heading: &str,
        raw: &BandSeries,
        cumulate: &BandSeries,
        labels: &[String],
    ) -> Result<()> {
        let slug = slugify(heading);

        let raw_id = format!("{slug}-raw");
        page.add_surface(&raw_id, heading);
        page.add_chart(&raw_id, labels, heading, raw)?;

        if self.config.cumulative_charts {
            let cumulative_id = format!("{slug}-cumulative");
            let title = format!("{heading} (cumulative)");
            page.add_surface(&cumulative_id, &title);
            page.add_chart(&cumulative_id, labels, &title, cumulate)?;
        }
        Ok(())
    }

    fn index_page(&self, people: &BTreeSet<String>) -> Page {
        let mut page = Page::new("index", self.config.title.clone());
        let mut list = String::from("<ul class=\"people\">\n");
        for name in people {
            list.push_str(&format!("<li><a href=\"{name}.html\">{name}</a></li>\n"));
        }
        list.push_str("</ul>");
        page.add_static_section(list);
        page
    }
}

/// Lowercased id-safe slug: alphanumerics kept, runs of anything else
/// collapsed to a single dash.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use crate::stats::{collect, team_backlog, BugEvent, EventKind};
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn sample_backlog() -> Backlog {
        let start = date(2023, 1, 1);
        let end = date(2023, 3, 31);
        let events = vec![
            BugEvent {
                kind: EventKind::Created,
                severity: Severity::Blocker,
                product: "Core".to_string(),
                component: "Graphics".to_string(),
                triage_owner: "ann".to_string(),
                at: date(2023, 1, 5),
            },
            BugEvent {
                kind: EventKind::Resolved,
                severity: Severity::Minor,
                product: "Core".to_string(),
                component: "Graphics".to_string(),
                triage_owner: "ann".to_string(),
                at: date(2023, 2, 10),
            },
            BugEvent {
                kind: EventKind::Created,
                severity: Severity::Normal,
                product: "Firefox".to_string(),
                component: "Session".to_string(),
                triage_owner: "bob".to_string(),
                at: date(2023, 3, 1),
            },
        ];
        let stats = collect(&events, start, end);

        let mut teams = BTreeMap::new();
        teams.insert("bob".to_string(), vec!["ann".to_string()]);
        team_backlog(&stats, &teams)
    }

    #[test]
    fn test_generate_site() {
        init_tracing();
        let dir = tempdir().unwrap();
        let config = ReportConfig::builder().output_dir(dir.path()).build();

        let output = SiteGenerator::new(config).generate(&sample_backlog()).unwrap();

        assert!(output.join("index.html").exists());
        assert!(output.join("triage.css").exists());
        assert!(output.join("ann.html").exists());
        assert!(output.join("bob.html").exists());
    }

    #[test]
    fn test_index_links_everyone() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::builder().output_dir(dir.path()).build();
        SiteGenerator::new(config).generate(&sample_backlog()).unwrap();

        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains("<a href=\"ann.html\">ann</a>"));
        assert!(index.contains("<a href=\"bob.html\">bob</a>"));
    }

    #[test]
    fn test_owner_page_charts_and_menus() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::builder().output_dir(dir.path()).build();
        SiteGenerator::new(config).generate(&sample_backlog()).unwrap();

        let ann = fs::read_to_string(dir.path().join("ann.html")).unwrap();
        assert!(ann.contains(r#"<canvas id="global-as-owner-raw""#));
        assert!(ann.contains(r#"<canvas id="global-as-owner-cumulative""#));
        assert!(ann.contains(r#"<canvas id="core-graphics-raw""#));
        assert!(ann.contains("DOMContentLoaded"));
        // ann reports to bob, so her manager-team menu lists bob's team
        assert!(ann.contains(r#"<ul id="manager-team" class="dropdown-menu">"#));
        assert!(ann.contains("<a href=\"ann.html\">ann</a>"));
    }

    #[test]
    fn test_manager_page_has_rollup_and_team_menu() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::builder().output_dir(dir.path()).build();
        SiteGenerator::new(config).generate(&sample_backlog()).unwrap();

        let bob = fs::read_to_string(dir.path().join("bob.html")).unwrap();
        assert!(bob.contains(r#"<canvas id="global-as-manager-raw""#));
        assert!(bob.contains(r#"<canvas id="global-as-owner-raw""#));
        assert!(bob.contains(r#"<canvas id="firefox-session-raw""#));
        // bob's own team menu lists ann
        let team_ul = bob.find(r#"<ul id="team""#).unwrap();
        let manager_ul = bob.find(r#"<ul id="manager-team""#).unwrap();
        let ann_item = bob.find("<a href=\"ann.html\">ann</a>").unwrap();
        assert!(team_ul < ann_item && ann_item < manager_ul);
    }

    #[test]
    fn test_cumulative_charts_can_be_disabled() {
        let dir = tempdir().unwrap();
        let config = ReportConfig::builder()
            .output_dir(dir.path())
            .cumulative_charts(false)
            .build();
        SiteGenerator::new(config).generate(&sample_backlog()).unwrap();

        let ann = fs::read_to_string(dir.path().join("ann.html")).unwrap();
        assert!(ann.contains(r#"<canvas id="global-as-owner-raw""#));
        assert!(!ann.contains("-cumulative"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Global as owner"), "global-as-owner");
        assert_eq!(slugify("Core::Graphics"), "core-graphics");
        assert_eq!(slugify("  WebRTC  "), "webrtc");
    }
}
